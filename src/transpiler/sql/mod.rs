//! Dialect-specific generators.

pub mod mysql;
