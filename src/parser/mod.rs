//! Schema parser using nom.
//!
//! Parses DDL text into canonical statements in two passes.
//!
//! ```text
//! CREATE TABLE `users` (`id` INT NOT NULL, PRIMARY KEY (`id`));
//!        │                      │                    │
//!        │   grammar            │                    │
//!        ▼                      ▼                    ▼
//! RawCreateTable { name: "`users`", definitions: [Field, Index] }
//!        │   transform
//!        ▼
//! CreateTable { name: "users", fields: [..], indices: [..] }
//! ```

pub mod grammar;
pub mod transform;
pub mod tree;


use nom::error::{VerboseError, VerboseErrorKind};

use crate::ast::Statement;
use crate::dialect::Dialect;
use crate::error::{DdlError, DdlResult};
use tree::RawStatement;

/// Parse schema text written in `dialect` into canonical statements.
///
/// Parsing is all-or-nothing: any unrecognized statement fails the whole
/// call.
pub fn parse(source: &str, dialect: Dialect) -> DdlResult<Vec<Statement>> {
    let tree = match dialect {
        Dialect::MySQL => parse_tree(source)?,
    };
    tracing::debug!(dialect = %dialect, statements = tree.len(), "parsed schema");
    Ok(transform::normalize(&tree))
}

/// Parse schema text into the concrete parse tree.
pub fn parse_tree(source: &str) -> DdlResult<Vec<RawStatement<'_>>> {
    let mut statements = Vec::new();
    let mut input = source.trim_start();

    while !input.is_empty() {
        let (rest, statement) =
            grammar::statement(input).map_err(|err| to_parse_error(source, err))?;
        statements.push(statement);
        input = rest.trim_start();
    }

    Ok(statements)
}

fn to_parse_error(source: &str, err: nom::Err<VerboseError<&str>>) -> DdlError {
    let err = match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => {
            return DdlError::parse(source, source.len(), "unexpected end of input");
        }
    };

    // The first entry is the innermost failure, contexts are appended outward.
    let position = err
        .errors
        .first()
        .map(|(rest, _)| source.len() - rest.len())
        .unwrap_or_default();
    let contexts: Vec<&str> = err
        .errors
        .iter()
        .filter_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(name) => Some(*name),
            VerboseErrorKind::Char(_) | VerboseErrorKind::Nom(_) => None,
        })
        .collect();

    let near: String = source[position..]
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(40)
        .collect();
    let message = if contexts.is_empty() {
        "unrecognized statement".to_string()
    } else {
        format!("invalid {}", contexts.join(" in "))
    };

    if near.is_empty() {
        DdlError::parse(source, position, format!("{} at end of input", message))
    } else {
        DdlError::parse(source, position, format!("{} near '{}'", message, near))
    }
}
