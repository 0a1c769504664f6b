//! Error types for ddl-diff.

use thiserror::Error;

/// The main error type for schema parsing, diffing and rendering.
#[derive(Debug, Error)]
pub enum DdlError {
    /// No parser or renderer is registered under this dialect name.
    #[error("Unknown dialect: '{0}'. Expected: mysql")]
    UnknownDialect(String),

    /// The schema text does not match the grammar.
    #[error("Parse error at line {line}, column {column}: {context}")]
    Parse {
        /// Byte offset into the schema text.
        position: usize,
        line: usize,
        column: usize,
        context: String,
    },

    /// No "before" schema was supplied.
    #[error("No before schema given. Pipe it on stdin or pass --before <PATH>")]
    MissingInput,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DdlError {
    /// Create a parse error at byte `position` of `source`.
    ///
    /// Line and column are 1-based and counted in characters.
    pub fn parse(source: &str, position: usize, context: impl Into<String>) -> Self {
        let position = position.min(source.len());
        let consumed = source.get(..position).unwrap_or(source);
        let line = consumed.matches('\n').count() + 1;
        let column = match consumed.rfind('\n') {
            Some(newline) => consumed[newline + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };

        Self::Parse {
            position,
            line,
            column,
            context: context.into(),
        }
    }

    /// Byte offset of a parse error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for DdlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for ddl-diff operations.
pub type DdlResult<T> = Result<T, DdlError>;
