//! # ddl-diff
//!
//! > **Diff two schemas. Get a migration.**
//!
//! ddl-diff parses two versions of a SQL DDL schema, compares them table by
//! table and renders the difference as a transactional migration script.
//!
//! ## Quick Example
//!
//! ```rust
//! use ddl_diff::prelude::*;
//!
//! let before = parse_schema("CREATE TABLE users (id INT NOT NULL);", "mysql")?;
//! let after = parse_schema(
//!     "CREATE TABLE users (id INT NOT NULL, email VARCHAR(255));",
//!     "mysql",
//! )?;
//!
//! let diff = diff_schemas(&before, &after);
//! let sql = render_diff(&diff, "mysql")?;
//! assert!(sql.contains("ADD COLUMN `email` VARCHAR(255)"));
//! # Ok::<(), ddl_diff::DdlError>(())
//! ```
//!
//! ## Pipeline
//!
//! | Stage     | Module                 | Output                |
//! |-----------|------------------------|-----------------------|
//! | Grammar   | [`parser::grammar`]    | concrete parse tree   |
//! | Transform | [`parser::transform`]  | [`ast::Statement`]s   |
//! | Model     | [`schema`]             | [`Schema`]            |
//! | Diff      | [`diff`]               | [`Diff`]              |
//! | Render    | [`transpiler`]         | SQL script            |

pub mod ast;
pub mod config;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod parser;
pub mod schema;
pub mod transpiler;

pub use dialect::Dialect;
pub use diff::{Diff, DiffOptions};
pub use error::{DdlError, DdlResult};
pub use schema::Schema;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::dialect::Dialect;
    pub use crate::diff::{AlterClause, Diff, DiffOptions, diff_schemas_with};
    pub use crate::error::*;
    pub use crate::schema::{Schema, Table};
    pub use crate::transpiler::ToSql;
    pub use crate::{diff_schemas, parse_schema, render_diff};
}

/// Parse schema text written in the named dialect.
///
/// # Example
///
/// ```
/// use ddl_diff::parse_schema;
///
/// let schema = parse_schema("CREATE DATABASE shop;", "mysql").unwrap();
/// assert!(schema.tables().is_empty());
/// assert_eq!(schema.database_names(), vec!["shop"]);
/// ```
pub fn parse_schema(text: &str, dialect: &str) -> DdlResult<Schema> {
    let dialect: Dialect = dialect.parse()?;
    Ok(Schema::new(parser::parse(text, dialect)?))
}

/// Compute the operations that turn `before` into `after`.
pub fn diff_schemas(before: &Schema, after: &Schema) -> Diff {
    diff::diff_schemas(before, after)
}

/// Render a diff as a migration script in the named dialect.
pub fn render_diff(diff: &Diff, dialect: &str) -> DdlResult<String> {
    let dialect: Dialect = dialect.parse()?;
    Ok(transpiler::render(diff, dialect))
}
