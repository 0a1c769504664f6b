//! SQL Transpiler for schema diffs.
//!
//! Renders a [`Diff`] as a transactional migration script:
//!
//! ```text
//! BEGIN;
//!
//! SET foreign_key_checks=0;
//!
//! <CREATE TABLE ...>   creates, in discovery order
//!
//! <ALTER TABLE ...>    alters, sorted by table name
//!
//! <DROP TABLE ...>     drops, in discovery order
//!
//! SET foreign_key_checks=1;
//!
//! COMMIT;
//! ```

pub mod ddl;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::dialect::Dialect;
use crate::diff::Diff;
pub use traits::SqlGenerator;

/// Trait for converting model nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string using default dialect.
    fn to_sql(&self) -> String {
        self.to_sql_with_dialect(Dialect::default())
    }
    /// Convert this node to a SQL string with specific dialect.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String;
}

impl ToSql for Diff {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        render(self, dialect)
    }
}

impl ToSql for CreateTable {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        ddl::build_create_table(self, dialect.generator().as_ref())
    }
}

impl ToSql for Field {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        ddl::build_field(self, dialect.generator().as_ref())
    }
}

impl ToSql for Index {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> String {
        ddl::build_index(self, dialect.generator().as_ref())
    }
}

/// Render `diff` as a migration script in `dialect`.
pub fn render(diff: &Diff, dialect: Dialect) -> String {
    let script = render_with(diff, dialect.generator().as_ref());
    tracing::debug!(dialect = %dialect, bytes = script.len(), "rendered migration script");
    script
}

/// Render `diff` with an explicit generator.
pub fn render_with(diff: &Diff, generator: &dyn SqlGenerator) -> String {
    let creates: Vec<String> = diff
        .creates
        .iter()
        .map(|table| ddl::build_create_table(table, generator))
        .collect();
    let alters: Vec<String> = diff
        .alters
        .iter()
        .map(|(table, clauses)| ddl::build_alter_table(table, clauses, generator))
        .collect();
    let drops: Vec<String> = diff
        .drops
        .iter()
        .map(|table| ddl::build_drop_table(table, generator))
        .collect();

    let mut blocks = vec![
        generator.begin_transaction().to_string(),
        generator.foreign_key_checks(false),
    ];
    blocks.extend(
        [creates, alters, drops]
            .into_iter()
            .filter(|block| !block.is_empty())
            .map(|block| block.join("\n\n")),
    );
    blocks.push(generator.foreign_key_checks(true));
    blocks.push(generator.commit_transaction().to_string());

    let mut script = blocks.join("\n\n");
    script.push('\n');
    script
}
