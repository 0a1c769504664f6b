//! Transpiler traits.

/// Trait for dialect-specific SQL generation.
pub trait SqlGenerator {
    /// Quote an identifier (table, column or index name).
    fn quote_identifier(&self, name: &str) -> String;

    /// Render a string literal.
    /// Default implementation doubles single quotes (standard SQL).
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Render a bit literal.
    fn bit_literal(&self, value: u64) -> String {
        format!("b'{:b}'", value)
    }

    /// Statement opening the migration transaction.
    fn begin_transaction(&self) -> &str {
        "BEGIN;"
    }

    /// Statement closing the migration transaction.
    fn commit_transaction(&self) -> &str {
        "COMMIT;"
    }

    /// Toggle foreign key enforcement for the length of the migration.
    fn foreign_key_checks(&self, enabled: bool) -> String;
}
