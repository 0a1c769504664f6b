use crate::transpiler::traits::SqlGenerator;

/// MySQL Generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlGenerator;

impl MysqlGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SqlGenerator for MysqlGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn quote_string(&self, value: &str) -> String {
        // Backslash is an escape character inside MySQL string literals.
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn foreign_key_checks(&self, enabled: bool) -> String {
        format!("SET foreign_key_checks={};", if enabled { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        let generator = MysqlGenerator::new();
        assert_eq!(generator.quote_identifier("users"), "`users`");
        assert_eq!(generator.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_quote_string() {
        let generator = MysqlGenerator::new();
        assert_eq!(generator.quote_string("it's"), "'it''s'");
        assert_eq!(generator.quote_string(r"C:\tmp"), r"'C:\\tmp'");
    }

    #[test]
    fn test_foreign_key_checks() {
        let generator = MysqlGenerator::new();
        assert_eq!(generator.foreign_key_checks(false), "SET foreign_key_checks=0;");
        assert_eq!(generator.foreign_key_checks(true), "SET foreign_key_checks=1;");
    }
}
