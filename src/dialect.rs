use std::fmt;
use std::str::FromStr;

use crate::error::DdlError;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::traits::SqlGenerator;

/// Supported SQL dialects.
///
/// A dialect selects both the grammar used to read a schema and the
/// generator used to render a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySQL,
}

impl Dialect {
    /// Every registered dialect.
    pub const ALL: &'static [Dialect] = &[Dialect::MySQL];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySQL => "mysql",
        }
    }

    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::MySQL => Box::new(MysqlGenerator),
        }
    }
}

impl FromStr for Dialect {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|dialect| dialect.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DdlError::UnknownDialect(s.to_string()))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::MySQL);
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::MySQL);
    }

    #[test]
    fn test_unknown_dialect() {
        let err = "postgres".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, DdlError::UnknownDialect(name) if name == "postgres"));
    }
}
