//! Configuration loaded from `ddl-diff.toml`, command-line overrides and
//! where each schema is read from.
//!
//! ```toml
//! dialect = "mysql"
//! after = "db/schema.sql"
//! skip_unchanged_fields = true
//! ```

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dialect::Dialect;
use crate::diff::DiffOptions;
use crate::error::{DdlError, DdlResult};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "ddl-diff.toml";

/// After-schema used when neither `--after` nor the config names one.
pub const DEFAULT_AFTER_SCHEMA: &str = "schema.sql";

/// After-schema used when no schema file exists at all.
pub const EMPTY_SCHEMA: &str = "CREATE DATABASE database_name;";

/// Settings shared by every `diff` invocation. CLI flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dialect of both schemas and the output.
    pub dialect: Option<String>,
    pub before_dialect: Option<String>,
    pub after_dialect: Option<String>,
    pub output_dialect: Option<String>,
    /// Path to the after-schema when `--after` is not given.
    pub after: Option<PathBuf>,
    pub skip_unchanged_fields: bool,
}

impl Config {
    /// Load from `explicit` if given, else the first config file found.
    /// No file at all yields the defaults.
    pub fn load(explicit: Option<&Path>) -> DdlResult<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        match Self::search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::from_path(&path),
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Candidate config files in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("ddl-diff").join("config.toml"));
        }
        paths
    }

    pub fn from_path(path: &Path) -> DdlResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DdlError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> DdlResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject dialect names no parser or generator is registered for.
    fn validate(&self) -> DdlResult<()> {
        for name in [
            &self.dialect,
            &self.before_dialect,
            &self.after_dialect,
            &self.output_dialect,
        ]
        .into_iter()
        .flatten()
        {
            name.parse::<Dialect>()?;
        }
        Ok(())
    }

    /// Dialect of the before-schema.
    pub fn before_dialect(&self) -> DdlResult<Dialect> {
        Self::resolve(&self.before_dialect, &self.dialect)
    }

    /// Dialect of the after-schema.
    pub fn after_dialect(&self) -> DdlResult<Dialect> {
        Self::resolve(&self.after_dialect, &self.dialect)
    }

    /// Dialect of the rendered script.
    pub fn output_dialect(&self) -> DdlResult<Dialect> {
        Self::resolve(&self.output_dialect, &self.dialect)
    }

    /// Apply command-line values on top of the file settings.
    pub fn apply_overrides(mut self, overrides: &Overrides) -> Self {
        let pairs = [
            (&overrides.dialect, &mut self.dialect),
            (&overrides.before_dialect, &mut self.before_dialect),
            (&overrides.after_dialect, &mut self.after_dialect),
            (&overrides.output_dialect, &mut self.output_dialect),
        ];
        for (flag, value) in pairs {
            if flag.is_some() {
                value.clone_from(flag);
            }
        }
        if overrides.after.is_some() {
            self.after.clone_from(&overrides.after);
        }
        self.skip_unchanged_fields |= overrides.skip_unchanged;
        self
    }

    /// The configured after-schema, then [`DEFAULT_AFTER_SCHEMA`] in the
    /// working directory, then an empty database.
    pub fn after_source(&self) -> SchemaSource {
        self.after_source_or(Path::new(DEFAULT_AFTER_SCHEMA))
    }

    /// [`Config::after_source`] with `fallback` in place of
    /// [`DEFAULT_AFTER_SCHEMA`].
    pub fn after_source_or(&self, fallback: &Path) -> SchemaSource {
        if let Some(path) = &self.after {
            return SchemaSource::File(path.clone());
        }
        if fallback.is_file() {
            return SchemaSource::File(fallback.to_path_buf());
        }
        tracing::debug!("no after schema found, diffing against an empty database");
        SchemaSource::Empty
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            alter_unchanged_fields: !self.skip_unchanged_fields,
        }
    }

    fn resolve(specific: &Option<String>, shared: &Option<String>) -> DdlResult<Dialect> {
        match specific.as_ref().or(shared.as_ref()) {
            Some(name) => name.parse(),
            None => Ok(Dialect::default()),
        }
    }
}

/// Command-line values. Each one set replaces its config key, except
/// `skip_unchanged`, which can only turn skipping on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub dialect: Option<String>,
    pub before_dialect: Option<String>,
    pub after_dialect: Option<String>,
    pub output_dialect: Option<String>,
    pub after: Option<PathBuf>,
    pub skip_unchanged: bool,
}

/// Where a schema's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    File(PathBuf),
    Stdin,
    /// [`EMPTY_SCHEMA`]
    Empty,
}

impl SchemaSource {
    /// `path` if given, otherwise stdin as long as it is piped or redirected.
    pub fn before(path: Option<&Path>, stdin_is_terminal: bool) -> DdlResult<Self> {
        match path {
            Some(path) => Ok(Self::File(path.to_path_buf())),
            None if stdin_is_terminal => Err(DdlError::MissingInput),
            None => Ok(Self::Stdin),
        }
    }

    /// Read the schema text. `stdin` is only read for [`SchemaSource::Stdin`],
    /// where blank input is [`DdlError::MissingInput`].
    pub fn read(&self, mut stdin: impl Read) -> DdlResult<String> {
        match self {
            Self::File(path) => Ok(fs::read_to_string(path)?),
            Self::Stdin => {
                let mut text = String::new();
                stdin.read_to_string(&mut text)?;
                if text.trim().is_empty() {
                    return Err(DdlError::MissingInput);
                }
                Ok(text)
            }
            Self::Empty => Ok(EMPTY_SCHEMA.to_string()),
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "'{}'", path.display()),
            Self::Stdin => write!(f, "stdin"),
            Self::Empty => write!(f, "an empty database"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.before_dialect().unwrap(), Dialect::MySQL);
        assert_eq!(config.diff_options(), DiffOptions::default());
    }

    #[test]
    fn test_per_side_dialect_falls_back_to_shared() {
        let config = Config::from_toml_str(
            r#"
            dialect = "MySQL"
            output_dialect = "mysql"
            after = "db/schema.sql"
            skip_unchanged_fields = true
            "#,
        )
        .unwrap();

        assert_eq!(config.after_dialect().unwrap(), Dialect::MySQL);
        assert_eq!(config.output_dialect().unwrap(), Dialect::MySQL);
        assert_eq!(config.after, Some(PathBuf::from("db/schema.sql")));
        assert_eq!(config.diff_options(), DiffOptions::skip_unchanged());
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        let err = Config::from_toml_str(r#"before_dialect = "oracle""#).unwrap_err();
        assert!(matches!(err, DdlError::UnknownDialect(name) if name == "oracle"));
    }

    #[test]
    fn test_unknown_key_is_a_config_error() {
        let err = Config::from_toml_str("colour = true").unwrap_err();
        assert!(matches!(err, DdlError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/ddl-diff.toml"))).unwrap_err();
        assert!(matches!(err, DdlError::Config(_)));
    }

    #[test]
    fn test_search_paths_start_with_working_directory() {
        assert_eq!(Config::search_paths()[0], PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn test_flags_override_config_keys() {
        let config = Config::from_toml_str(
            r#"
            dialect = "mysql"
            before_dialect = "mysql"
            after = "db/schema.sql"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            output_dialect: Some("MySQL".to_string()),
            after: Some(PathBuf::from("new.sql")),
            ..Overrides::default()
        };

        let merged = config.apply_overrides(&overrides);
        assert_eq!(merged.dialect.as_deref(), Some("mysql"));
        assert_eq!(merged.before_dialect.as_deref(), Some("mysql"));
        assert_eq!(merged.output_dialect.as_deref(), Some("MySQL"));
        assert_eq!(merged.after, Some(PathBuf::from("new.sql")));
        assert_eq!(merged.output_dialect().unwrap(), Dialect::MySQL);
    }

    #[test]
    fn test_unset_flags_keep_config_keys() {
        let config = Config {
            after: Some(PathBuf::from("db/schema.sql")),
            ..Config::default()
        };
        let merged = config.clone().apply_overrides(&Overrides::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_skip_unchanged_flag_only_turns_skipping_on() {
        let merged = |in_file: bool, flag: bool| {
            let config = Config {
                skip_unchanged_fields: in_file,
                ..Config::default()
            };
            let overrides = Overrides {
                skip_unchanged: flag,
                ..Overrides::default()
            };
            config.apply_overrides(&overrides).skip_unchanged_fields
        };

        assert!(!merged(false, false));
        assert!(merged(false, true));
        assert!(merged(true, false));
        assert!(merged(true, true));
    }

    #[test]
    fn test_after_source_fallback_order() {
        let existing = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let missing = Path::new("/nonexistent/schema.sql");

        let configured = Config {
            after: Some(PathBuf::from("db/schema.sql")),
            ..Config::default()
        };
        assert_eq!(
            configured.after_source_or(existing),
            SchemaSource::File(PathBuf::from("db/schema.sql"))
        );

        let unconfigured = Config::default();
        assert_eq!(
            unconfigured.after_source_or(existing),
            SchemaSource::File(existing.to_path_buf())
        );
        assert_eq!(unconfigured.after_source_or(missing), SchemaSource::Empty);
    }

    #[test]
    fn test_before_path_wins_over_stdin() {
        let path = Path::new("old.sql");
        for terminal in [true, false] {
            assert_eq!(
                SchemaSource::before(Some(path), terminal).unwrap(),
                SchemaSource::File(path.to_path_buf())
            );
        }
        assert_eq!(SchemaSource::before(None, false).unwrap(), SchemaSource::Stdin);
        assert!(matches!(
            SchemaSource::before(None, true),
            Err(DdlError::MissingInput)
        ));
    }

    #[test]
    fn test_blank_stdin_is_missing_input() {
        let err = SchemaSource::Stdin.read(" \n\t".as_bytes()).unwrap_err();
        assert!(matches!(err, DdlError::MissingInput));

        let text = SchemaSource::Stdin.read("USE shop;".as_bytes()).unwrap();
        assert_eq!(text, "USE shop;");
    }

    #[test]
    fn test_empty_source_is_an_empty_database() {
        let text = SchemaSource::Empty.read(std::io::empty()).unwrap();
        assert_eq!(text, EMPTY_SCHEMA);
        assert_eq!(SchemaSource::Empty.to_string(), "an empty database");
    }

    #[test]
    fn test_missing_schema_file_is_io_error() {
        let source = SchemaSource::File(PathBuf::from("/nonexistent/old.sql"));
        assert!(matches!(source.read(std::io::empty()), Err(DdlError::Io(_))));
        assert_eq!(source.to_string(), "'/nonexistent/old.sql'");
    }
}
