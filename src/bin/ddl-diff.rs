//! ddl-diff: schema diff CLI
//!
//! Prints the migration that turns a before-schema into an after-schema.
//!
//! # Usage
//!
//! ```bash
//! # Before-schema on stdin, after-schema from ./schema.sql
//! mysqldump --no-data shop | ddl-diff diff
//!
//! # Both schemas from files, only altering changed columns
//! ddl-diff diff --before old.sql --after new.sql --skip-unchanged
//!
//! # The diff itself as JSON
//! ddl-diff diff --before old.sql --after new.sql --format json
//! ```

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use ddl_diff::config::{Overrides, SchemaSource};
use ddl_diff::prelude::*;
use ddl_diff::transpiler;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ddl-diff")]
#[command(version)]
#[command(about = "Diff two SQL DDL schemas into a migration script", long_about = None)]
#[command(after_help = "EXAMPLES:
    mysqldump --no-data shop | ddl-diff diff
    ddl-diff diff --before old.sql --after new.sql --skip-unchanged
    ddl-diff diff --before old.sql --type mysql --format json")]
struct Cli {
    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (default: ./ddl-diff.toml)
    #[arg(long, global = true, env = "DDL_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the migration from the before-schema to the after-schema
    Diff(DiffArgs),
}

#[derive(Args)]
struct DiffArgs {
    /// SQL dialect of both schemas and the output (e.g. mysql)
    #[arg(short = 't', long = "type")]
    dialect: Option<String>,

    /// Dialect of the before-schema
    #[arg(long = "before-type")]
    before_dialect: Option<String>,

    /// Dialect of the after-schema
    #[arg(long = "after-type")]
    after_dialect: Option<String>,

    /// Dialect of the generated script
    #[arg(long = "output-type")]
    output_dialect: Option<String>,

    /// Path to the before-schema (default: stdin)
    #[arg(short, long)]
    before: Option<PathBuf>,

    /// Path to the after-schema (default: ./schema.sql)
    #[arg(short, long)]
    after: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "sql")]
    format: OutputFormat,

    /// Only emit CHANGE COLUMN for columns whose definition changed
    #[arg(long)]
    skip_unchanged: bool,
}

impl DiffArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            dialect: self.dialect.clone(),
            before_dialect: self.before_dialect.clone(),
            after_dialect: self.after_dialect.clone(),
            output_dialect: self.output_dialect.clone(),
            after: self.after.clone(),
            skip_unchanged: self.skip_unchanged,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Diff(args) => run_diff(args, cli.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if e.downcast_ref::<DdlError>().is_some_and(is_usage_error) {
            eprintln!();
            eprintln!("Try: ddl-diff diff --help");
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays a clean script.
fn init_tracing(verbose: bool) {
    let default = if verbose { "ddl_diff=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_usage_error(err: &DdlError) -> bool {
    matches!(err, DdlError::UnknownDialect(_) | DdlError::MissingInput)
}

fn run_diff(args: &DiffArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?.apply_overrides(&args.overrides());

    let before_dialect = config.before_dialect()?;
    let after_dialect = config.after_dialect()?;
    let output_dialect = config.output_dialect()?;

    let stdin = std::io::stdin();
    let before_source = SchemaSource::before(args.before.as_deref(), stdin.is_terminal())?;
    let before_text = before_source
        .read(stdin.lock())
        .with_context(|| format!("Failed to read before schema from {}", before_source))?;

    let after_source = config.after_source();
    let after_text = after_source
        .read(std::io::empty())
        .with_context(|| format!("Failed to read after schema from {}", after_source))?;

    let before = Schema::new(
        ddl_diff::parser::parse(&before_text, before_dialect).context("Invalid before schema")?,
    );
    let after = Schema::new(
        ddl_diff::parser::parse(&after_text, after_dialect).context("Invalid after schema")?,
    );

    let diff = diff_schemas_with(&before, &after, config.diff_options());
    tracing::debug!(statements = diff.statement_count(), "diff ready");

    match args.format {
        OutputFormat::Sql => print!("{}", transpiler::render(&diff, output_dialect)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
    }
    Ok(())
}
