use anyhow::Result;
use clap::{Parser, ValueEnum};
use sql_seed::types::DEFAULT_BATCH_SIZE;
use sql_seed::{ColumnMapping, Dialect, GenerationConfig, SQLGenerator, SqlSeedError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sql-seed")]
#[command(about = "Generate SQL INSERT statements from CSV files")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Print INSERT statements for users.csv into table `users`
    sql-seed users.csv

    # MySQL output with a CREATE TABLE statement, written to a file
    sql-seed users.csv -d mysql --create-table -o users.sql

    # Rename columns and preview the first rows
    sql-seed users.csv --columns id:user_id,name:full_name --dry-run")]
struct Cli {
    /// CSV file to convert
    #[arg(value_name = "CSV_FILE", value_parser = existing_file)]
    csv_file: PathBuf,

    /// Table name (defaults to the CSV file name without extension)
    #[arg(short, long)]
    table: Option<String>,

    /// SQL dialect
    #[arg(short, long, value_enum, default_value = "postgresql")]
    dialect: DialectArg,

    /// Rows per INSERT statement
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show first 5 INSERT statements only
    #[arg(long)]
    dry_run: bool,

    /// Include CREATE TABLE statement
    #[arg(long)]
    create_table: bool,

    /// Column mapping (e.g., "id:user_id,name:full_name")
    #[arg(long)]
    columns: Option<String>,

    /// Also write the inferred table schema as JSON
    #[arg(long, value_name = "FILE")]
    schema_output: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Set log level explicitly
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DialectArg {
    Postgresql,
    Mysql,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(dialect: DialectArg) -> Self {
        match dialect {
            DialectArg::Postgresql => Dialect::Postgresql,
            DialectArg::Mysql => Dialect::Mysql,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let table_name = match cli.table {
        Some(table) => table,
        None => default_table_name(&cli.csv_file)?,
    };

    let mut config = GenerationConfig::new(table_name)
        .with_dialect(cli.dialect.into())
        .with_batch_size(cli.batch_size);
    if let Some(columns) = &cli.columns {
        config = config.with_column_mapping(ColumnMapping::parse(columns)?);
    }
    config.validate()?;

    info!("Generating {} SQL from {:?}", config.dialect, cli.csv_file);
    let generator = SQLGenerator::new(&cli.csv_file, config)?;
    let sql = generator.generate(cli.create_table, cli.dry_run);

    if let Some(schema_path) = &cli.schema_output {
        let schema_json = serde_json::to_string_pretty(generator.schema()).map_err(SqlSeedError::from)?;
        fs::write(schema_path, schema_json).map_err(SqlSeedError::from)?;
        info!("Schema written to {:?}", schema_path);
    }

    match &cli.output {
        Some(output_path) => {
            fs::write(output_path, &sql).map_err(SqlSeedError::from)?;
            eprintln!("SQL written to {}", output_path.display());
        }
        None => println!("{}", sql),
    }

    Ok(())
}

/// Table name derived from the CSV file name, e.g. `users` for `data/users.csv`
fn default_table_name(csv_file: &Path) -> Result<String, SqlSeedError> {
    csv_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            SqlSeedError::config(format!("Cannot derive a table name from {:?}", csv_file))
        })
}

/// Reject CSV paths that do not exist while parsing arguments
fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File '{}' does not exist.", value))
    }
}

/// Initialize logging based on CLI configuration.
///
/// Logs go to stderr so they never mix with SQL printed on stdout. Without an
/// explicit level, `RUST_LOG` is honored and the default is `warn`.
fn initialize_logging(cli: &Cli) -> Result<()> {
    let log_level = if let Some(level) = &cli.log_level {
        Some(Level::from(level.clone()))
    } else if cli.verbose {
        Some(Level::DEBUG)
    } else {
        None
    };

    let filter = match log_level {
        Some(level) => EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .parse_lossy(""),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(cli.verbose)
        .with_file(cli.verbose)
        .with_line_number(cli.verbose);

    let result = if cli.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
