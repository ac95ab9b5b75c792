//! Command-line interface argument parsing for student-records.
//!
//! Running without arguments keeps records in `./students.json`:
//! - `student-records`
//! - `student-records --file /path/to/records.json`
//! - `STUDENT_RECORDS_FILE=records.json student-records --verbose`

use std::path::PathBuf;

use clap::Parser;

/// Default backing file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Environment variable consulted when `--file` is not given
pub const DATA_FILE_ENV: &str = "STUDENT_RECORDS_FILE";

/// An interactive console for adding, viewing, updating and deleting student records.
#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON file holding the records
    /// Defaults to $STUDENT_RECORDS_FILE, then ./students.json
    #[arg(short, long)]
    pub file: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub verbose: bool,
    pub color: bool,
}

impl AppConfig {
    /// Create AppConfig from parsed arguments and the process environment
    pub fn from_cli(cli: Cli) -> Self {
        let env_file = std::env::var(DATA_FILE_ENV).ok();
        AppConfig {
            data_file: resolve_data_file(cli.file, env_file),
            verbose: cli.verbose,
            color: !cli.no_color,
        }
    }
}

/// `--file` wins over the environment, which wins over the default. Blank values are ignored.
fn resolve_data_file(flag: Option<String>, env: Option<String>) -> PathBuf {
    [flag, env]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
