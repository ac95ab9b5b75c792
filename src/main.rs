//! student-records: a console application for managing student records.
//!
//! Records live in a JSON file that is loaded at startup and rewritten after
//! every change. All interaction happens through a numbered menu on stdin/stdout.

mod app;
mod cli;
mod data;
mod ui;

use anyhow::Result;
use cli::{AppConfig, Cli};
use log::LevelFilter;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    let config = AppConfig::from_cli(cli);

    init_logging(config.verbose);

    app::run(config)
}

/// Log to stderr. Quiet by default so the menu stays readable; `RUST_LOG` overrides.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();

    if let Err(err) = result {
        eprintln!("logging disabled: {err}");
    }
}
