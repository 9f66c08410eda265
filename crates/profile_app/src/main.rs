//! Terminal front end for searching professional-network profiles.
//!
//! ```bash
//! profile-search --base-url http://localhost:8000
//! PROFILE_SEARCH_BASE_URL=http://search.internal profile-search --log both -v
//! ```

mod platform;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use engine_logging::LogDestination;

use platform::config::{AppConfig, Overrides, BASE_URL_ENV, DEFAULT_CONFIG_FILENAME};

/// Search a student's LinkedIn profile by name, university and degree status.
#[derive(Parser)]
#[command(name = "profile-search", version, about)]
struct Cli {
    /// Base url of the profile service (overrides config and environment)
    #[arg(long)]
    base_url: Option<String>,

    /// RON config file (default: ./profile_search.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write logs: file, terminal or both
    #[arg(long, value_parser = parse_destination)]
    log: Option<LogDestination>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_destination(raw: &str) -> Result<LogDestination, String> {
    LogDestination::parse(raw)
        .ok_or_else(|| format!("expected file, terminal or both, got '{raw}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = Overrides {
        config_path: cli.config,
        base_url: cli.base_url,
        log_destination: cli.log,
        verbose: cli.verbose,
    };
    let config = AppConfig::resolve(&overrides, std::env::var(BASE_URL_ENV).ok())?;
    log_config_source(&overrides);
    platform::run_app(config)
}

fn log_config_source(overrides: &Overrides) {
    if overrides.config_path.is_none() && !PathBuf::from(DEFAULT_CONFIG_FILENAME).exists() {
        eprintln!("No {DEFAULT_CONFIG_FILENAME} found; using built-in defaults.");
    }
}
