//! Start-up configuration for the profile search front end.
//!
//! Values are layered: built-in defaults, then the RON config file, then the
//! `PROFILE_SEARCH_BASE_URL` environment variable, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use profile_engine::ServiceSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "profile_search.ron";
pub const BASE_URL_ENV: &str = "PROFILE_SEARCH_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_LOG_FILE: &str = "./profile_search.log";

/// On-disk shape of the config file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: String,
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
    max_response_bytes: u64,
    log_destination: String,
    log_file: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_response_bytes: 1024 * 1024,
            log_destination: "file".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub log_destination: Option<LogDestination>,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Resolves the final configuration. `env_base_url` is the value of
    /// `PROFILE_SEARCH_BASE_URL`, if set.
    pub fn resolve(overrides: &Overrides, env_base_url: Option<String>) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => load_file(path)?
                .ok_or_else(|| anyhow!("Config file not found: {}", path.display()))?,
            None => load_file(Path::new(DEFAULT_CONFIG_FILENAME))?.unwrap_or_default(),
        };

        let log_destination = match overrides.log_destination {
            Some(destination) => destination,
            None => LogDestination::parse(&file.log_destination).ok_or_else(|| {
                anyhow!(
                    "Invalid log_destination '{}' (expected file, terminal or both)",
                    file.log_destination
                )
            })?,
        };

        let base_url = overrides
            .base_url
            .clone()
            .or(env_base_url.filter(|value| !value.trim().is_empty()))
            .unwrap_or(file.base_url);

        ensure_positive("connect_timeout_secs", file.connect_timeout_secs)?;
        ensure_positive("request_timeout_secs", file.request_timeout_secs)?;
        ensure_positive("max_response_bytes", file.max_response_bytes)?;

        let config = Self {
            base_url,
            connect_timeout: Duration::from_secs(file.connect_timeout_secs),
            request_timeout: Duration::from_secs(file.request_timeout_secs),
            max_response_bytes: file.max_response_bytes,
            log_destination,
            log_level: if overrides.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            log_file: file.log_file,
        };
        // Fail at start-up rather than on the first lookup.
        config.service_settings()?;
        Ok(config)
    }

    pub fn service_settings(&self) -> Result<ServiceSettings> {
        let mut settings = ServiceSettings::parse(&self.base_url)
            .with_context(|| format!("Invalid service base url '{}'", self.base_url))?;
        settings.connect_timeout = self.connect_timeout;
        settings.request_timeout = self.request_timeout;
        settings.max_response_bytes = self.max_response_bytes;
        Ok(settings)
    }
}

fn ensure_positive(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        bail!("Invalid {field}: must be greater than zero");
    }
    Ok(())
}

fn load_file(path: &Path) -> Result<Option<ConfigFile>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let file: ConfigFile = ron::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    engine_info!("Loaded config from {:?}", path);
    Ok(Some(file))
}
