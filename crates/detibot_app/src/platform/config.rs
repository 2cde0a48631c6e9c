//! Application configuration read from a RON file, with environment overrides.
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use detibot_engine::BackendSettings;
use detibot_logging::{parse_level, LevelFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const BACKEND_URL_VAR: &str = "DETIBOT_BACKEND_URL";
pub const LOG_LEVEL_VAR: &str = "DETIBOT_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub connect_timeout_ms: u64,
    /// `None` waits for the backend indefinitely.
    pub request_timeout_ms: Option<u64>,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            backend_url: backend.base_url,
            connect_timeout_ms: duration_ms(backend.connect_timeout),
            request_timeout_ms: backend.request_timeout.map(duration_ms),
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            log_file: PathBuf::from("./detibot.log"),
        }
    }
}

impl AppConfig {
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }

    /// `None` for an unknown level name; the caller falls back to `Info` and
    /// reports it once a logger is installed.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        parse_level(&self.log_level)
    }

    /// Applies `DETIBOT_*` overrides; `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_VAR).filter(|value| !value.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        if let Some(level) = lookup(LOG_LEVEL_VAR).filter(|value| !value.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
