//! Client settings, read from `feedctl.ron` in the working directory.
//!
//! Only the client itself is configured here. The conversion profile is never
//! written to or read from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feedctl_engine::{ClientSettings, ControlError, DEFAULT_BASE_URL};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const SETTINGS_FILENAME: &str = "feedctl.ron";
pub const BACKEND_URL_ENV: &str = "FEEDCTL_BACKEND_URL";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid backend address: {0}")]
    Backend(#[from] ControlError),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub backend_url: String,
    pub connect_timeout_secs: u64,
    /// No overall timeout unless set.
    pub request_timeout_secs: Option<u64>,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            log_file: Some(PathBuf::from("./feedctl.log")),
            log_level: "info".to_string(),
        }
    }
}

impl AppSettings {
    /// Settings from the working directory plus the environment override.
    pub fn load() -> Result<Self, SettingsError> {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let settings = Self::load_from(&dir)?;
        Ok(settings.with_backend_override(std::env::var(BACKEND_URL_ENV).ok()))
    }

    /// Reads `feedctl.ron` from `dir`. A missing file yields defaults.
    pub fn load_from(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        ron::from_str(&content).map_err(|source| SettingsError::Parse { path, source })
    }

    pub fn with_backend_override(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url.filter(|url| !url.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn client_settings(&self) -> Result<ClientSettings, SettingsError> {
        let mut settings = ClientSettings::new(&self.backend_url)?;
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        Ok(settings)
    }

    pub fn log_level(&self) -> Result<LevelFilter, SettingsError> {
        self.log_level
            .parse()
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::File(path.clone()),
            None => LogDestination::Disabled,
        }
    }
}
