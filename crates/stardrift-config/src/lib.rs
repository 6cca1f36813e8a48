//! Configuration file handling for stardrift.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file means defaults; any field may be omitted.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use stardrift_core::Tuning;
use thiserror::Error;
use tracing::debug;

/// Application name used for platform directories.
const APP_NAME: &str = "stardrift";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Frame rate bounds accepted from configuration.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write a log file at all.
    pub enabled: bool,
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Directory for log files; platform data dir when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LogConfig {
    /// Directory log files go to.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .or_else(|| ProjectDirs::from("", "", APP_NAME).map(|d| d.data_local_dir().join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target frames per second.
    pub fps: u32,
    /// Accent color for shooting star trails, e.g. `"350 100% 88%"`.
    pub accent: Option<String>,
    /// Starfield tuning.
    pub tuning: Tuning,
    /// Logging.
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            accent: None,
            tuning: Tuning::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text and sanitize the result.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(contents)?;
        Ok(config.sanitized())
    }

    /// Clamp values into usable ranges.
    pub fn sanitized(self) -> Self {
        Self {
            fps: self.fps.clamp(MIN_FPS, MAX_FPS),
            tuning: self.tuning.sanitized(),
            ..self
        }
    }
}
