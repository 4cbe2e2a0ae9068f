//! Configuration loading
//!
//! Bootstrap configuration comes from a single TOML file with three
//! sections:
//!
//! ```toml
//! [app]
//! port = 8000
//! logdir = "logs/"
//!
//! [database]
//! path = "data/movies.db"
//!
//! [settings]
//! defaultyear = 2016
//! filesizekb = 2048
//! ```
//!
//! Every section and key is optional. A missing file is not an error;
//! [`TomlConfig::load`] reports it so the caller can fall back to defaults
//! once logging is up. A file that exists but cannot be parsed is a
//! configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "data/config.toml";

/// Name of the log file created inside `app.logdir`
pub const LOG_FILE_NAME: &str = "imdb-restapi.log";

/// Smallest upload limit ever applied, regardless of `settings.filesizekb`
pub const MIN_UPLOAD_BYTES: u64 = 2048 * 1024;

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub settings: Settings,
}

/// `[app]` section: HTTP listener and logging
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `imdb-restapi.log` (empty = working directory)
    #[serde(default)]
    pub logdir: PathBuf,

    /// Endpoint description document served by `GET /endpoints`
    #[serde(default = "default_endpoints_file")]
    pub endpoints_file: PathBuf,
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file, created if missing
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// `[settings]` section: runtime behaviour of the movie endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Year queried when `/movies` is called without any year filter
    #[serde(rename = "defaultyear", default = "default_year")]
    pub default_year: i32,

    /// Configured upload limit in KB (see [`Settings::max_upload_bytes`])
    #[serde(rename = "filesizekb", default = "default_file_size_kb")]
    pub file_size_kb: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_endpoints_file() -> PathBuf {
    PathBuf::from("data/swagger.yaml")
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/movies.db")
}

fn default_year() -> i32 {
    2016
}

fn default_file_size_kb() -> u64 {
    2048
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logdir: PathBuf::new(),
            endpoints_file: default_endpoints_file(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_year: default_year(),
            file_size_kb: default_file_size_kb(),
        }
    }
}

impl Settings {
    /// Effective upload limit in bytes: the larger of 2 MiB and `filesizekb`
    pub fn max_upload_bytes(&self) -> u64 {
        MIN_UPLOAD_BYTES.max(self.file_size_kb.saturating_mul(1024))
    }
}

impl AppConfig {
    /// Full path of the log file
    pub fn log_file(&self) -> PathBuf {
        self.logdir.join(LOG_FILE_NAME)
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from `path`
    ///
    /// Returns `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_upload_bytes_has_two_mib_floor() {
        let settings = Settings {
            default_year: 2016,
            file_size_kb: 10,
        };
        assert_eq!(settings.max_upload_bytes(), 2048 * 1024);
    }

    #[test]
    fn test_max_upload_bytes_uses_larger_configured_value() {
        let settings = Settings {
            default_year: 2016,
            file_size_kb: 4096,
        };
        assert_eq!(settings.max_upload_bytes(), 4096 * 1024);
    }

    #[test]
    fn test_log_file_joins_logdir() {
        let app = AppConfig {
            logdir: PathBuf::from("/var/log/imdb"),
            ..AppConfig::default()
        };
        assert_eq!(app.log_file(), PathBuf::from("/var/log/imdb/imdb-restapi.log"));
    }

    #[test]
    fn test_bind_addr() {
        let app = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..AppConfig::default()
        };
        assert_eq!(app.bind_addr(), "127.0.0.1:9000");
    }
}
