//! Configuration loading from environment variables.
//!
//! All configuration values are loaded from `SNK_CORE_*` environment variables
//! with sensible defaults. Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `SNK_CORE_MAX_KEY_FILE_SIZE` | 65536 | Max key file size (bytes), 1024 to 16 MiB |
//! | `SNK_CORE_KEY_SEARCH_PATHS` | (empty) | Key file search directories (OS path list) |
//! | `SNK_CORE_LOG_LEVEL` | warn | Log filter directive |
//! | `SNK_CORE_LOG_FORMAT` | pretty | `json` or `pretty` |
//! | `SNK_CORE_LOG_FILE` | (stderr) | Log output file |

use std::path::PathBuf;

use serde::Serialize;

use crate::keys::{KeyConfig, DEFAULT_MAX_KEY_FILE_SIZE};
use crate::telemetry::{LogConfig, LogFormat};

/// Smallest accepted key file limit. Fits a 1024-bit key pair with room.
pub const MIN_KEY_FILE_SIZE: usize = 1024;

/// Largest accepted key file limit.
pub const MAX_KEY_FILE_SIZE: usize = 16 * 1024 * 1024;

/// Effective configuration summary (serializable).
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub max_key_file_size: usize,
    pub key_search_paths: Vec<String>,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<String>,
}

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub keys: KeyConfig,
    pub log: LogConfig,
}

/// Parse a `usize` env var, returning `default` on missing or invalid.
fn parse_usize(key: &str, default: usize) -> usize {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<usize>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Load key handling configuration from environment.
fn load_key_config() -> KeyConfig {
    let max_key_file_size = parse_usize("SNK_CORE_MAX_KEY_FILE_SIZE", DEFAULT_MAX_KEY_FILE_SIZE);
    let max_key_file_size = max_key_file_size.clamp(MIN_KEY_FILE_SIZE, MAX_KEY_FILE_SIZE);

    let search_paths = std::env::var_os("SNK_CORE_KEY_SEARCH_PATHS")
        .map(|paths| {
            std::env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default();

    KeyConfig {
        max_key_file_size,
        base_dir: std::env::current_dir().ok(),
        search_paths,
    }
}

/// Load logging configuration from environment.
fn load_log_config() -> LogConfig {
    let defaults = LogConfig::default();
    let level = std::env::var("SNK_CORE_LOG_LEVEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(defaults.level);
    let format = std::env::var("SNK_CORE_LOG_FORMAT")
        .ok()
        .and_then(|v| v.parse::<LogFormat>().ok())
        .unwrap_or(defaults.format);
    let output_path = std::env::var_os("SNK_CORE_LOG_FILE")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    LogConfig { format, level, output_path }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    EnvConfig {
        keys: load_key_config(),
        log: load_log_config(),
    }
}

impl EnvConfig {
    /// Return a serializable summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            max_key_file_size: self.keys.max_key_file_size,
            key_search_paths: self
                .keys
                .search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            log_level: self.log.level.clone(),
            log_format: self.log.format.as_str().to_string(),
            log_file: self.log.output_path.as_ref().map(|p| p.display().to_string()),
        }
    }
}
