//! Configuration loading from config.toml.
//!
//! A single source of truth for server settings, loaded from config.toml
//! with environment variable overrides. Missing files and fields fall back
//! to built-in defaults, so the binary runs unconfigured.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Root configuration structure matching config.toml.
#[derive(Debug, Deserialize, Default)]
pub struct CentralConfig {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    /// Wall-clock budget per decision, in milliseconds.
    #[serde(default = "default_think_time_ms")]
    pub think_time_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            think_time_ms: default_think_time_ms(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_think_time_ms() -> u64 {
    1500
}

/// Standard locations to search for config.toml.
const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from web/)
];

/// Load the central configuration from config.toml.
fn load_config_internal() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("TEN_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from TEN_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "TEN_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    CentralConfig::default()
}

fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                CentralConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            CentralConfig::default()
        }
    }
}

// Lazy-loaded global config
static CONFIG: Lazy<CentralConfig> = Lazy::new(load_config_internal);

/// Get the web server host, checking env var first then config.toml.
pub fn get_host() -> String {
    std::env::var("TEN_HOST").unwrap_or_else(|_| CONFIG.web.host.clone())
}

/// Get the web server port.
pub fn get_port() -> u16 {
    std::env::var("TEN_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(CONFIG.web.port)
}

/// Get the per-decision think time.
pub fn get_think_time() -> Duration {
    let ms = std::env::var("TEN_THINK_TIME_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(CONFIG.engine.think_time_ms);
    Duration::from_millis(ms)
}
