//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument / environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the service logs a warning and
//! continues with defaults. Provider credentials have no default and must come
//! from one of the tiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "TUNESIFT_CONFIG";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/callback";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// On-disk TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Socket address the web server binds to
    pub bind_addr: Option<String>,
    /// Timeout applied to every provider request
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[spotify]` section: OAuth application credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Values supplied on the command line (clap folds environment variables in)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge command-line overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml: TomlConfig) -> Result<Self> {
        let client_id = overrides
            .client_id
            .or(toml.spotify.client_id)
            .filter(|v| is_valid_key(v))
            .ok_or_else(|| missing_credential("client_id", "TUNESIFT_CLIENT_ID"))?;

        let client_secret = overrides
            .client_secret
            .or(toml.spotify.client_secret)
            .filter(|v| is_valid_key(v))
            .ok_or_else(|| missing_credential("client_secret", "TUNESIFT_CLIENT_SECRET"))?;

        let timeout_secs = overrides
            .request_timeout_secs
            .or(toml.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            bind_addr: overrides
                .bind_addr
                .or(toml.bind_addr)
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            client_id,
            client_secret,
            redirect_uri: overrides
                .redirect_uri
                .or(toml.spotify.redirect_uri)
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: overrides.log_level.unwrap_or(toml.logging.level),
        })
    }
}

fn missing_credential(key: &str, env_var: &str) -> Error {
    Error::Config(format!(
        "Spotify {key} not configured. Please configure using one of:\n\
         1. Command line: --{flag}\n\
         2. Environment: {env_var}=...\n\
         3. TOML config: [spotify] {key} = \"...\"",
        key = key,
        flag = key.replace('_', "-"),
        env_var = env_var,
    ))
}

/// Validate credential (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Locate the config file: CLI path, then `TUNESIFT_CONFIG`, then the
/// platform config directory (`~/.config/tunesift/config.toml` on Linux)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("tunesift").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Load the config file if present.
///
/// A missing file falls back to defaults; a file that exists but does not
/// parse is an error.
pub fn load_or_default(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        warn!("No config directory available, using default configuration");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(
            "Config file not found at {}, using default configuration",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let config = load_toml_config(path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
