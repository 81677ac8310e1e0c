//! Configuration for the contract bindings tooling

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    /// Node connection settings
    pub provider: ProviderConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Binding generator settings
    pub codegen: CodegenConfig,
}

/// Node connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// RPC URL of the Ethereum node
    pub rpc_url: String,
    /// Whether to connect over websocket
    pub use_websocket: bool,
    /// Expected chain id, checked on connect when set
    pub chain_id: Option<u64>,
    /// Polling interval for log filters, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            use_websocket: false,
            chain_id: None,
            poll_interval_ms: 1000,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Binding generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Output directory for generated bindings
    pub output_dir: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            output_dir: "./generated".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing RPC URL")]
    MissingRpcUrl,
    #[error("Invalid RPC URL '{url}': expected http(s):// or ws(s)://")]
    InvalidRpcUrl { url: String },
    #[error("RPC URL '{url}' does not match use_websocket = {use_websocket}")]
    TransportMismatch { url: String, use_websocket: bool },
    #[error("Invalid poll interval: must be greater than 0")]
    InvalidPollInterval,
    #[error("Unsupported configuration file format: {path}. Supported formats: .toml, .json")]
    UnsupportedFormat { path: PathBuf },
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Invalid value for {key}: '{value}'")]
    InvalidOverride { key: String, value: String },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err.to_string())
    }
}

impl BindingsConfig {
    /// Load configuration from a `.toml` or `.json` file and apply environment overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: BindingsConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply `BINDINGS_*` environment variable overrides
    pub fn apply_environment_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rpc_url) = lookup("BINDINGS_RPC_URL") {
            self.provider.rpc_url = rpc_url;
        }
        if let Some(value) = lookup("BINDINGS_USE_WEBSOCKET") {
            self.provider.use_websocket = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        key: "BINDINGS_USE_WEBSOCKET".to_string(),
                        value,
                    })
                }
            };
        }
        if let Some(level) = lookup("BINDINGS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(value) = lookup("BINDINGS_LOG_FORMAT") {
            self.logging.format = match value.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        key: "BINDINGS_LOG_FORMAT".to_string(),
                        value,
                    })
                }
            };
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.validate()
    }
}

impl ProviderConfig {
    /// Check the RPC endpoint and polling settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.rpc_url;
        if url.is_empty() {
            return Err(ConfigError::MissingRpcUrl);
        }

        let is_http = url.starts_with("http://") || url.starts_with("https://");
        let is_ws = url.starts_with("ws://") || url.starts_with("wss://");
        if !is_http && !is_ws {
            return Err(ConfigError::InvalidRpcUrl { url: url.clone() });
        }
        if is_ws != self.use_websocket {
            return Err(ConfigError::TransportMismatch {
                url: url.clone(),
                use_websocket: self.use_websocket,
            });
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
