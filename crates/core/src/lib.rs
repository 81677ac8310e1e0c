/// Core types shared by the contract bindings
pub mod config;
pub mod error;
pub mod logging;

pub use config::{BindingsConfig, ConfigError, LogFormat, LoggingConfig, ProviderConfig};
pub use error::{Error, Result};
