use std::io;
use thiserror::Error;

/// Errors raised while loading or validating flight configuration.
///
/// Configuration is the only fallible surface of the crate: the flight model
/// itself never fails at run time, it degrades instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid flight configuration: {0}")]
    ValidationError(String),
}
