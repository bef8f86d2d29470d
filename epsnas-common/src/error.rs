//! Error types for the NAS-EPS decoder workspace

use thiserror::Error;

/// Error types shared by the decoder crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid ciphering key.
    #[error("Invalid decipher key: {0}")]
    InvalidKey(String),

    /// I/O errors (configuration files, capture input).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
