//! Configuration loading errors.

use std::path::PathBuf;

use super::error_code::{self, RbsgenErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl RbsgenErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TomlParse(_) => error_code::CONFIG_PARSE_ERROR,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::TomlSerialize(_) | Self::InvalidValue { .. } => error_code::CONFIG_ERROR,
        }
    }
}
