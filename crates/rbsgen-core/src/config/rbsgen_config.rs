//! Top-level configuration, loaded from `rbsgen.toml` with env overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ExpansionConfig, ParserConfig, RegistryConfig};
use crate::errors::ConfigError;

/// File name looked up in the project root by [`RbsgenConfig::load`].
pub const CONFIG_FILE_NAME: &str = "rbsgen.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RbsgenConfig {
    pub parser: ParserConfig,
    pub registry: RegistryConfig,
    pub expansion: ExpansionConfig,
}

impl RbsgenConfig {
    /// Parse a config from TOML text. Environment overrides are not applied.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Load the config for a project.
    ///
    /// Reads `explicit` when given, else `<root>/rbsgen.toml` if it exists,
    /// else starts from defaults. `RBSGEN_*` environment variables are applied last.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let path = root.join(CONFIG_FILE_NAME);
                path.exists().then_some(path)
            }
        };

        let mut config = match candidate {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
                let config = Self::from_toml(&text)?;
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `RBSGEN_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(size) = env_parse::<u64>("RBSGEN_PARSER_MAX_FILE_SIZE")? {
            self.parser.max_file_size = Some(size);
        }
        if let Some(enabled) = env_parse::<bool>("RBSGEN_EXPANSION_ENABLED")? {
            self.expansion.enabled = Some(enabled);
        }
        if let Some(follow) = env_parse::<bool>("RBSGEN_REGISTRY_FOLLOW_SYMLINKS")? {
            self.registry.follow_symlinks = Some(follow);
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
