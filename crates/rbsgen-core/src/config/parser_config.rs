//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default size limit for a single Ruby source file: 1MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Configuration for the Ruby parser front end.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum source file size in bytes. Default: 1MB (1_048_576).
    pub max_file_size: Option<u64>,
}

impl ParserConfig {
    /// Returns the effective max file size, defaulting to 1MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}
