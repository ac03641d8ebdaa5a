//! Source index configuration.

use serde::{Deserialize, Serialize};

/// Where the static constant registry looks for Ruby definitions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directories (relative to the project root) scanned for `.rb` files.
    /// Default: `["app/models"]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<String>,
    /// Ignore patterns on top of `.gitignore`, in gitignore syntax.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl RegistryConfig {
    pub fn effective_roots(&self) -> Vec<String> {
        if self.roots.is_empty() {
            vec!["app/models".to_string()]
        } else {
            self.roots.clone()
        }
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
