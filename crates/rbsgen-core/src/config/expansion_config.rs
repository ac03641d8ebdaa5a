//! Include expansion configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONCERN_MARKER: &str = "ActiveSupport::Concern";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Splice `included do ... end` bodies in place of `include` calls. Default: true.
    pub enabled: Option<bool>,
    /// Modules whose `extend` marks a module as a concern.
    /// Default: `["ActiveSupport::Concern"]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concern_markers: Vec<String>,
}

impl ExpansionConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Configured markers with any leading `::` removed.
    pub fn effective_concern_markers(&self) -> Vec<String> {
        if self.concern_markers.is_empty() {
            return vec![DEFAULT_CONCERN_MARKER.to_string()];
        }
        self.concern_markers
            .iter()
            .map(|m| m.trim_start_matches("::").to_string())
            .collect()
    }
}
