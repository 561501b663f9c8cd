//! Source field metadata for describing what source plugins provide

use crate::key::SourceKey;
use serde::{Deserialize, Serialize};

/// Metadata describing a single source field offered as mapping input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceField {
    /// ID of the plugin that owns this field (e.g., "fields", "extra_fields")
    pub plugin: String,
    /// Field name, unique within its plugin
    pub name: String,
    /// Human-readable field label
    pub label: String,
    /// Human-readable label of the owning plugin
    #[serde(default)]
    pub plugin_label: String,
}

impl SourceField {
    /// Create a new source field
    pub fn new(
        plugin: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
        plugin_label: impl Into<String>,
    ) -> Self {
        Self {
            plugin: plugin.into(),
            name: name.into(),
            label: label.into(),
            plugin_label: plugin_label.into(),
        }
    }

    /// The (plugin, source) pair identifying this field across plugins
    pub fn key(&self) -> SourceKey {
        SourceKey::new(self.plugin.clone(), self.name.clone())
    }
}
