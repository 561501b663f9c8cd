//! Catalog of patterns and source fields for the command-line front end
//!
//! A catalog is a JSON document listing pattern definitions and source field
//! registrations. Hosts embedding the library use their own registries; the
//! catalog only backs the static ones.

use anyhow::{Context, Result};
use log::info;
use pattern_mapping_core::{
    SourceRegistration, StaticPatternRegistry, StaticSourceRegistry,
};
use pattern_mapping_types::{PatternDefinition, SourceField};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Patterns and source fields known to the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub patterns: Vec<PatternDefinition>,
    #[serde(default)]
    pub sources: Vec<SourceRegistration>,
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .with_context(|| format!("Invalid catalog {}", path.display()))?;
        info!(
            "Loaded catalog {}: {} patterns, {} source fields",
            path.display(),
            catalog.patterns.len(),
            catalog.sources.len()
        );
        Ok(catalog)
    }

    /// Small built-in catalog used when none is configured
    pub fn builtin() -> Self {
        let tag = "entity_display";
        let field = |plugin: &str, name: &str, label: &str, plugin_label: &str| SourceRegistration {
            tag: tag.to_string(),
            field: SourceField::new(plugin, name, label, plugin_label),
            requires: HashMap::new(),
        };

        Self {
            patterns: vec![
                PatternDefinition::new("card", "Card")
                    .with_field("heading", "Heading")
                    .with_field("subheading", "Sub heading")
                    .with_field("body", "Body")
                    .with_variant("default", "Default")
                    .with_variant("highlight", "Highlight"),
                PatternDefinition::new("hero", "Hero")
                    .with_field("image", "Image")
                    .with_field("title", "Title"),
            ],
            sources: vec![
                field("fields", "title", "Title", "Fields"),
                field("fields", "body", "Body", "Fields"),
                field("fields", "image", "Image", "Fields"),
                field("extra_fields", "links", "Links", "Extra fields"),
            ],
        }
    }

    /// Build the pattern registry described by this catalog
    pub fn pattern_registry(&self) -> StaticPatternRegistry {
        self.patterns.iter().cloned().collect()
    }

    /// Build the source registry described by this catalog
    pub fn source_registry(&self) -> StaticSourceRegistry {
        self.sources.iter().cloned().collect()
    }
}
