//! Pattern display mapping bound to a pair of registries

use anyhow::{Context, Result};
use log::{debug, warn};
use pattern_mapping_core::{
    build_pattern_display_form, destination, normalize, PatternRegistry, SourceContext,
    SourceRegistry,
};
use pattern_mapping_types::{FormTree, MappingFormat, PatternDisplaySettings};
use std::path::Path;

/// Form building, normalization and lookup over one set of registries
pub struct PatternDisplay {
    patterns: Box<dyn PatternRegistry>,
    sources: Box<dyn SourceRegistry>,
    format: MappingFormat,
}

impl PatternDisplay {
    pub fn new(
        patterns: Box<dyn PatternRegistry>,
        sources: Box<dyn SourceRegistry>,
        format: MappingFormat,
    ) -> Self {
        Self {
            patterns,
            sources,
            format,
        }
    }

    pub fn format(&self) -> &MappingFormat {
        &self.format
    }

    /// Build the mapping form for a tag and context
    pub fn form(
        &self,
        tag: &str,
        context: &SourceContext,
        current: &PatternDisplaySettings,
    ) -> FormTree {
        build_pattern_display_form(
            self.patterns.as_ref(),
            self.sources.as_ref(),
            tag,
            context,
            current,
            &self.format,
        )
    }

    /// Normalize a submission, reporting a malformed key as a validation failure
    pub fn normalize(&self, submitted: &PatternDisplaySettings) -> Result<PatternDisplaySettings> {
        let normalized = normalize(submitted, &self.format)
            .context("Submitted pattern mapping failed validation")?;

        if let Some(pattern) = normalized.selected_pattern(&self.format) {
            match self.patterns.definition(pattern) {
                Some(definition) => {
                    for (key, entry) in normalized.mapped_entries() {
                        if !definition.has_field(&entry.destination) {
                            warn!(
                                "Source '{}' mapped to unknown slot '{}' of pattern '{}'",
                                key, entry.destination, pattern
                            );
                        }
                    }
                }
                None => warn!("Selected pattern '{}' is not registered", pattern),
            }
        }
        Ok(normalized)
    }

    /// Destination slot of a (plugin, source) pair in normalized settings
    pub fn destination<'a>(
        &self,
        plugin: &str,
        source: &str,
        settings: &'a PatternDisplaySettings,
    ) -> Option<&'a str> {
        destination(plugin, source, settings, &self.format)
    }
}

/// Read submitted or stored settings from a JSON file
pub fn load_settings(path: &Path) -> Result<PatternDisplaySettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    let settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings {}", path.display()))?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Parse a `key=value` context argument
pub fn parse_context_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected format: KEY=VALUE, got: {}", s))?;
    if key.trim().is_empty() {
        return Err(format!("Empty context key in: {}", s));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
