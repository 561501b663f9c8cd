//! Registries of patterns and source fields.
//!
//! The form builder never reaches for a global: both registries are passed
//! in explicitly. Hosts implement the traits over their own plugin systems;
//! the static registries below cover built-in catalogs and tests.

use indexmap::IndexMap;
use log::{debug, warn};
use pattern_mapping_types::{PatternDefinition, SourceField};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Context values a source registry filters on (e.g., entity type, bundle)
pub type SourceContext = HashMap<String, String>;

/// Trait for pattern providers
pub trait PatternRegistry: Send + Sync {
    /// All known pattern definitions, in registry order
    fn definitions(&self) -> Vec<PatternDefinition>;

    /// Get a single definition by ID
    fn definition(&self, id: &str) -> Option<PatternDefinition> {
        self.definitions().into_iter().find(|d| d.id == id)
    }

    /// Patterns as (id, label) select options
    fn pattern_options(&self) -> Vec<(String, String)> {
        self.definitions()
            .into_iter()
            .map(|d| (d.id, d.label))
            .collect()
    }

    /// Slots of a pattern as (name, label) options; empty for unknown IDs
    fn slot_options(&self, id: &str) -> Vec<(String, String)> {
        self.definition(id)
            .map(|d| d.field_options())
            .unwrap_or_default()
    }

    /// Variants of a pattern as (name, label) options; empty for unknown IDs
    fn variant_options(&self, id: &str) -> Vec<(String, String)> {
        self.definition(id)
            .map(|d| d.variant_options())
            .unwrap_or_default()
    }
}

/// Trait for source field providers
pub trait SourceRegistry: Send + Sync {
    /// Fields available for a tag (e.g., "entity_display") in a context
    fn fields(&self, tag: &str, context: &SourceContext) -> Vec<SourceField>;
}

/// Pattern registry backed by an ordered map
#[derive(Debug, Clone, Default)]
pub struct StaticPatternRegistry {
    patterns: IndexMap<String, PatternDefinition>,
}

impl StaticPatternRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern, replacing any previous definition with the same ID
    pub fn register(&mut self, definition: PatternDefinition) {
        if self.patterns.contains_key(&definition.id) {
            warn!("Replacing pattern definition '{}'", definition.id);
        }
        self.patterns.insert(definition.id.clone(), definition);
    }

    /// List all registered pattern IDs
    pub fn list_patterns(&self) -> Vec<String> {
        self.patterns.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<PatternDefinition> for StaticPatternRegistry {
    fn from_iter<I: IntoIterator<Item = PatternDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.register(definition);
        }
        registry
    }
}

impl PatternRegistry for StaticPatternRegistry {
    fn definitions(&self) -> Vec<PatternDefinition> {
        self.patterns.values().cloned().collect()
    }

    fn definition(&self, id: &str) -> Option<PatternDefinition> {
        self.patterns.get(id).cloned()
    }
}

/// A source field registered under a tag, with the context it requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRegistration {
    pub tag: String,
    #[serde(flatten)]
    pub field: SourceField,
    /// Context values that must all match for the field to be offered
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub requires: HashMap<String, String>,
}

impl SourceRegistration {
    fn matches(&self, tag: &str, context: &SourceContext) -> bool {
        self.tag == tag
            && self
                .requires
                .iter()
                .all(|(k, v)| context.get(k).is_some_and(|c| c == v))
    }
}

/// Source registry backed by a list of registrations
#[derive(Debug, Clone, Default)]
pub struct StaticSourceRegistry {
    registrations: Vec<SourceRegistration>,
}

impl StaticSourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field offered for `tag` in every context
    pub fn register(&mut self, tag: &str, field: SourceField) {
        self.register_with_context(tag, field, HashMap::new());
    }

    /// Register a field offered for `tag` only when `requires` matches
    pub fn register_with_context(
        &mut self,
        tag: &str,
        field: SourceField,
        requires: HashMap<String, String>,
    ) {
        self.registrations.push(SourceRegistration {
            tag: tag.to_string(),
            field,
            requires,
        });
    }

    /// List all distinct tags, in registration order
    pub fn list_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for registration in &self.registrations {
            if !tags.contains(&registration.tag) {
                tags.push(registration.tag.clone());
            }
        }
        tags
    }
}

impl FromIterator<SourceRegistration> for StaticSourceRegistry {
    fn from_iter<I: IntoIterator<Item = SourceRegistration>>(iter: I) -> Self {
        Self {
            registrations: iter.into_iter().collect(),
        }
    }
}

impl SourceRegistry for StaticSourceRegistry {
    fn fields(&self, tag: &str, context: &SourceContext) -> Vec<SourceField> {
        let fields: Vec<SourceField> = self
            .registrations
            .iter()
            .filter(|r| r.matches(tag, context))
            .map(|r| r.field.clone())
            .collect();
        debug!("{} source fields for tag '{}'", fields.len(), tag);
        fields
    }
}
