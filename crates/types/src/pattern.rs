//! Pattern definitions: reusable display templates with named slots

use serde::{Deserialize, Serialize};

/// A named insertion point within a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternField {
    /// Slot machine name, used as the mapping destination
    pub name: String,
    /// Human-readable label
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An alternative rendering of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternVariant {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A reusable display template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Unique identifier for this pattern
    pub id: String,
    /// Human-readable name
    pub label: String,
    /// Slots, in declaration order
    #[serde(default)]
    pub fields: Vec<PatternField>,
    /// Variants, in declaration order
    #[serde(default)]
    pub variants: Vec<PatternVariant>,
}

impl PatternDefinition {
    /// Create a pattern with no slots or variants
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fields: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// Builder-style slot addition
    pub fn with_field(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.fields.push(PatternField {
            name: name.into(),
            label: label.into(),
            description: None,
        });
        self
    }

    /// Builder-style variant addition
    pub fn with_variant(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.variants.push(PatternVariant {
            name: name.into(),
            label: label.into(),
            description: None,
        });
        self
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Slots as (name, label) select options
    pub fn field_options(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.label.clone()))
            .collect()
    }

    /// Variants as (name, label) select options
    pub fn variant_options(&self) -> Vec<(String, String)> {
        self.variants
            .iter()
            .map(|v| (v.name.clone(), v.label.clone()))
            .collect()
    }
}
