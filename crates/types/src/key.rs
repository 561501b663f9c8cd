//! Composite source keys and the sentinels used at the form boundary.
//!
//! In memory a source field is identified by a [`SourceKey`] pair. Only when
//! it crosses the form or storage boundary is it flattened into the
//! `plugin<separator>source` string used as a mapping key.

use serde::{Deserialize, Serialize};

/// Default separator between plugin ID and source name
pub const DEFAULT_SEPARATOR: &str = ":";

/// Default destination value meaning "do not map this field"
pub const DEFAULT_HIDDEN_DESTINATION: &str = "_hidden";

/// Default value of the pattern selector when nothing is chosen
pub const DEFAULT_EMPTY_PATTERN: &str = "_none";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_hidden() -> String {
    DEFAULT_HIDDEN_DESTINATION.to_string()
}

fn default_empty_pattern() -> String {
    DEFAULT_EMPTY_PATTERN.to_string()
}

/// Encoding rules shared by the form builder, normalizer and lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingFormat {
    /// Separator between plugin ID and source name in composite keys
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Destination value for fields that are not mapped
    #[serde(default = "default_hidden")]
    pub hidden_destination: String,
    /// Pattern selector value meaning "no pattern"
    #[serde(default = "default_empty_pattern")]
    pub empty_pattern: String,
}

impl Default for MappingFormat {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            hidden_destination: default_hidden(),
            empty_pattern: default_empty_pattern(),
        }
    }
}

impl MappingFormat {
    /// Format using a custom separator and the default sentinels
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Default::default()
        }
    }

    /// Whether a destination is the hidden sentinel
    pub fn is_hidden(&self, destination: &str) -> bool {
        destination == self.hidden_destination
    }

    /// Whether a pattern selector value actually selects a pattern
    pub fn is_pattern_selected(&self, pattern: &str) -> bool {
        !pattern.is_empty() && pattern != self.empty_pattern
    }
}

/// A source field identity: owning plugin plus source name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceKey {
    pub plugin: String,
    pub source: String,
}

impl SourceKey {
    pub fn new(plugin: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            source: source.into(),
        }
    }

    /// Flatten into the `plugin<separator>source` boundary form
    pub fn to_key_string(&self, separator: &str) -> String {
        format!("{}{}{}", self.plugin, separator, self.source)
    }

    /// Split a boundary key into exactly one plugin part and one source part.
    ///
    /// Returns `None` when the separator is empty, absent, occurs more than
    /// once, or leaves either side empty. Ambiguous splits are never guessed.
    pub fn split(key: &str, separator: &str) -> Option<Self> {
        if separator.is_empty() {
            return None;
        }
        let mut parts = key.split(separator);
        let plugin = parts.next()?;
        let source = parts.next()?;
        if parts.next().is_some() || plugin.is_empty() || source.is_empty() {
            return None;
        }
        Some(Self::new(plugin, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_two_parts() {
        let key = SourceKey::split("text.title", ".").unwrap();
        assert_eq!(key.plugin, "text");
        assert_eq!(key.source, "title");
        assert_eq!(key.to_key_string("."), "text.title");
    }

    #[test]
    fn test_split_rejects_wrong_arity() {
        assert!(SourceKey::split("title", ":").is_none());
        assert!(SourceKey::split("a:b:c", ":").is_none());
        assert!(SourceKey::split(":title", ":").is_none());
        assert!(SourceKey::split("text:", ":").is_none());
        assert!(SourceKey::split("text:title", "").is_none());
    }

    #[test]
    fn test_multi_char_separator() {
        let key = SourceKey::split("fields::body", "::").unwrap();
        assert_eq!(key, SourceKey::new("fields", "body"));
        assert!(SourceKey::split("fields:body", "::").is_none());
    }

    #[test]
    fn test_format_defaults_fill_missing_fields() {
        let format: MappingFormat = serde_json::from_str(r#"{"separator":"."}"#).unwrap();
        assert_eq!(format.separator, ".");
        assert_eq!(format.hidden_destination, "_hidden");
        assert!(format.is_hidden("_hidden"));
        assert!(!format.is_pattern_selected("_none"));
        assert!(!format.is_pattern_selected(""));
        assert!(format.is_pattern_selected("card"));
    }
}
