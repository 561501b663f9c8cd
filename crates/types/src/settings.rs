//! Pattern display settings: the raw form submission and its normalized form.
//!
//! The same structure carries both shapes. A raw submission nests mapping
//! rows under `pattern_mapping[<pattern>][settings][<key>]`; once normalized,
//! the rows sit directly under `pattern_mapping[<key>]`.

use crate::key::{MappingFormat, SourceKey};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Slot name, or the hidden sentinel
    pub destination: String,
    /// Display/storage order
    #[serde(default, deserialize_with = "deserialize_weight")]
    pub weight: i64,
    /// Owning plugin, filled in by normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Source name, filled in by normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl MappingEntry {
    pub fn new(destination: impl Into<String>, weight: i64) -> Self {
        Self {
            destination: destination.into(),
            weight,
            plugin: None,
            source: None,
        }
    }

    /// The (plugin, source) pair, once normalization has filled it in
    pub fn source_key(&self) -> Option<SourceKey> {
        match (&self.plugin, &self.source) {
            (Some(plugin), Some(source)) => Some(SourceKey::new(plugin.clone(), source.clone())),
            _ => None,
        }
    }
}

/// Smallest i64 as f64, exactly representable (-2^63)
const I64_MIN_F64: f64 = i64::MIN as f64;

/// Deserialize a weight from a JSON number or a numeric string.
///
/// Form submissions carry weights as strings; stored configuration carries
/// them as integers. Null or a missing value means 0.
pub fn deserialize_weight<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(de::Error::custom(format!("weight out of range: {}", n)));
            }
            match n.as_f64() {
                Some(f) if f.fract() != 0.0 || !f.is_finite() => Err(de::Error::custom(format!(
                    "weight is not an integer: {}",
                    n
                ))),
                // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
                Some(f) if f >= I64_MIN_F64 && f < -I64_MIN_F64 => Ok(f as i64),
                _ => Err(de::Error::custom(format!("weight out of range: {}", n))),
            }
        }
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("weight is not an integer: {:?}", s))),
        other => Err(de::Error::custom(format!("invalid weight: {}", other))),
    }
}

/// Per-pattern container of a raw submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMappingForm {
    /// Mapping rows keyed by composite source key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<IndexMap<String, MappingEntry>>,
}

/// Mapping rows, either still nested per pattern or already normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternMapping {
    /// Raw submission: one table per pattern
    Nested(IndexMap<String, PatternMappingForm>),
    /// Normalized: rows of the selected pattern, keyed by composite key
    Flat(IndexMap<String, MappingEntry>),
}

impl Default for PatternMapping {
    fn default() -> Self {
        PatternMapping::Flat(IndexMap::new())
    }
}

impl PatternMapping {
    pub fn is_flat(&self) -> bool {
        matches!(self, PatternMapping::Flat(_))
    }

    /// Rows of the flat form; `None` while still nested
    pub fn flat(&self) -> Option<&IndexMap<String, MappingEntry>> {
        match self {
            PatternMapping::Flat(map) => Some(map),
            PatternMapping::Nested(_) => None,
        }
    }

    /// The `settings` table submitted for one pattern, if any
    pub fn nested_settings(&self, pattern: &str) -> Option<&IndexMap<String, MappingEntry>> {
        match self {
            PatternMapping::Nested(map) => map.get(pattern)?.settings.as_ref(),
            PatternMapping::Flat(_) => None,
        }
    }
}

impl Serialize for PatternMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PatternMapping::Nested(map) => map.serialize(serializer),
            PatternMapping::Flat(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PatternMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;

        // Flat rows always carry a destination; per-pattern containers never do
        let is_flat = raw.is_empty()
            || raw
                .values()
                .any(|v| v.as_object().is_some_and(|o| o.contains_key("destination")));

        if is_flat {
            let mut rows = IndexMap::with_capacity(raw.len());
            for (key, value) in raw {
                let entry = MappingEntry::deserialize(value).map_err(de::Error::custom)?;
                rows.insert(key, entry);
            }
            Ok(PatternMapping::Flat(rows))
        } else {
            let mut patterns = IndexMap::with_capacity(raw.len());
            for (pattern, value) in raw {
                let form = match value {
                    Value::Null => PatternMappingForm::default(),
                    other => PatternMappingForm::deserialize(other).map_err(de::Error::custom)?,
                };
                patterns.insert(pattern, form);
            }
            Ok(PatternMapping::Nested(patterns))
        }
    }
}

/// Pattern display configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDisplaySettings {
    /// Selected pattern ID, or the empty-pattern sentinel
    #[serde(default)]
    pub pattern: String,
    /// Selected variant of the pattern, once normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_variant: Option<String>,
    /// Raw per-pattern variant selections
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variants: IndexMap<String, String>,
    #[serde(default)]
    pub pattern_mapping: PatternMapping,
}

impl PatternDisplaySettings {
    /// Settings for a pattern with an empty, already normalized mapping
    pub fn for_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Builder-style flat row insertion
    pub fn with_entry(mut self, key: impl Into<String>, entry: MappingEntry) -> Self {
        match &mut self.pattern_mapping {
            PatternMapping::Flat(map) => {
                map.insert(key.into(), entry);
            }
            PatternMapping::Nested(_) => {
                let mut map = IndexMap::new();
                map.insert(key.into(), entry);
                self.pattern_mapping = PatternMapping::Flat(map);
            }
        }
        self
    }

    /// The selected pattern, unless the selector holds the empty sentinel
    pub fn selected_pattern(&self, format: &MappingFormat) -> Option<&str> {
        if format.is_pattern_selected(&self.pattern) {
            Some(&self.pattern)
        } else {
            None
        }
    }

    /// Look up a normalized row by its boundary key
    pub fn entry(&self, key: &str) -> Option<&MappingEntry> {
        self.pattern_mapping.flat()?.get(key)
    }

    /// Normalized rows in ascending weight order
    pub fn mapped_entries(&self) -> Vec<(&str, &MappingEntry)> {
        let mut rows: Vec<(&str, &MappingEntry)> = self
            .pattern_mapping
            .flat()
            .map(|m| m.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default();
        rows.sort_by_key(|(_, entry)| entry.weight);
        rows
    }
}
