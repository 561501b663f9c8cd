//! Normalization of submitted pattern display values.
//!
//! A raw submission carries one mapping table per pattern. Normalizing keeps
//! only the selected pattern's table, drops hidden rows, splits each key
//! into plugin and source, and renumbers weights densely from zero.

use crate::error::{MappingError, Result};
use indexmap::IndexMap;
use log::{debug, trace};
use pattern_mapping_types::{
    MappingEntry, MappingFormat, PatternDisplaySettings, PatternMapping, SourceKey,
};

/// Normalize submitted settings, returning the normalized copy.
///
/// Settings whose selected pattern has no `settings` table (including
/// settings that are already normalized) come back unchanged.
pub fn normalize(
    settings: &PatternDisplaySettings,
    format: &MappingFormat,
) -> Result<PatternDisplaySettings> {
    let mut normalized = settings.clone();
    normalize_in_place(&mut normalized, format)?;
    Ok(normalized)
}

/// Normalize submitted settings in place.
///
/// On error the settings are left exactly as they were.
pub fn normalize_in_place(
    settings: &mut PatternDisplaySettings,
    format: &MappingFormat,
) -> Result<()> {
    if format.separator.is_empty() {
        return Err(MappingError::EmptySeparator);
    }

    let Some(rows) = settings.pattern_mapping.nested_settings(&settings.pattern) else {
        trace!("No mapping table for pattern '{}', nothing to normalize", settings.pattern);
        return Ok(());
    };

    let mapping = normalize_rows(rows, format)?;
    debug!(
        "Normalized mapping for pattern '{}': {} of {} rows kept",
        settings.pattern,
        mapping.len(),
        rows.len()
    );

    settings.pattern_mapping = PatternMapping::Flat(mapping);
    hoist_variant(settings);
    Ok(())
}

/// Filter, split, stable-sort and renumber one pattern's rows
fn normalize_rows(
    rows: &IndexMap<String, MappingEntry>,
    format: &MappingFormat,
) -> Result<IndexMap<String, MappingEntry>> {
    let mut kept: Vec<(String, MappingEntry)> = Vec::with_capacity(rows.len());

    for (key, entry) in rows {
        if format.is_hidden(&entry.destination) {
            trace!("Dropping hidden row '{}'", key);
            continue;
        }
        let SourceKey { plugin, source } =
            SourceKey::split(key, &format.separator).ok_or_else(|| MappingError::MalformedKey {
                key: key.clone(),
                separator: format.separator.clone(),
            })?;

        kept.push((
            key.clone(),
            MappingEntry {
                destination: entry.destination.clone(),
                weight: entry.weight,
                plugin: Some(plugin),
                source: Some(source),
            },
        ));
    }

    // Vec::sort_by_key is stable: equal weights keep submission order
    kept.sort_by_key(|(_, entry)| entry.weight);

    Ok(kept
        .into_iter()
        .enumerate()
        .map(|(position, (key, mut entry))| {
            entry.weight = position as i64;
            (key, entry)
        })
        .collect())
}

/// Move the selected pattern's variant choice into `pattern_variant`
fn hoist_variant(settings: &mut PatternDisplaySettings) {
    let variants = std::mem::take(&mut settings.variants);
    if let Some(variant) = variants
        .get(&settings.pattern)
        .filter(|v| !v.is_empty())
    {
        settings.pattern_variant = Some(variant.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dot() -> MappingFormat {
        MappingFormat::with_separator(".")
    }

    fn card_submission() -> PatternDisplaySettings {
        serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {
                "card": {"settings": {
                    "text.title": {"destination": "heading", "weight": 5},
                    "text.body": {"destination": "_hidden", "weight": 1},
                    "text.sub": {"destination": "subheading", "weight": 5}
                }}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_card_example() {
        let normalized = normalize(&card_submission(), &dot()).unwrap();

        let expected = json!({
            "pattern": "card",
            "pattern_mapping": {
                "text.title": {"destination": "heading", "weight": 0, "plugin": "text", "source": "title"},
                "text.sub": {"destination": "subheading", "weight": 1, "plugin": "text", "source": "sub"}
            }
        });
        assert_eq!(serde_json::to_value(&normalized).unwrap(), expected);

        let keys: Vec<&String> = normalized.pattern_mapping.flat().unwrap().keys().collect();
        assert_eq!(keys, vec!["text.title", "text.sub"]);
    }

    #[test]
    fn test_missing_table_is_noop() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "hero",
            "pattern_mapping": {
                "card": {"settings": {"text.title": {"destination": "heading", "weight": 0}}},
                "hero": {}
            }
        }))
        .unwrap();

        assert_eq!(normalize(&settings, &dot()).unwrap(), settings);
    }

    #[test]
    fn test_unselected_pattern_is_noop() {
        let mut settings = card_submission();
        settings.pattern = "_none".to_string();
        assert_eq!(normalize(&settings, &dot()).unwrap(), settings);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize(&card_submission(), &dot()).unwrap();
        let twice = normalize(&once, &dot()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_other_patterns_discarded() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {
                "hero": {"settings": {"text.image": {"destination": "image", "weight": 0}}},
                "card": {"settings": {"text.title": {"destination": "heading", "weight": 0}}}
            }
        }))
        .unwrap();

        let normalized = normalize(&settings, &dot()).unwrap();
        let mapping = normalized.pattern_mapping.flat().unwrap();
        assert_eq!(mapping.len(), 1);
        assert!(mapping.contains_key("text.title"));
    }

    #[test]
    fn test_weights_dense_and_stable() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {"card": {"settings": {
                "a.one": {"destination": "x", "weight": 10},
                "a.two": {"destination": "x", "weight": -3},
                "a.three": {"destination": "x", "weight": 10},
                "a.four": {"destination": "_hidden", "weight": 0},
                "a.five": {"destination": "x", "weight": "-3"},
                "a.six": {"destination": "x", "weight": 7}
            }}}
        }))
        .unwrap();

        let normalized = normalize(&settings, &dot()).unwrap();
        let order: Vec<(&str, i64)> = normalized
            .pattern_mapping
            .flat()
            .unwrap()
            .iter()
            .map(|(k, e)| (k.as_str(), e.weight))
            .collect();

        assert_eq!(
            order,
            vec![("a.two", 0), ("a.five", 1), ("a.six", 2), ("a.one", 3), ("a.three", 4)]
        );
    }

    #[test]
    fn test_keys_rejoin_exactly() {
        let normalized = normalize(&card_submission(), &dot()).unwrap();
        for (key, entry) in normalized.pattern_mapping.flat().unwrap() {
            let rejoined = entry.source_key().unwrap().to_key_string(".");
            assert_eq!(&rejoined, key);
        }
    }

    #[test]
    fn test_malformed_key_rejected() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {"card": {"settings": {
                "text.title": {"destination": "heading", "weight": 0},
                "text.field.extra": {"destination": "body", "weight": 1}
            }}}
        }))
        .unwrap();

        let err = normalize(&settings, &dot()).unwrap_err();
        assert_eq!(
            err,
            MappingError::MalformedKey {
                key: "text.field.extra".to_string(),
                separator: ".".to_string()
            }
        );

        let mut in_place = settings.clone();
        assert!(normalize_in_place(&mut in_place, &dot()).is_err());
        assert_eq!(in_place, settings);
    }

    #[test]
    fn test_hidden_malformed_key_is_dropped_not_rejected() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {"card": {"settings": {
                "nodelimiter": {"destination": "_hidden", "weight": 0}
            }}}
        }))
        .unwrap();

        let normalized = normalize(&settings, &dot()).unwrap();
        assert!(normalized.pattern_mapping.flat().unwrap().is_empty());
    }

    #[test]
    fn test_missing_separator_rejected() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {"card": {"settings": {
                "title": {"destination": "heading", "weight": 0}
            }}}
        }))
        .unwrap();

        assert!(matches!(
            normalize(&settings, &MappingFormat::default()),
            Err(MappingError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let format = MappingFormat::with_separator("");
        assert_eq!(
            normalize(&card_submission(), &format).unwrap_err(),
            MappingError::EmptySeparator
        );
    }

    #[test]
    fn test_variant_hoisted_for_selected_pattern() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "variants": {"card": "highlight", "hero": "wide"},
            "pattern_mapping": {"card": {"settings": {}}}
        }))
        .unwrap();

        let normalized = normalize(&settings, &dot()).unwrap();
        assert_eq!(normalized.pattern_variant.as_deref(), Some("highlight"));
        assert!(normalized.variants.is_empty());
        assert!(normalized.pattern_mapping.flat().unwrap().is_empty());
    }

    #[test]
    fn test_empty_variant_not_hoisted() {
        let settings: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "variants": {"card": ""},
            "pattern_mapping": {"card": {"settings": {}}}
        }))
        .unwrap();

        let normalized = normalize(&settings, &dot()).unwrap();
        assert_eq!(normalized.pattern_variant, None);
    }
}
