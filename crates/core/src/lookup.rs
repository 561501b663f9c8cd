//! Destination lookup over normalized settings

use pattern_mapping_types::{MappingEntry, MappingFormat, PatternDisplaySettings, SourceKey};

/// Normalized row for a source field, if it is mapped
pub fn mapping_for<'a>(
    key: &SourceKey,
    settings: &'a PatternDisplaySettings,
    format: &MappingFormat,
) -> Option<&'a MappingEntry> {
    settings.entry(&key.to_key_string(&format.separator))
}

/// Destination slot a (plugin, source) pair is mapped to.
///
/// `None` means the field is unmapped, which is an ordinary outcome.
pub fn destination<'a>(
    plugin: &str,
    source: &str,
    settings: &'a PatternDisplaySettings,
    format: &MappingFormat,
) -> Option<&'a str> {
    mapping_for(&SourceKey::new(plugin, source), settings, format)
        .map(|entry| entry.destination.as_str())
}

/// Whether a (plugin, source) pair is mapped to any destination
pub fn has_destination(
    plugin: &str,
    source: &str,
    settings: &PatternDisplaySettings,
    format: &MappingFormat,
) -> bool {
    destination(plugin, source, settings, format).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    fn normalized_card() -> (PatternDisplaySettings, MappingFormat) {
        let format = MappingFormat::with_separator(".");
        let raw: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {"card": {"settings": {
                "text.title": {"destination": "heading", "weight": 5},
                "text.body": {"destination": "_hidden", "weight": 1},
                "text.sub": {"destination": "subheading", "weight": 5}
            }}}
        }))
        .unwrap();
        (normalize(&raw, &format).unwrap(), format)
    }

    #[test]
    fn test_mapped_and_unmapped() {
        let (settings, format) = normalized_card();
        assert_eq!(destination("text", "title", &settings, &format), Some("heading"));
        assert_eq!(destination("text", "body", &settings, &format), None);
        assert!(has_destination("text", "sub", &settings, &format));
        assert!(!has_destination("text", "body", &settings, &format));
        assert!(!has_destination("other", "title", &settings, &format));
    }

    #[test]
    fn test_mapping_for_returns_normalized_row() {
        let (settings, format) = normalized_card();
        let entry = mapping_for(&SourceKey::new("text", "sub"), &settings, &format).unwrap();
        assert_eq!(entry.weight, 1);
        assert_eq!(entry.plugin.as_deref(), Some("text"));
    }

    #[test]
    fn test_raw_submission_has_no_destinations() {
        let format = MappingFormat::with_separator(".");
        let raw: PatternDisplaySettings = serde_json::from_value(json!({
            "pattern": "card",
            "pattern_mapping": {"card": {"settings": {
                "text.title": {"destination": "heading", "weight": 0}
            }}}
        }))
        .unwrap();
        assert_eq!(destination("text", "title", &raw, &format), None);
    }
}
