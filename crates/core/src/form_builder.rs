//! Form builder for the pattern display mapping form.
//!
//! Produces a declarative [`FormTree`]: a required pattern selector, a
//! variant selector per pattern that has variants, and one mapping table per
//! pattern, each shown only while its pattern is selected. Registries are
//! passed in; nothing is read from or written to anywhere else.

use crate::registry::{PatternRegistry, SourceContext, SourceRegistry};
use log::{debug, warn};
use pattern_mapping_types::{
    Container, FormElement, FormTree, MappingFormat, PatternDisplaySettings, Select,
    SelectOptions, Table, TableDrag, TableRow, VisibleWhen, Weight,
};

/// Name of the pattern selector element
pub const PATTERN_SELECTOR: &str = "pattern";

/// Tabledrag group shared by all weight elements
pub const WEIGHT_GROUP: &str = "field-weight";

/// Weight selectors offer `-WEIGHT_DELTA..=WEIGHT_DELTA`
pub const WEIGHT_DELTA: u32 = 20;

/// Column headers of the mapping table
pub const MAPPING_TABLE_HEADER: [&str; 4] = ["Source", "Plugin", "Destination", "Weight"];

/// Label of the hidden destination option
pub const HIDDEN_LABEL: &str = "- Hidden -";

fn visible_for(pattern_id: &str) -> Option<VisibleWhen> {
    Some(VisibleWhen {
        control: PATTERN_SELECTOR.to_string(),
        equals: pattern_id.to_string(),
    })
}

fn to_options(pairs: Vec<(String, String)>) -> SelectOptions {
    pairs.into_iter().collect()
}

/// Build the full pattern display form
pub fn build_pattern_display_form(
    patterns: &dyn PatternRegistry,
    sources: &dyn SourceRegistry,
    tag: &str,
    context: &SourceContext,
    current: &PatternDisplaySettings,
    format: &MappingFormat,
) -> FormTree {
    let mut form = FormTree::new();

    form.insert(
        PATTERN_SELECTOR.to_string(),
        FormElement::Select(Select {
            title: "Pattern".to_string(),
            options: to_options(patterns.pattern_options()),
            default_value: current.selected_pattern(format).map(str::to_string),
            empty_value: Some(format.empty_pattern.clone()),
            required: true,
            ..Default::default()
        }),
    );

    let mut variants = Container::default();
    let mut mappings = Container::default();

    for definition in patterns.definitions() {
        if definition.has_variants() {
            let default_value = if current.pattern == definition.id {
                current.pattern_variant.clone()
            } else {
                None
            };
            variants.children.insert(
                definition.id.clone(),
                FormElement::Select(Select {
                    title: "Variant".to_string(),
                    options: to_options(definition.variant_options()),
                    default_value,
                    visible_when: visible_for(&definition.id),
                    ..Default::default()
                }),
            );
        }

        let table = build_mapping_table(
            &definition.id,
            patterns,
            sources,
            tag,
            context,
            current,
            format,
        );
        let mut container = Container {
            visible_when: visible_for(&definition.id),
            ..Default::default()
        };
        container
            .children
            .insert("settings".to_string(), FormElement::Table(table));
        mappings
            .children
            .insert(definition.id.clone(), FormElement::Container(container));
    }

    if !variants.children.is_empty() {
        form.insert("variants".to_string(), FormElement::Container(variants));
    }
    form.insert(
        "pattern_mapping".to_string(),
        FormElement::Container(mappings),
    );

    debug!(
        "Built pattern display form for tag '{}' with {} pattern tables",
        tag,
        form.get("pattern_mapping")
            .and_then(FormElement::as_container)
            .map_or(0, |c| c.children.len())
    );
    form
}

/// Build the mapping table of one pattern.
///
/// One draggable row per source field, keyed by composite key. Unknown
/// patterns still get rows, with only the hidden destination on offer.
pub fn build_mapping_table(
    pattern_id: &str,
    patterns: &dyn PatternRegistry,
    sources: &dyn SourceRegistry,
    tag: &str,
    context: &SourceContext,
    current: &PatternDisplaySettings,
    format: &MappingFormat,
) -> Table {
    let mut destinations = SelectOptions::new();
    destinations.insert(format.hidden_destination.clone(), HIDDEN_LABEL.to_string());
    for (slot, label) in patterns.slot_options(pattern_id) {
        if format.is_hidden(&slot) {
            warn!(
                "Pattern '{}' slot '{}' collides with the hidden destination, skipping",
                pattern_id, slot
            );
            continue;
        }
        destinations.insert(slot, label);
    }

    let mut table = Table {
        header: MAPPING_TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
        tabledrag: Some(TableDrag::order_by(WEIGHT_GROUP)),
        ..Default::default()
    };

    for field in sources.fields(tag, context) {
        let key = field.key().to_key_string(&format.separator);
        let existing = current.entry(&key);

        let mut cells = FormTree::new();
        cells.insert("info".to_string(), FormElement::plain_text(&field.label));
        cells.insert(
            "plugin".to_string(),
            FormElement::plain_text(&field.plugin_label),
        );
        cells.insert(
            "destination".to_string(),
            FormElement::Select(Select {
                title: format!("Destination for {}", field.label),
                options: destinations.clone(),
                default_value: existing.map(|e| e.destination.clone()),
                title_hidden: true,
                ..Default::default()
            }),
        );
        cells.insert(
            "weight".to_string(),
            FormElement::Weight(Weight {
                title: format!("Weight for {}", field.label),
                default_value: existing.map(|e| e.weight),
                delta: WEIGHT_DELTA,
                group: WEIGHT_GROUP.to_string(),
            }),
        );

        table.rows.insert(
            key,
            TableRow {
                cells,
                draggable: true,
            },
        );
    }

    table
}
