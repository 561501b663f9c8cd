//! pattern-mapping-core: Registries, form builder and normalizer for
//! pattern display mapping.
//!
//! This crate contains the registry traits (PatternRegistry, SourceRegistry)
//! with in-memory implementations, the mapping form builder, the normalizer
//! for submitted values and destination lookup.

mod error;
mod form_builder;
mod lookup;
mod normalize;
mod registry;

pub use error::{MappingError, Result};
pub use form_builder::{
    build_mapping_table, build_pattern_display_form, HIDDEN_LABEL, MAPPING_TABLE_HEADER,
    PATTERN_SELECTOR, WEIGHT_DELTA, WEIGHT_GROUP,
};
pub use lookup::{destination, has_destination, mapping_for};
pub use normalize::{normalize, normalize_in_place};
pub use registry::{
    PatternRegistry, SourceContext, SourceRegistration, SourceRegistry, StaticPatternRegistry,
    StaticSourceRegistry,
};

// Re-export types used in signatures for convenience
pub use pattern_mapping_types::{
    FormElement, FormTree, MappingEntry, MappingFormat, PatternDefinition, PatternDisplaySettings,
    SourceField, SourceKey,
};
