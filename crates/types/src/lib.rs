//! pattern-mapping-types: Shared data types for pattern display mapping.
//!
//! This crate contains pure data types (pattern definitions, source field
//! metadata, composite keys, mapping settings and the declarative form tree)
//! shared by the core crate and the command-line front end. Nothing here
//! talks to a registry or performs normalization.

pub mod field;
pub mod form;
pub mod key;
pub mod pattern;
pub mod settings;

// Re-export commonly used types at the crate root for convenience
pub use field::SourceField;
pub use form::{
    Container, FormElement, FormTree, Select, SelectOptions, Table, TableDrag, TableRow,
    VisibleWhen, Weight,
};
pub use key::{
    MappingFormat, SourceKey, DEFAULT_EMPTY_PATTERN, DEFAULT_HIDDEN_DESTINATION,
    DEFAULT_SEPARATOR,
};
pub use pattern::{PatternDefinition, PatternField, PatternVariant};
pub use settings::{
    deserialize_weight, MappingEntry, PatternDisplaySettings, PatternMapping, PatternMappingForm,
};
