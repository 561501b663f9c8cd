//! pattern-display: Map content source fields onto the slots of reusable
//! display patterns.
//!
//! This library provides:
//! - Registry traits and in-memory registries for patterns and source fields
//! - A declarative builder for the mapping form
//! - Normalization of submitted form values and destination lookup
//! - Configuration and catalog loading for the command-line front end

pub mod config;
pub mod display;

// Re-export commonly used types
pub use config::{AppConfig, Catalog};
pub use display::{load_settings, PatternDisplay};
pub use pattern_mapping_core as core;
pub use pattern_mapping_types as types;
