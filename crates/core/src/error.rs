//! Errors raised while normalizing submitted mapping values

/// Failures that reject a submitted mapping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// A mapping key does not split into exactly one plugin and one source
    #[error("malformed mapping key {key:?}: expected <plugin>{separator}<source>")]
    MalformedKey { key: String, separator: String },

    #[error("mapping key separator must not be empty")]
    EmptySeparator,
}

pub type Result<T> = std::result::Result<T, MappingError>;
