//! Error types for schema diffing and DDL generation.

use thiserror::Error;

/// Errors produced by the schema engine.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A semantic type has no SQL mapping for the active dialect.
    #[error("type '{ty}' has no mapping for dialect '{dialect}'")]
    UnsupportedType {
        /// Canonical name of the unmapped type.
        ty: String,
        /// Dialect that rejected it.
        dialect: &'static str,
    },

    /// An asset filter pattern failed to compile.
    #[error("invalid asset filter pattern '{pattern}': {source}")]
    InvalidFilterPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Conflicting or unsupported configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
