//! Error types for the synchronization tool.

use schemasync_core::SchemaError;

/// Errors that can occur while synchronizing a schema.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Error from the core diff/emit engine.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failed to read catalog metadata from the live database.
    #[error("Introspection failed: {0}")]
    Introspection(#[source] sqlx::Error),

    /// Database error while executing generated statements.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error (schema description files).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unsupported or malformed configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;
