//! # schemasync
//!
//! Synchronizes live database schemas with declarative entity metadata.
//!
//! The core diff/emit engine lives in `schemasync-core`; this crate adds the
//! database-facing pieces:
//!
//! - **Introspection backends** ([`introspect`]) - read a live SQLite or
//!   MySQL catalog into the canonical schema model.
//! - **SchemaTool** ([`tool`]) - the operation surface: generate create or
//!   update DDL, or apply it directly.
//! - **Configuration** ([`config`]) - the asset filter scoping which schema
//!   objects the tool manages.
//!
//! # Example
//!
//! ```rust,no_run
//! use schemasync::prelude::*;
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! # async fn demo() -> schemasync::Result<()> {
//! let pool = SqlitePoolOptions::new().connect("sqlite:app.db").await?;
//! let tool = SchemaTool::new(SqliteBackend::new(pool), SqliteDialect::new());
//!
//! let entities = vec![EntityMetadata::new("User", "users")
//!     .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
//!     .field(FieldMetadata::new("email", SemanticType::String(255)).unique())];
//!
//! // Print what would change, then converge.
//! for sql in tool.update_schema_sql(&entities).await? {
//!     println!("{sql}");
//! }
//! tool.update_schema(&entities).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod introspect;
pub mod tool;

pub use error::{Result, SyncError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::SyncConfig;
    pub use crate::error::{Result, SyncError};
    pub use crate::introspect::{Execute, Introspect, MySqlBackend, SqliteBackend};
    pub use crate::tool::SchemaTool;

    pub use schemasync_core::prelude::*;
}
