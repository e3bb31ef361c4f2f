//! # schemasync-core
//!
//! Dialect-aware schema diffing and DDL generation.
//!
//! The engine compares two canonical schema models, the "current" state
//! (usually introspected from a live database) and the "desired" state
//! (built from entity metadata), and renders the ordered SQL that turns one
//! into the other.
//!
//! # Architecture
//!
//! - **Schema model** ([`schema`]) - dialect-neutral tables, columns,
//!   indexes, and foreign keys.
//! - **Target schema builder** ([`metadata`]) - turns declarative entity
//!   metadata into the desired model.
//! - **Differ** ([`diff`]) - computes the minimal ordered [`ChangeSet`].
//! - **Dialect adapters** ([`dialect`]) - per-engine SQL rules.
//! - **Emitter** ([`emit`]) - renders a change set into literal statements.
//! - **Asset filter** ([`filter`]) - scopes the engine to the objects it
//!   owns, leaving foreign tables untouched.
//!
//! # Example
//!
//! ```rust
//! use schemasync_core::prelude::*;
//!
//! let entities = vec![EntityMetadata::new("User", "users")
//!     .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
//!     .field(FieldMetadata::new("email", SemanticType::String(255)).unique())];
//!
//! let desired = build_schema(&entities);
//! let changes = diff(&SchemaModel::new(), &desired, &AssetFilter::None);
//! let statements = emit(&changes, &MySqlDialect::new()).unwrap();
//! assert_eq!(statements.len(), 1);
//! ```

pub mod changes;
pub mod dialect;
pub mod diff;
pub mod emit;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod naming;
pub mod schema;
pub mod types;

pub use error::{Result, SchemaError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::changes::{ChangeSet, SchemaChange};
    pub use crate::dialect::{DialectAdapter, MySqlDialect, SqliteDialect};
    pub use crate::diff::diff;
    pub use crate::emit::emit;
    pub use crate::error::{Result, SchemaError};
    pub use crate::filter::AssetFilter;
    pub use crate::metadata::{
        build_schema, AssociationMetadata, EntityMetadata, FieldMetadata, JoinColumn,
    };
    pub use crate::schema::{
        Column, ForeignKey, ForeignKeyAction, Index, SchemaModel, Table,
    };
    pub use crate::types::{DefaultValue, SemanticType};
}
