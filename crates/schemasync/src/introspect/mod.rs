//! Live schema introspection backends.
//!
//! A backend reads one engine's catalog and materializes it into the
//! canonical [`SchemaModel`], and can execute generated statements. Both
//! concerns are read/write seams over a `sqlx` pool; the core engine never
//! touches a connection.

mod mysql;
mod sqlite;

pub use mysql::MySqlBackend;
pub use sqlite::SqliteBackend;

use schemasync_core::schema::{ForeignKeyAction, SchemaModel};

use crate::error::Result;

/// Reads the live database catalog into the canonical schema model.
pub trait Introspect {
    /// Introspects tables, columns, indexes, and foreign keys.
    ///
    /// Read-only; implicit engine artifacts (rowid primary key indexes,
    /// the MySQL `PRIMARY` index) are excluded so they never show up as
    /// spurious diff churn.
    fn introspect(&self) -> impl std::future::Future<Output = Result<SchemaModel>> + Send;
}

/// Executes DDL statements against the live database.
pub trait Execute {
    /// Executes one statement.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Maps a catalog referential action keyword to the canonical action.
///
/// The engine-default "NO ACTION" maps to no action at all, so constraints
/// written without cascade rules introspect back to their original form.
pub(crate) fn referential_action(raw: &str) -> Option<ForeignKeyAction> {
    match raw {
        "CASCADE" => Some(ForeignKeyAction::Cascade),
        "RESTRICT" => Some(ForeignKeyAction::Restrict),
        "SET NULL" => Some(ForeignKeyAction::SetNull),
        "SET DEFAULT" => Some(ForeignKeyAction::SetDefault),
        _ => None,
    }
}
