//! SQL emission.
//!
//! Renders a [`ChangeSet`] into literal statements for one dialect. Changes
//! touching schema-qualified tables are skipped entirely on dialects without
//! schema support; that is an accepted outcome, not an error.

use tracing::debug;

use crate::changes::{ChangeSet, SchemaChange};
use crate::dialect::DialectAdapter;
use crate::error::Result;
use crate::schema::is_qualified;

/// Renders every change in order into zero or more statements each.
///
/// # Errors
///
/// Fails only on type mapping errors from the dialect; the emitter itself
/// never rejects a well-formed change set.
pub fn emit(change_set: &ChangeSet, dialect: &dyn DialectAdapter) -> Result<Vec<String>> {
    let mut statements = Vec::new();

    for change in change_set {
        if skips_namespaced(change, dialect) {
            debug!(
                table = change.table_name(),
                dialect = dialect.name(),
                "namespaced table on a dialect without schema support, skipped"
            );
            continue;
        }

        match change {
            SchemaChange::CreateTable(table) => {
                statements.extend(dialect.create_table_sql(table)?);
            }
            SchemaChange::DropTable { name } => statements.push(dialect.drop_table_sql(name)),
            SchemaChange::AddColumn { table, column } => {
                statements.extend(dialect.add_column_sql(table, column)?);
            }
            SchemaChange::AlterColumn { table, column } => {
                statements.extend(dialect.alter_column_sql(table, column)?);
            }
            SchemaChange::DropColumn { table, column } => {
                statements.extend(dialect.drop_column_sql(table, column));
            }
            SchemaChange::AddIndex { table, index } => {
                statements.push(dialect.create_index_sql(table, index));
            }
            SchemaChange::DropIndex { table, name } => {
                statements.push(dialect.drop_index_sql(table, name));
            }
            SchemaChange::AddForeignKey { table, foreign_key } => {
                statements.extend(dialect.add_foreign_key_sql(table, foreign_key));
            }
            SchemaChange::DropForeignKey { table, name } => {
                statements.extend(dialect.drop_foreign_key_sql(table, name));
            }
        }
    }

    Ok(statements)
}

/// A change is skipped when its own table, or the table a new constraint
/// references, is schema-qualified and the dialect cannot express that.
fn skips_namespaced(change: &SchemaChange, dialect: &dyn DialectAdapter) -> bool {
    if dialect.supports_schemas() {
        return false;
    }
    if is_qualified(change.table_name()) {
        return true;
    }
    matches!(
        change,
        SchemaChange::AddForeignKey { foreign_key, .. } if is_qualified(&foreign_key.referenced_table)
    )
}
