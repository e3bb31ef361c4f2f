//! Schema comparison.
//!
//! [`diff`] computes the minimal ordered change set that transforms the
//! current schema into the desired one. The output ordering guarantees that
//! every `CreateTable` precedes every `AddForeignKey` (so forward-referenced
//! tables exist before constraints land) and that `DropForeignKey` precedes
//! `DropTable` for the owning side.

use std::collections::HashSet;

use tracing::debug;

use crate::changes::{ChangeSet, SchemaChange};
use crate::filter::AssetFilter;
use crate::schema::{SchemaModel, Table};

/// Compares two schema models and returns the ordered change set.
///
/// Assets rejected by `filter` are invisible: they are excluded from both
/// drop detection and comparison, so externally owned objects are never
/// created, altered, or dropped. Never fails on well-formed input.
#[must_use]
pub fn diff(current: &SchemaModel, desired: &SchemaModel, filter: &AssetFilter) -> ChangeSet {
    let current_tables: Vec<&Table> = current
        .tables
        .iter()
        .filter(|t| filter.is_managed(&t.name))
        .collect();
    let desired_tables: Vec<&Table> = desired
        .tables
        .iter()
        .filter(|t| filter.is_managed(&t.name))
        .collect();

    let current_names: HashSet<&str> = current_tables.iter().map(|t| t.name.as_str()).collect();
    let desired_names: HashSet<&str> = desired_tables.iter().map(|t| t.name.as_str()).collect();

    let created: Vec<&Table> = desired_tables
        .iter()
        .filter(|t| !current_names.contains(t.name.as_str()))
        .copied()
        .collect();
    let dropped: Vec<&Table> = current_tables
        .iter()
        .filter(|t| !desired_names.contains(t.name.as_str()))
        .copied()
        .collect();
    let common: Vec<(&Table, &Table)> = desired_tables
        .iter()
        .filter_map(|d| current.get_table(&d.name).map(|c| (c, *d)))
        .collect();

    let mut drop_fks = Vec::new();
    let mut creates = Vec::new();
    let mut column_changes = Vec::new();
    let mut index_changes = Vec::new();
    let mut add_fks = Vec::new();
    let mut drops = Vec::new();

    for (current_table, desired_table) in &common {
        diff_foreign_keys(
            current_table,
            desired_table,
            filter,
            &mut drop_fks,
            &mut add_fks,
        );
    }
    // Constraints owned by a table about to go away must be dropped first.
    for table in &dropped {
        for fk in &table.foreign_keys {
            drop_fks.push(SchemaChange::DropForeignKey {
                table: table.name.clone(),
                name: fk.name.clone(),
            });
        }
    }

    for table in &created {
        let mut stripped = (*table).clone();
        let foreign_keys = std::mem::take(&mut stripped.foreign_keys);
        stripped.indexes.retain(|i| filter.is_managed(&i.name));
        creates.push(SchemaChange::CreateTable(stripped));
        for fk in foreign_keys {
            if !filter.is_managed(&fk.name) {
                continue;
            }
            add_fks.push(SchemaChange::AddForeignKey {
                table: table.name.clone(),
                foreign_key: fk,
            });
        }
    }

    for (current_table, desired_table) in &common {
        diff_columns(current_table, desired_table, filter, &mut column_changes);
        diff_indexes(current_table, desired_table, filter, &mut index_changes);
    }

    for table in &dropped {
        drops.push(SchemaChange::DropTable {
            name: table.name.clone(),
        });
    }

    let mut change_set = ChangeSet::new();
    change_set.changes.extend(drop_fks);
    change_set.changes.extend(creates);
    change_set.changes.extend(column_changes);
    change_set.changes.extend(index_changes);
    change_set.changes.extend(add_fks);
    change_set.changes.extend(drops);

    if !change_set.is_empty() {
        debug!(changes = change_set.len(), "schema diff computed");
    }
    change_set
}

fn diff_columns(
    current: &Table,
    desired: &Table,
    filter: &AssetFilter,
    out: &mut Vec<SchemaChange>,
) {
    for column in &desired.columns {
        if !filter.is_managed(&column.name) {
            continue;
        }
        match current.get_column(&column.name) {
            None => out.push(SchemaChange::AddColumn {
                table: desired.name.clone(),
                column: column.clone(),
            }),
            Some(existing) if existing.differs_from(column) => {
                out.push(SchemaChange::AlterColumn {
                    table: desired.name.clone(),
                    column: column.clone(),
                });
            }
            Some(_) => {}
        }
    }
    for column in &current.columns {
        if filter.is_managed(&column.name) && desired.get_column(&column.name).is_none() {
            out.push(SchemaChange::DropColumn {
                table: desired.name.clone(),
                column: column.name.clone(),
            });
        }
    }
}

fn diff_indexes(
    current: &Table,
    desired: &Table,
    filter: &AssetFilter,
    out: &mut Vec<SchemaChange>,
) {
    // Stale indexes go first so a replacement never races a leftover name
    // in catalogs whose index names the tool did not generate.
    for index in &current.indexes {
        if !filter.is_managed(&index.name) {
            continue;
        }
        let wanted = desired
            .indexes
            .iter()
            .any(|i| i.signature() == index.signature());
        if !wanted {
            out.push(SchemaChange::DropIndex {
                table: desired.name.clone(),
                name: index.name.clone(),
            });
        }
    }
    for index in &desired.indexes {
        if !filter.is_managed(&index.name) {
            continue;
        }
        let exists = current
            .indexes
            .iter()
            .any(|i| i.signature() == index.signature());
        if !exists {
            out.push(SchemaChange::AddIndex {
                table: desired.name.clone(),
                index: index.clone(),
            });
        }
    }
}

fn diff_foreign_keys(
    current: &Table,
    desired: &Table,
    filter: &AssetFilter,
    drop_out: &mut Vec<SchemaChange>,
    add_out: &mut Vec<SchemaChange>,
) {
    for fk in &desired.foreign_keys {
        if !filter.is_managed(&fk.name) {
            continue;
        }
        let exists = current
            .foreign_keys
            .iter()
            .any(|f| f.signature() == fk.signature());
        if !exists {
            add_out.push(SchemaChange::AddForeignKey {
                table: desired.name.clone(),
                foreign_key: fk.clone(),
            });
        }
    }
    for fk in &current.foreign_keys {
        if !filter.is_managed(&fk.name) {
            continue;
        }
        let wanted = desired
            .foreign_keys
            .iter()
            .any(|f| f.signature() == fk.signature());
        if !wanted {
            drop_out.push(SchemaChange::DropForeignKey {
                table: desired.name.clone(),
                name: fk.name.clone(),
            });
        }
    }
}
