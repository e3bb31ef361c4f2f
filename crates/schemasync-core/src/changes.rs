//! Atomic schema change operations.
//!
//! A [`ChangeSet`] is the ordered output of one diff call and the input to
//! the SQL emitter. It is produced once and consumed once, never persisted.

use serde::{Deserialize, Serialize};

use crate::schema::{Column, ForeignKey, Index, Table};

/// One atomic structural change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaChange {
    /// Create a table with its columns and indexes. Foreign keys are never
    /// carried here; they arrive as separate [`SchemaChange::AddForeignKey`]
    /// changes so forward references resolve.
    CreateTable(Table),
    /// Drop a table.
    DropTable {
        /// Table name.
        name: String,
    },
    /// Add a column to an existing table.
    AddColumn {
        /// Owning table.
        table: String,
        /// Column to add.
        column: Column,
    },
    /// Change an existing column to a new definition.
    AlterColumn {
        /// Owning table.
        table: String,
        /// Desired column definition.
        column: Column,
    },
    /// Remove a column.
    DropColumn {
        /// Owning table.
        table: String,
        /// Column name.
        column: String,
    },
    /// Add an index.
    AddIndex {
        /// Owning table.
        table: String,
        /// Index to add.
        index: Index,
    },
    /// Remove an index.
    DropIndex {
        /// Owning table.
        table: String,
        /// Index name.
        name: String,
    },
    /// Add a foreign key constraint.
    AddForeignKey {
        /// Owning table.
        table: String,
        /// Constraint to add.
        foreign_key: ForeignKey,
    },
    /// Remove a foreign key constraint.
    DropForeignKey {
        /// Owning table.
        table: String,
        /// Constraint name.
        name: String,
    },
}

impl SchemaChange {
    /// Returns the name of the table this change operates on.
    #[must_use]
    pub fn table_name(&self) -> &str {
        match self {
            Self::CreateTable(table) => &table.name,
            Self::DropTable { name } => name,
            Self::AddColumn { table, .. }
            | Self::AlterColumn { table, .. }
            | Self::DropColumn { table, .. }
            | Self::AddIndex { table, .. }
            | Self::DropIndex { table, .. }
            | Self::AddForeignKey { table, .. }
            | Self::DropForeignKey { table, .. } => table,
        }
    }
}

/// Ordered list of schema changes produced by one diff call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Changes in emission order.
    pub changes: Vec<SchemaChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the change set holds no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Appends a change.
    pub fn push(&mut self, change: SchemaChange) {
        self.changes.push(change);
    }

    /// Iterates over the changes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SchemaChange> {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = SchemaChange;
    type IntoIter = std::vec::IntoIter<SchemaChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a SchemaChange;
    type IntoIter = std::slice::Iter<'a, SchemaChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SemanticType;

    #[test]
    fn table_name_covers_every_variant() {
        let change = SchemaChange::AddColumn {
            table: "users".to_string(),
            column: Column::new("age", SemanticType::Integer),
        };
        assert_eq!(change.table_name(), "users");

        let change = SchemaChange::CreateTable(Table::new("posts"));
        assert_eq!(change.table_name(), "posts");
    }

    #[test]
    fn change_set_preserves_order() {
        let mut set = ChangeSet::new();
        assert!(set.is_empty());
        set.push(SchemaChange::DropTable {
            name: "a".to_string(),
        });
        set.push(SchemaChange::DropTable {
            name: "b".to_string(),
        });
        assert_eq!(set.len(), 2);
        let names: Vec<_> = set.iter().map(SchemaChange::table_name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
