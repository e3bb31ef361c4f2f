//! Canonical schema model.
//!
//! These types form the dialect-neutral representation of a database schema.
//! Both the introspectors (reading a live catalog) and the target schema
//! builder (reading entity metadata) produce a [`SchemaModel`], which the
//! differ then compares structurally.

use serde::{Deserialize, Serialize};

use crate::types::{DefaultValue, SemanticType};

/// Foreign key referential action (ON DELETE, ON UPDATE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict.
    Restrict,
    /// Cascade to referencing rows.
    Cascade,
    /// Set the referencing column to NULL.
    SetNull,
    /// Set the referencing column to its default.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL keyword sequence for this action.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A single column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Canonical type, carrying any length/precision parameters.
    pub semantic_type: SemanticType,
    /// Whether NULL values are allowed.
    pub nullable: bool,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
}

impl Column {
    /// Creates a nullable column with no default.
    #[must_use]
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            nullable: true,
            default: None,
            auto_increment: false,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets a default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the column auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Returns whether two columns differ in any compared field.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.semantic_type != other.semantic_type
            || self.nullable != other.nullable
            || self.default != other.default
            || self.auto_increment != other.auto_increment
    }
}

/// An index over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name (deterministically derived when built from metadata).
    pub name: String,
    /// Ordered column list.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

impl Index {
    /// Creates a non-unique index.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: false,
        }
    }

    /// Creates a unique index.
    #[must_use]
    pub fn unique(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: true,
        }
    }

    /// Normalized comparison signature: column list plus uniqueness.
    ///
    /// Indexes are compared by signature, never by name, so a renamed but
    /// otherwise identical index is a no-op in the diff.
    #[must_use]
    pub fn signature(&self) -> (Vec<String>, bool) {
        (self.columns.clone(), self.unique)
    }
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name (deterministically derived when built from metadata).
    pub name: String,
    /// Local column list.
    pub columns: Vec<String>,
    /// Referenced table name.
    pub referenced_table: String,
    /// Referenced column list.
    pub referenced_columns: Vec<String>,
    /// ON DELETE action, if any.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action, if any.
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKey {
    /// Creates a foreign key with no referential actions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        referenced_table: impl Into<String>,
        referenced_columns: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            referenced_table: referenced_table.into(),
            referenced_columns,
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Normalized comparison signature: local columns plus referenced
    /// table/columns. Compared instead of names for the same reason as
    /// [`Index::signature`].
    #[must_use]
    pub fn signature(&self) -> (Vec<String>, String, Vec<String>) {
        (
            self.columns.clone(),
            self.referenced_table.clone(),
            self.referenced_columns.clone(),
        )
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, optionally schema-qualified as `schema.table`.
    pub name: String,
    /// Ordered column list.
    pub columns: Vec<Column>,
    /// Primary key column names. Must reference existing columns.
    pub primary_key: Vec<String>,
    /// Secondary indexes.
    pub indexes: Vec<Index>,
    /// Foreign key constraints.
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key column list.
    #[must_use]
    pub fn primary_key(mut self, columns: Vec<String>) -> Self {
        self.primary_key = columns;
        self
    }

    /// Appends an index.
    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Appends a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns whether the table name is schema-qualified.
    #[must_use]
    pub fn is_namespaced(&self) -> bool {
        is_qualified(&self.name)
    }
}

/// Returns whether an asset name is schema-qualified (`schema.name`).
#[must_use]
pub fn is_qualified(name: &str) -> bool {
    name.contains('.')
}

/// An immutable snapshot of a database schema.
///
/// Tables keep their insertion order so generated DDL follows the order the
/// caller (or the catalog) supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Tables in insertion order. Names are unique.
    pub tables: Vec<Table>,
}

impl SchemaModel {
    /// Creates an empty schema model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Appends a table in place.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns whether a table with the given name exists.
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.get_table(name).is_some()
    }

    /// Returns whether the model holds no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_table() -> Table {
        Table::new("users")
            .column(Column::new("id", SemanticType::Integer).not_null().auto_increment())
            .column(Column::new("email", SemanticType::String(255)).not_null())
            .primary_key(vec!["id".to_string()])
            .index(Index::unique("UNIQ_users_email", vec!["email".to_string()]))
    }

    #[test]
    fn table_builder_assembles_parts() {
        let table = users_table();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.primary_key, vec!["id"]);
        assert!(table.indexes[0].unique);
        assert!(table.get_column("email").is_some());
        assert!(table.get_column("missing").is_none());
    }

    #[test]
    fn column_difference_is_field_by_field() {
        let a = Column::new("age", SemanticType::Integer).not_null();
        let mut b = a.clone();
        assert!(!a.differs_from(&b));
        b.nullable = true;
        assert!(a.differs_from(&b));
    }

    #[test]
    fn index_signature_ignores_name() {
        let a = Index::unique("UNIQ_one", vec!["email".to_string()]);
        let b = Index::unique("UNIQ_two", vec!["email".to_string()]);
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn foreign_key_signature_ignores_name_and_actions() {
        let a = ForeignKey::new(
            "FK_one",
            vec!["user_id".to_string()],
            "users",
            vec!["id".to_string()],
        );
        let b = ForeignKey::new(
            "FK_two",
            vec!["user_id".to_string()],
            "users",
            vec!["id".to_string()],
        )
        .on_delete(ForeignKeyAction::Cascade);
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn namespaced_names_are_detected() {
        assert!(Table::new("archive.events").is_namespaced());
        assert!(!users_table().is_namespaced());
    }

    #[test]
    fn model_preserves_insertion_order() {
        let model = SchemaModel::new()
            .table(Table::new("b"))
            .table(Table::new("a"));
        let names: Vec<_> = model.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(model.has_table("a"));
        assert!(!model.has_table("c"));
    }
}
