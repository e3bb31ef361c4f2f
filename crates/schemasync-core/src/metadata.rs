//! Entity metadata and the target schema builder.
//!
//! Callers describe their entities with plain values (no reflection, no
//! annotation parsing) and [`build_schema`] turns that description into the
//! canonical [`SchemaModel`] the differ compares against the live database.
//! The build is pure and deterministic: equal metadata yields structurally
//! equal models.

use serde::{Deserialize, Serialize};

use crate::naming;
use crate::schema::{Column, ForeignKey, ForeignKeyAction, Index, SchemaModel, Table};
use crate::types::{DefaultValue, SemanticType};

/// A scalar field mapped to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Column name.
    pub column: String,
    /// Column type.
    pub semantic_type: SemanticType,
    /// Whether NULL is allowed.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the field carries a unique constraint.
    #[serde(default)]
    pub unique: bool,
    /// Whether the field is part of the identifier (primary key).
    #[serde(default)]
    pub id: bool,
    /// Whether the identifier value is database-generated.
    #[serde(default)]
    pub generated: bool,
    /// Default value, if any.
    #[serde(default)]
    pub default: Option<DefaultValue>,
}

impl FieldMetadata {
    /// Creates a NOT NULL, non-unique, non-identifier field.
    #[must_use]
    pub fn new(column: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            column: column.into(),
            semantic_type,
            nullable: false,
            unique: false,
            id: false,
            generated: false,
            default: None,
        }
    }

    /// Marks the field nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the field unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the field as a database-generated identifier.
    #[must_use]
    pub fn generated_id(mut self) -> Self {
        self.id = true;
        self.generated = true;
        self
    }

    /// Marks the field as an identifier with a caller-assigned value.
    #[must_use]
    pub fn assigned_id(mut self) -> Self {
        self.id = true;
        self
    }

    /// Sets a default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// One side of an association: a referencing column and its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinColumn {
    /// Referencing column name.
    pub column: String,
    /// Referenced table name.
    pub referenced_table: String,
    /// Referenced column name.
    pub referenced_column: String,
    /// Referencing column type (matches the referenced column's type).
    pub semantic_type: SemanticType,
    /// Whether the referencing column is nullable.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the association is one-to-one (unique referencing column).
    #[serde(default)]
    pub unique: bool,
}

impl JoinColumn {
    /// Creates a nullable, non-unique join column.
    #[must_use]
    pub fn new(
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
        semantic_type: SemanticType,
    ) -> Self {
        Self {
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            semantic_type,
            nullable: true,
            unique: false,
        }
    }

    /// Marks the join column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the association one-to-one.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// An association owned by an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationMetadata {
    /// Many-to-one or one-to-one: a join column on the entity's own table.
    ToOne {
        /// The referencing column.
        join_column: JoinColumn,
        /// ON DELETE action, if any.
        #[serde(default)]
        on_delete: Option<ForeignKeyAction>,
    },
    /// Many-to-many: a dedicated join table with one column per side.
    ManyToMany {
        /// Join table name.
        join_table: String,
        /// Column referencing the owning entity's table.
        owner: JoinColumn,
        /// Column referencing the target entity's table.
        inverse: JoinColumn,
    },
}

/// Normalized description of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Entity name, for diagnostics only.
    pub entity: String,
    /// Mapped table name. `None` means the entity maps to no table (for
    /// example an abstract superclass) and contributes nothing.
    pub table: Option<String>,
    /// Scalar fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
    /// Associations in declaration order.
    #[serde(default)]
    pub associations: Vec<AssociationMetadata>,
}

impl EntityMetadata {
    /// Creates an entity mapped to the given table.
    #[must_use]
    pub fn new(entity: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            table: Some(table.into()),
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Creates an entity mapped to no table.
    #[must_use]
    pub fn unmapped(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            table: None,
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends an association.
    #[must_use]
    pub fn association(mut self, association: AssociationMetadata) -> Self {
        self.associations.push(association);
        self
    }
}

/// Builds the desired schema model from entity metadata.
///
/// Each mapped entity contributes its own table followed by the join tables
/// of its many-to-many associations, preserving declaration order throughout.
#[must_use]
pub fn build_schema(entities: &[EntityMetadata]) -> SchemaModel {
    let mut model = SchemaModel::new();

    for entity in entities {
        let Some(table_name) = &entity.table else {
            tracing::debug!(entity = %entity.entity, "entity maps to no table, skipped");
            continue;
        };

        model.add_table(build_entity_table(table_name, entity));

        for association in &entity.associations {
            if let AssociationMetadata::ManyToMany {
                join_table,
                owner,
                inverse,
            } = association
            {
                model.add_table(build_join_table(join_table, owner, inverse));
            }
        }
    }

    model
}

fn build_entity_table(table_name: &str, entity: &EntityMetadata) -> Table {
    let mut table = Table::new(table_name);
    let mut primary_key = Vec::new();

    for field in &entity.fields {
        let mut column = Column::new(&field.column, field.semantic_type.clone());
        column.nullable = field.nullable;
        column.default = field.default.clone();
        column.auto_increment = field.generated;
        table.columns.push(column);

        if field.id {
            primary_key.push(field.column.clone());
        }
        if field.unique {
            let name = naming::unique_index_name(table_name, &[&field.column]);
            table.indexes.push(Index::unique(name, vec![field.column.clone()]));
        }
    }

    for association in &entity.associations {
        if let AssociationMetadata::ToOne {
            join_column,
            on_delete,
        } = association
        {
            let mut column = Column::new(&join_column.column, join_column.semantic_type.clone());
            column.nullable = join_column.nullable;
            table.columns.push(column);

            let columns = vec![join_column.column.clone()];
            let index = if join_column.unique {
                let name = naming::unique_index_name(table_name, &[&join_column.column]);
                Index::unique(name, columns.clone())
            } else {
                let name = naming::index_name(table_name, &[&join_column.column]);
                Index::new(name, columns.clone())
            };
            table.indexes.push(index);

            let mut foreign_key = ForeignKey::new(
                naming::foreign_key_name(table_name, &[&join_column.column]),
                columns,
                join_column.referenced_table.clone(),
                vec![join_column.referenced_column.clone()],
            );
            foreign_key.on_delete = *on_delete;
            table.foreign_keys.push(foreign_key);
        }
    }

    table.primary_key = primary_key;
    table
}

fn build_join_table(join_table: &str, owner: &JoinColumn, inverse: &JoinColumn) -> Table {
    let mut table = Table::new(join_table);

    for side in [owner, inverse] {
        let mut column = Column::new(&side.column, side.semantic_type.clone());
        column.nullable = false;
        table.columns.push(column);

        table.indexes.push(Index::new(
            naming::index_name(join_table, &[&side.column]),
            vec![side.column.clone()],
        ));
        table.foreign_keys.push(ForeignKey::new(
            naming::foreign_key_name(join_table, &[&side.column]),
            vec![side.column.clone()],
            side.referenced_table.clone(),
            vec![side.referenced_column.clone()],
        ));
    }

    table.primary_key = vec![owner.column.clone(), inverse.column.clone()];
    table
}
