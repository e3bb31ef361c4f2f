//! SQLite family dialect.

use tracing::warn;

use crate::dialect::DialectAdapter;
use crate::error::{Result, SchemaError};
use crate::schema::{Column, ForeignKey, Table};
use crate::types::SemanticType;

/// Words that must be double-quoted when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "abort", "add", "all", "alter", "and", "as", "asc", "autoincrement", "between", "by",
    "cascade", "check", "collate", "column", "commit", "constraint", "create", "default",
    "delete", "desc", "distinct", "drop", "exists", "foreign", "from", "group", "having", "in",
    "index", "insert", "into", "is", "join", "key", "like", "limit", "not", "null", "on", "or",
    "order", "primary", "references", "select", "set", "table", "transaction", "union", "unique",
    "update", "values", "where",
];

/// Dialect for the SQLite engine family: no table options, no namespaced
/// tables, indexes created with standalone statements, constraints fixed at
/// table creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates the dialect.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// A single integer auto-increment primary key must be declared inline
    /// so it aliases the rowid.
    fn rowid_primary_key<'a>(table: &'a Table) -> Option<&'a Column> {
        let [pk_column] = table.primary_key.as_slice() else {
            return None;
        };
        table
            .get_column(pk_column)
            .filter(|c| c.auto_increment && c.semantic_type.is_integer())
    }
}

impl DialectAdapter for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn type_name(&self, ty: &SemanticType) -> Result<String> {
        Ok(match ty {
            SemanticType::SmallInt => "SMALLINT".to_string(),
            SemanticType::Integer => "INTEGER".to_string(),
            SemanticType::BigInt => "BIGINT".to_string(),
            SemanticType::String(length) => format!("VARCHAR({length})"),
            SemanticType::Text => "CLOB".to_string(),
            SemanticType::Decimal { precision, scale } => {
                format!("NUMERIC({precision}, {scale})")
            }
            SemanticType::Float => "FLOAT".to_string(),
            SemanticType::Double => "DOUBLE PRECISION".to_string(),
            SemanticType::Boolean => "BOOLEAN".to_string(),
            SemanticType::Date => "DATE".to_string(),
            SemanticType::Time => "TIME".to_string(),
            SemanticType::DateTime => "DATETIME".to_string(),
            SemanticType::Blob => "BLOB".to_string(),
            SemanticType::Uuid => "CHAR(36)".to_string(),
            SemanticType::Json => {
                return Err(SchemaError::UnsupportedType {
                    ty: ty.canonical_name().to_string(),
                    dialect: self.name(),
                })
            }
        })
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn is_reserved_word(&self, word: &str) -> bool {
        RESERVED_WORDS.contains(&word.to_ascii_lowercase().as_str())
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTOINCREMENT"
    }

    fn supports_foreign_key_constraints(&self) -> bool {
        false
    }

    fn supports_column_rewrite(&self) -> bool {
        false
    }

    fn create_table_sql(&self, table: &Table) -> Result<Vec<String>> {
        let rowid_pk = Self::rowid_primary_key(table);
        let mut parts = Vec::with_capacity(table.columns.len() + 1);

        for column in &table.columns {
            if rowid_pk.is_some_and(|pk| pk.name == column.name) {
                parts.push(format!(
                    "{} INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL",
                    self.quote_identifier(&column.name)
                ));
            } else {
                parts.push(self.column_declaration(column)?);
            }
        }
        if rowid_pk.is_none() && !table.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY({})", self.column_list(&table.primary_key)));
        }

        let mut statements = vec![format!(
            "CREATE TABLE {} ({})",
            self.quote_identifier(&table.name),
            parts.join(", ")
        )];
        for index in &table.indexes {
            statements.push(self.create_index_sql(&table.name, index));
        }
        Ok(statements)
    }

    fn add_column_sql(&self, table: &str, column: &Column) -> Result<Vec<String>> {
        Ok(vec![format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.quote_identifier(table),
            self.column_declaration(column)?
        )])
    }

    fn alter_column_sql(&self, table: &str, column: &Column) -> Result<Vec<String>> {
        warn!(
            table,
            column = %column.name,
            "sqlite cannot redefine a column in place, change skipped"
        );
        Ok(Vec::new())
    }

    fn add_foreign_key_sql(&self, table: &str, foreign_key: &ForeignKey) -> Vec<String> {
        warn!(
            table,
            constraint = %foreign_key.name,
            "sqlite cannot add a constraint to an existing table, change skipped"
        );
        Vec::new()
    }

    fn drop_foreign_key_sql(&self, table: &str, name: &str) -> Vec<String> {
        warn!(
            table,
            constraint = name,
            "sqlite cannot drop a constraint, change skipped"
        );
        Vec::new()
    }
}
