//! Dialect adapters.
//!
//! A [`DialectAdapter`] maps canonical types and change operations onto one
//! engine family's literal SQL. Dialects are selected by configuration, not
//! inheritance: shared rendering lives in default trait methods, each engine
//! overrides only what differs.

mod mysql;
mod sqlite;

pub use mysql::MySqlDialect;
pub use sqlite::SqliteDialect;

use crate::error::Result;
use crate::schema::{Column, ForeignKey, Index, Table};
use crate::types::SemanticType;

/// Per-engine SQL generation rules.
///
/// All methods are pure; statement execution belongs to the caller.
pub trait DialectAdapter: Send + Sync {
    /// Dialect name for diagnostics and error messages.
    fn name(&self) -> &'static str;

    /// Maps a canonical type to its SQL type name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError::UnsupportedType`] when the type has no
    /// mapping for this dialect.
    fn type_name(&self, ty: &SemanticType) -> Result<String>;

    /// Identifier quote character.
    fn quote_char(&self) -> char;

    /// Returns whether `word` is reserved and must be quoted.
    fn is_reserved_word(&self, word: &str) -> bool;

    /// Keyword that makes a column auto-increment.
    fn auto_increment_keyword(&self) -> &'static str;

    /// Suffix appended to every CREATE TABLE statement (storage engine,
    /// charset). Empty for engines without table options.
    fn table_options_clause(&self) -> &'static str {
        ""
    }

    /// Whether schema-qualified (namespaced) table names are supported.
    /// Changes touching namespaced tables are skipped when this is false.
    fn supports_schemas(&self) -> bool {
        false
    }

    /// Whether indexes are declared inline in CREATE TABLE. When false,
    /// table creation emits separate CREATE INDEX statements.
    fn inline_index_declarations(&self) -> bool {
        false
    }

    /// Whether foreign key constraints can be added to and dropped from an
    /// existing table.
    fn supports_foreign_key_constraints(&self) -> bool {
        true
    }

    /// Whether an existing column can be redefined in place.
    fn supports_column_rewrite(&self) -> bool {
        true
    }

    /// Quotes an identifier only when required (reserved word or characters
    /// outside the plain identifier set).
    fn quote_identifier(&self, name: &str) -> String {
        let plain = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if plain && !self.is_reserved_word(name) {
            return name.to_string();
        }
        let quote = self.quote_char();
        let escaped = name.replace(quote, &quote.to_string().repeat(2));
        format!("{quote}{escaped}{quote}")
    }

    /// Renders one column declaration fragment.
    ///
    /// # Errors
    ///
    /// Propagates type mapping failures.
    fn column_declaration(&self, column: &Column) -> Result<String> {
        let mut sql = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            self.type_name(&column.semantic_type)?
        );
        if column.auto_increment {
            sql.push(' ');
            sql.push_str(self.auto_increment_keyword());
        }
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        } else if column.nullable {
            sql.push_str(" DEFAULT NULL");
        }
        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
        Ok(sql)
    }

    /// Renders table creation. Indexes are inlined or split into follow-up
    /// statements depending on [`Self::inline_index_declarations`]; foreign
    /// keys never appear here.
    ///
    /// # Errors
    ///
    /// Propagates type mapping failures.
    fn create_table_sql(&self, table: &Table) -> Result<Vec<String>> {
        let mut parts = Vec::with_capacity(table.columns.len() + table.indexes.len() + 1);
        for column in &table.columns {
            parts.push(self.column_declaration(column)?);
        }
        if self.inline_index_declarations() {
            for index in &table.indexes {
                let keyword = if index.unique { "UNIQUE INDEX" } else { "INDEX" };
                parts.push(format!(
                    "{keyword} {} ({})",
                    self.quote_identifier(&index.name),
                    self.column_list(&index.columns)
                ));
            }
        }
        if !table.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY({})", self.column_list(&table.primary_key)));
        }

        let mut statements = vec![format!(
            "CREATE TABLE {} ({}){}",
            self.quote_identifier(&table.name),
            parts.join(", "),
            self.table_options_clause()
        )];
        if !self.inline_index_declarations() {
            for index in &table.indexes {
                statements.push(self.create_index_sql(&table.name, index));
            }
        }
        Ok(statements)
    }

    /// Renders a comma-separated quoted column list.
    fn column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders column addition.
    ///
    /// # Errors
    ///
    /// Propagates type mapping failures.
    fn add_column_sql(&self, table: &str, column: &Column) -> Result<Vec<String>> {
        Ok(vec![format!(
            "ALTER TABLE {} ADD {}",
            self.quote_identifier(table),
            self.column_declaration(column)?
        )])
    }

    /// Renders an in-place column redefinition.
    ///
    /// # Errors
    ///
    /// Propagates type mapping failures.
    fn alter_column_sql(&self, table: &str, column: &Column) -> Result<Vec<String>>;

    /// Renders column removal.
    fn drop_column_sql(&self, table: &str, column: &str) -> Vec<String> {
        vec![format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_identifier(table),
            self.quote_identifier(column)
        )]
    }

    /// Renders standalone index creation.
    fn create_index_sql(&self, table: &str, index: &Index) -> String {
        let unique = if index.unique { "UNIQUE " } else { "" };
        format!(
            "CREATE {unique}INDEX {} ON {} ({})",
            self.quote_identifier(&index.name),
            self.quote_identifier(table),
            self.column_list(&index.columns)
        )
    }

    /// Renders index removal.
    fn drop_index_sql(&self, table: &str, name: &str) -> String {
        let _ = table;
        format!("DROP INDEX {}", self.quote_identifier(name))
    }

    /// Renders foreign key addition. Dialects without post-hoc constraint
    /// support return no statements.
    fn add_foreign_key_sql(&self, table: &str, foreign_key: &ForeignKey) -> Vec<String> {
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_identifier(table),
            self.quote_identifier(&foreign_key.name),
            self.column_list(&foreign_key.columns),
            self.quote_identifier(&foreign_key.referenced_table),
            self.column_list(&foreign_key.referenced_columns)
        );
        if let Some(action) = foreign_key.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = foreign_key.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        vec![sql]
    }

    /// Renders foreign key removal.
    fn drop_foreign_key_sql(&self, table: &str, name: &str) -> Vec<String> {
        vec![format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.quote_identifier(table),
            self.quote_identifier(name)
        )]
    }

    /// Renders table removal.
    fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quote_identifier(table))
    }
}
