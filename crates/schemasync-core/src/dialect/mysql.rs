//! MySQL family dialect.

use crate::dialect::DialectAdapter;
use crate::error::{Result, SchemaError};
use crate::schema::Column;
use crate::types::SemanticType;

/// Words that must be backtick-quoted when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "add", "all", "alter", "and", "as", "asc", "between", "by", "char", "column", "constraint",
    "create", "decimal", "default", "delete", "desc", "distinct", "drop", "exists", "foreign",
    "from", "group", "having", "in", "index", "insert", "int", "integer", "into", "is", "join",
    "key", "like", "limit", "not", "null", "numeric", "on", "or", "order", "primary", "references",
    "select", "set", "table", "union", "unique", "update", "values", "varchar", "where",
];

/// Dialect for the MySQL engine family: explicit charset/engine table
/// options, `TINYINT(1)` booleans, inline index declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates the dialect.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DialectAdapter for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn type_name(&self, ty: &SemanticType) -> Result<String> {
        Ok(match ty {
            SemanticType::SmallInt => "SMALLINT".to_string(),
            SemanticType::Integer => "INT".to_string(),
            SemanticType::BigInt => "BIGINT".to_string(),
            SemanticType::String(length) => format!("VARCHAR({length})"),
            SemanticType::Text => "LONGTEXT".to_string(),
            SemanticType::Decimal { precision, scale } => {
                format!("NUMERIC({precision}, {scale})")
            }
            SemanticType::Float => "FLOAT".to_string(),
            SemanticType::Double => "DOUBLE PRECISION".to_string(),
            SemanticType::Boolean => "TINYINT(1)".to_string(),
            SemanticType::Date => "DATE".to_string(),
            SemanticType::Time => "TIME".to_string(),
            SemanticType::DateTime => "DATETIME".to_string(),
            SemanticType::Blob => "LONGBLOB".to_string(),
            SemanticType::Json => "JSON".to_string(),
            SemanticType::Uuid => {
                return Err(SchemaError::UnsupportedType {
                    ty: ty.canonical_name().to_string(),
                    dialect: self.name(),
                })
            }
        })
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn is_reserved_word(&self, word: &str) -> bool {
        RESERVED_WORDS.contains(&word.to_ascii_lowercase().as_str())
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn table_options_clause(&self) -> &'static str {
        " DEFAULT CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE = InnoDB"
    }

    fn inline_index_declarations(&self) -> bool {
        true
    }

    fn alter_column_sql(&self, table: &str, column: &Column) -> Result<Vec<String>> {
        Ok(vec![format!(
            "ALTER TABLE {} CHANGE {} {}",
            self.quote_identifier(table),
            self.quote_identifier(&column.name),
            self.column_declaration(column)?
        )])
    }

    fn drop_index_sql(&self, table: &str, name: &str) -> String {
        format!(
            "DROP INDEX {} ON {}",
            self.quote_identifier(name),
            self.quote_identifier(table)
        )
    }

    fn drop_foreign_key_sql(&self, table: &str, name: &str) -> Vec<String> {
        vec![format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.quote_identifier(table),
            self.quote_identifier(name)
        )]
    }
}
