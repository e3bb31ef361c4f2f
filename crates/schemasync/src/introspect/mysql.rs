//! MySQL catalog introspection via `information_schema`.

use sqlx::MySqlPool;
use tracing::debug;

use schemasync_core::schema::{Column, ForeignKey, Index, SchemaModel, Table};
use schemasync_core::types::{DefaultValue, SemanticType};

use crate::error::{Result, SyncError};
use crate::introspect::{referential_action, Execute, Introspect};

/// Backend over a MySQL connection pool, scoped to the connection's
/// current database.
#[derive(Debug, Clone)]
pub struct MySqlBackend {
    pool: MySqlPool,
}

type ColumnRow = (
    String,         // COLUMN_NAME
    String,         // DATA_TYPE
    String,         // COLUMN_TYPE
    Option<i64>,    // CHARACTER_MAXIMUM_LENGTH
    Option<i64>,    // NUMERIC_PRECISION
    Option<i64>,    // NUMERIC_SCALE
    String,         // IS_NULLABLE
    Option<String>, // COLUMN_DEFAULT
    String,         // EXTRA
);

impl MySqlBackend {
    /// Creates a backend over the given pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn introspect_table(&self, name: &str) -> Result<Table> {
        let mut table = Table::new(name);

        let columns: Vec<ColumnRow> = sqlx::query_as(
            "SELECT COLUMN_NAME, DATA_TYPE, COLUMN_TYPE, \
                    CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED), \
                    CAST(NUMERIC_PRECISION AS SIGNED), \
                    CAST(NUMERIC_SCALE AS SIGNED), \
                    IS_NULLABLE, COLUMN_DEFAULT, EXTRA \
             FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
             ORDER BY ORDINAL_POSITION",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(SyncError::Introspection)?;

        for (column_name, data_type, column_type, length, precision, scale, is_nullable, default, extra) in
            columns
        {
            let semantic_type = map_column_type(&data_type, &column_type, length, precision, scale);
            let mut column = Column::new(column_name, semantic_type);
            column.nullable = is_nullable == "YES";
            column.default = parse_default(default.as_deref());
            column.auto_increment = extra.contains("auto_increment");
            table.columns.push(column);
        }

        let pk_columns: Vec<(String,)> = sqlx::query_as(
            "SELECT COLUMN_NAME FROM information_schema.KEY_COLUMN_USAGE \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
               AND CONSTRAINT_NAME = 'PRIMARY' \
             ORDER BY ORDINAL_POSITION",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(SyncError::Introspection)?;
        table.primary_key = pk_columns.into_iter().map(|(c,)| c).collect();

        // STATISTICS yields one row per index member; the implicit PRIMARY
        // index is an engine artifact and excluded.
        let index_rows: Vec<(String, i64, String)> = sqlx::query_as(
            "SELECT INDEX_NAME, CAST(NON_UNIQUE AS SIGNED), COLUMN_NAME \
             FROM information_schema.STATISTICS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
               AND INDEX_NAME <> 'PRIMARY' \
             ORDER BY INDEX_NAME, SEQ_IN_INDEX",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(SyncError::Introspection)?;
        for (index_name, non_unique, column) in index_rows {
            match table.indexes.iter_mut().find(|i| i.name == index_name) {
                Some(index) => index.columns.push(column),
                None => table.indexes.push(Index {
                    name: index_name,
                    columns: vec![column],
                    unique: non_unique == 0,
                }),
            }
        }

        let fk_rows: Vec<(String, String, String, String, String, String)> = sqlx::query_as(
            "SELECT kcu.CONSTRAINT_NAME, kcu.COLUMN_NAME, \
                    kcu.REFERENCED_TABLE_NAME, kcu.REFERENCED_COLUMN_NAME, \
                    rc.DELETE_RULE, rc.UPDATE_RULE \
             FROM information_schema.KEY_COLUMN_USAGE kcu \
             JOIN information_schema.REFERENTIAL_CONSTRAINTS rc \
               ON rc.CONSTRAINT_SCHEMA = kcu.CONSTRAINT_SCHEMA \
              AND rc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME \
             WHERE kcu.TABLE_SCHEMA = DATABASE() AND kcu.TABLE_NAME = ? \
               AND kcu.REFERENCED_TABLE_NAME IS NOT NULL \
             ORDER BY kcu.CONSTRAINT_NAME, kcu.ORDINAL_POSITION",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(SyncError::Introspection)?;
        for (constraint, column, referenced_table, referenced_column, delete_rule, update_rule) in
            fk_rows
        {
            match table.foreign_keys.iter_mut().find(|f| f.name == constraint) {
                Some(fk) => {
                    fk.columns.push(column);
                    fk.referenced_columns.push(referenced_column);
                }
                None => {
                    let mut fk = ForeignKey::new(
                        constraint,
                        vec![column],
                        referenced_table,
                        vec![referenced_column],
                    );
                    fk.on_delete = referential_action(&delete_rule);
                    fk.on_update = referential_action(&update_rule);
                    table.foreign_keys.push(fk);
                }
            }
        }

        Ok(table)
    }
}

impl Introspect for MySqlBackend {
    async fn introspect(&self) -> Result<SchemaModel> {
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT TABLE_NAME FROM information_schema.TABLES \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE' \
             ORDER BY TABLE_NAME",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SyncError::Introspection)?;

        let mut model = SchemaModel::new();
        for (name,) in tables {
            model.add_table(self.introspect_table(&name).await?);
        }
        debug!(tables = model.tables.len(), "introspected mysql schema");
        Ok(model)
    }
}

impl Execute for MySqlBackend {
    async fn execute(&self, sql: &str) -> Result<()> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}

/// Maps an `information_schema` column description back to its canonical
/// type. The inverse of the MySQL dialect's type mapping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn map_column_type(
    data_type: &str,
    column_type: &str,
    length: Option<i64>,
    precision: Option<i64>,
    scale: Option<i64>,
) -> SemanticType {
    match data_type {
        "tinyint" if column_type == "tinyint(1)" => SemanticType::Boolean,
        "tinyint" | "smallint" => SemanticType::SmallInt,
        "int" | "mediumint" => SemanticType::Integer,
        "bigint" => SemanticType::BigInt,
        "varchar" => SemanticType::String(length.unwrap_or(255) as u32),
        "char" if length == Some(36) => SemanticType::Uuid,
        "char" => SemanticType::String(length.unwrap_or(1) as u32),
        "text" | "mediumtext" | "longtext" | "tinytext" => SemanticType::Text,
        "decimal" | "numeric" => SemanticType::Decimal {
            precision: precision.unwrap_or(10) as u8,
            scale: scale.unwrap_or(0) as u8,
        },
        "float" => SemanticType::Float,
        "double" => SemanticType::Double,
        "date" => SemanticType::Date,
        "time" => SemanticType::Time,
        "datetime" | "timestamp" => SemanticType::DateTime,
        "blob" | "mediumblob" | "longblob" | "tinyblob" | "binary" | "varbinary" => {
            SemanticType::Blob
        }
        "json" => SemanticType::Json,
        other => {
            debug!(data_type = other, "unrecognized catalog type, treating as text");
            SemanticType::Text
        }
    }
}

fn parse_default(raw: Option<&str>) -> Option<DefaultValue> {
    let raw = raw?;
    if raw.eq_ignore_ascii_case("NULL") {
        return None;
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(DefaultValue::Integer(integer));
    }
    if let Ok(float) = raw.parse::<f64>() {
        return Some(DefaultValue::Float(float));
    }
    if raw.chars().all(|c| c.is_ascii_uppercase() || c == '_' || c == '(' || c == ')') {
        return Some(DefaultValue::Expression(raw.to_string()));
    }
    Some(DefaultValue::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_tinyint_maps_back_to_boolean() {
        assert_eq!(
            map_column_type("tinyint", "tinyint(1)", None, Some(3), Some(0)),
            SemanticType::Boolean
        );
        assert_eq!(
            map_column_type("tinyint", "tinyint(4)", None, Some(3), Some(0)),
            SemanticType::SmallInt
        );
    }

    #[test]
    fn parameterized_types_keep_their_parameters() {
        assert_eq!(
            map_column_type("varchar", "varchar(255)", Some(255), None, None),
            SemanticType::String(255)
        );
        assert_eq!(
            map_column_type("decimal", "decimal(5,2)", None, Some(5), Some(2)),
            SemanticType::Decimal {
                precision: 5,
                scale: 2
            }
        );
    }

    #[test]
    fn defaults_parse_like_the_catalog_reports_them() {
        assert_eq!(parse_default(Some("0")), Some(DefaultValue::Integer(0)));
        assert_eq!(
            parse_default(Some("CURRENT_TIMESTAMP")),
            Some(DefaultValue::Expression("CURRENT_TIMESTAMP".to_string()))
        );
        assert_eq!(
            parse_default(Some("pending")),
            Some(DefaultValue::String("pending".to_string()))
        );
        assert_eq!(parse_default(None), None);
    }
}
