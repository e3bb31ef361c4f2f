//! SQLite catalog introspection.

use sqlx::SqlitePool;
use tracing::debug;

use schemasync_core::naming;
use schemasync_core::schema::{Column, ForeignKey, Index, SchemaModel, Table};
use schemasync_core::types::{DefaultValue, SemanticType};

use crate::error::{Result, SyncError};
use crate::introspect::{referential_action, Execute, Introspect};

/// Backend over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Creates a backend over the given pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn introspect_table(&self, name: &str, create_sql: &str) -> Result<Table> {
        let mut table = Table::new(name);
        let quoted = quote(name);
        let has_autoincrement = create_sql.to_uppercase().contains("AUTOINCREMENT");

        let columns: Vec<(i64, String, String, i64, Option<String>, i64)> =
            sqlx::query_as(&format!("PRAGMA table_info({quoted})"))
                .fetch_all(&self.pool)
                .await
                .map_err(SyncError::Introspection)?;

        let mut pk_columns: Vec<(i64, String)> = Vec::new();
        for (_cid, column_name, declared_type, not_null, default, pk) in columns {
            let mut column = Column::new(&column_name, parse_declared_type(&declared_type));
            column.nullable = not_null == 0;
            column.default = parse_default(default.as_deref());
            if pk > 0 {
                column.auto_increment = has_autoincrement;
                pk_columns.push((pk, column_name));
            }
            table.columns.push(column);
        }
        pk_columns.sort_by_key(|(ordinal, _)| *ordinal);
        table.primary_key = pk_columns.into_iter().map(|(_, name)| name).collect();

        let indexes: Vec<(i64, String, i64, String, i64)> =
            sqlx::query_as(&format!("PRAGMA index_list({quoted})"))
                .fetch_all(&self.pool)
                .await
                .map_err(SyncError::Introspection)?;
        for (_seq, index_name, unique, origin, _partial) in indexes {
            // Implicit indexes backing the primary key or inline UNIQUE
            // column constraints are engine artifacts, not managed assets.
            if origin == "pk" || index_name.starts_with("sqlite_autoindex_") {
                continue;
            }
            let members: Vec<(i64, i64, Option<String>)> =
                sqlx::query_as(&format!("PRAGMA index_info({})", quote(&index_name)))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(SyncError::Introspection)?;
            let columns: Vec<String> = members
                .into_iter()
                .filter_map(|(_, _, column)| column)
                .collect();
            table.indexes.push(Index {
                name: index_name,
                columns,
                unique: unique != 0,
            });
        }

        let fk_rows: Vec<(i64, i64, String, String, Option<String>, String, String, String)> =
            sqlx::query_as(&format!("PRAGMA foreign_key_list({quoted})"))
                .fetch_all(&self.pool)
                .await
                .map_err(SyncError::Introspection)?;
        let mut current_id: Option<i64> = None;
        for (id, _seq, referenced_table, from, to, on_update, on_delete, _match) in fk_rows {
            // Rows are grouped by constraint id, one row per column pair.
            if current_id == Some(id) {
                if let Some(fk) = table.foreign_keys.last_mut() {
                    fk.columns.push(from);
                    fk.referenced_columns.push(to.unwrap_or_default());
                }
            } else {
                current_id = Some(id);
                // SQLite constraints are anonymous; synthesize the
                // deterministic name so drops can address them. Diffing is
                // by signature, so the name itself never causes churn.
                let mut fk = ForeignKey::new(
                    naming::foreign_key_name(name, &[&from]),
                    vec![from],
                    referenced_table,
                    vec![to.unwrap_or_default()],
                );
                fk.on_delete = referential_action(&on_delete);
                fk.on_update = referential_action(&on_update);
                table.foreign_keys.push(fk);
            }
        }

        Ok(table)
    }
}

impl Introspect for SqliteBackend {
    async fn introspect(&self) -> Result<SchemaModel> {
        let tables: Vec<(String, Option<String>)> = sqlx::query_as(
            "SELECT name, sql FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SyncError::Introspection)?;

        let mut model = SchemaModel::new();
        for (name, create_sql) in tables {
            let table = self
                .introspect_table(&name, create_sql.as_deref().unwrap_or_default())
                .await?;
            model.add_table(table);
        }
        debug!(tables = model.tables.len(), "introspected sqlite schema");
        Ok(model)
    }
}

impl Execute for SqliteBackend {
    async fn execute(&self, sql: &str) -> Result<()> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Maps a declared column type back to its canonical type.
///
/// This is the inverse of the SQLite dialect's type mapping; declared types
/// it never emits fall back to text so foreign catalogs still introspect.
fn parse_declared_type(declared: &str) -> SemanticType {
    let normalized = declared.trim().to_uppercase();
    if let Some(length) = parse_parameter(&normalized, "VARCHAR") {
        return SemanticType::String(length);
    }
    if normalized == "CHAR(36)" {
        return SemanticType::Uuid;
    }
    if let Some((precision, scale)) = parse_pair(&normalized, "NUMERIC")
        .or_else(|| parse_pair(&normalized, "DECIMAL"))
    {
        return SemanticType::Decimal { precision, scale };
    }
    match normalized.as_str() {
        "SMALLINT" | "TINYINT" => SemanticType::SmallInt,
        "INT" | "INTEGER" | "MEDIUMINT" => SemanticType::Integer,
        "BIGINT" | "INT8" => SemanticType::BigInt,
        "BOOLEAN" | "BOOL" => SemanticType::Boolean,
        "CLOB" | "TEXT" => SemanticType::Text,
        "FLOAT" => SemanticType::Float,
        "DOUBLE" | "DOUBLE PRECISION" | "REAL" => SemanticType::Double,
        "DATE" => SemanticType::Date,
        "TIME" => SemanticType::Time,
        "DATETIME" | "TIMESTAMP" => SemanticType::DateTime,
        "BLOB" | "" => SemanticType::Blob,
        other => {
            debug!(declared = other, "unrecognized declared type, treating as text");
            SemanticType::Text
        }
    }
}

fn parse_parameter(normalized: &str, keyword: &str) -> Option<u32> {
    let rest = normalized.strip_prefix(keyword)?;
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    inner.trim().parse().ok()
}

fn parse_pair(normalized: &str, keyword: &str) -> Option<(u8, u8)> {
    let rest = normalized.strip_prefix(keyword)?;
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    let (precision, scale) = inner.split_once(',')?;
    Some((precision.trim().parse().ok()?, scale.trim().parse().ok()?))
}

fn parse_default(raw: Option<&str>) -> Option<DefaultValue> {
    let raw = raw?;
    if raw.eq_ignore_ascii_case("NULL") {
        return None;
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        let inner = raw[1..raw.len() - 1].replace("''", "'");
        return Some(DefaultValue::String(inner));
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(DefaultValue::Integer(integer));
    }
    if let Ok(float) = raw.parse::<f64>() {
        return Some(DefaultValue::Float(float));
    }
    Some(DefaultValue::Expression(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemasync_core::schema::ForeignKeyAction;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_backend() -> SqliteBackend {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteBackend::new(pool)
    }

    #[test]
    fn declared_types_round_trip() {
        assert_eq!(parse_declared_type("VARCHAR(255)"), SemanticType::String(255));
        assert_eq!(
            parse_declared_type("NUMERIC(5, 2)"),
            SemanticType::Decimal {
                precision: 5,
                scale: 2
            }
        );
        assert_eq!(parse_declared_type("INTEGER"), SemanticType::Integer);
        assert_eq!(parse_declared_type("CLOB"), SemanticType::Text);
        assert_eq!(parse_declared_type("CHAR(36)"), SemanticType::Uuid);
        assert_eq!(parse_declared_type("something_custom"), SemanticType::Text);
    }

    #[test]
    fn defaults_parse_to_values() {
        assert_eq!(parse_default(None), None);
        assert_eq!(parse_default(Some("NULL")), None);
        assert_eq!(
            parse_default(Some("'it''s'")),
            Some(DefaultValue::String("it's".to_string()))
        );
        assert_eq!(parse_default(Some("42")), Some(DefaultValue::Integer(42)));
        assert_eq!(
            parse_default(Some("CURRENT_TIMESTAMP")),
            Some(DefaultValue::Expression("CURRENT_TIMESTAMP".to_string()))
        );
    }

    #[tokio::test]
    async fn introspects_tables_columns_and_indexes() {
        let backend = memory_backend().await;
        backend
            .execute(
                "CREATE TABLE my_entity (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
                 name VARCHAR(100) DEFAULT NULL)",
            )
            .await
            .unwrap();
        backend
            .execute("CREATE UNIQUE INDEX UNIQ_entity_name ON my_entity (name)")
            .await
            .unwrap();

        let model = backend.introspect().await.unwrap();
        let table = model.get_table("my_entity").unwrap();

        assert_eq!(table.primary_key, vec!["id"]);
        let id = table.get_column("id").unwrap();
        assert!(id.auto_increment);
        assert!(!id.nullable);
        let name = table.get_column("name").unwrap();
        assert_eq!(name.semantic_type, SemanticType::String(100));
        assert!(name.nullable);
        assert_eq!(table.indexes.len(), 1);
        assert!(table.indexes[0].unique);
        assert_eq!(table.indexes[0].columns, vec!["name"]);
    }

    #[tokio::test]
    async fn primary_key_artifacts_are_excluded() {
        let backend = memory_backend().await;
        backend
            .execute("CREATE TABLE link (a_id INTEGER NOT NULL, b_id INTEGER NOT NULL, PRIMARY KEY(a_id, b_id))")
            .await
            .unwrap();

        let model = backend.introspect().await.unwrap();
        let table = model.get_table("link").unwrap();
        assert_eq!(table.primary_key, vec!["a_id", "b_id"]);
        assert!(table.indexes.is_empty());
    }

    #[tokio::test]
    async fn inline_foreign_keys_get_synthesized_names() {
        let backend = memory_backend().await;
        backend
            .execute("CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL)")
            .await
            .unwrap();
        backend
            .execute(
                "CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
                 user_id INTEGER, FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE)",
            )
            .await
            .unwrap();

        let model = backend.introspect().await.unwrap();
        let posts = model.get_table("posts").unwrap();
        assert_eq!(posts.foreign_keys.len(), 1);
        let fk = &posts.foreign_keys[0];
        assert_eq!(fk.name, naming::foreign_key_name("posts", &["user_id"]));
        assert_eq!(fk.referenced_table, "users");
        assert_eq!(fk.referenced_columns, vec!["id"]);
        assert_eq!(fk.on_delete, Some(ForeignKeyAction::Cascade));
        assert_eq!(fk.on_update, None);
    }
}
