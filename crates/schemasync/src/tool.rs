//! The schema synchronization tool.
//!
//! [`SchemaTool`] ties the pieces together: it builds the desired model from
//! entity metadata, introspects the live database when diffing, and either
//! returns the generated statements or executes them in order.

use tracing::{debug, info};

use schemasync_core::diff::diff;
use schemasync_core::dialect::DialectAdapter;
use schemasync_core::emit::emit;
use schemasync_core::metadata::{build_schema, EntityMetadata};
use schemasync_core::schema::SchemaModel;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::introspect::{Execute, Introspect};

/// Schema synchronization over one backend and one dialect.
pub struct SchemaTool<B, D> {
    backend: B,
    dialect: D,
    config: SyncConfig,
}

impl<B, D> SchemaTool<B, D>
where
    B: Introspect + Execute,
    D: DialectAdapter,
{
    /// Creates a tool with default configuration.
    pub fn new(backend: B, dialect: D) -> Self {
        Self {
            backend,
            dialect,
            config: SyncConfig::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the configuration for in-place modification.
    pub fn config_mut(&mut self) -> &mut SyncConfig {
        &mut self.config
    }

    /// Generates the DDL that creates the full schema from scratch.
    ///
    /// The desired model is diffed against an empty current model; no
    /// introspection happens.
    ///
    /// # Errors
    ///
    /// Fails on type mapping errors for the active dialect.
    pub fn create_schema_sql(&self, entities: &[EntityMetadata]) -> Result<Vec<String>> {
        let desired = build_schema(entities);
        let changes = diff(&SchemaModel::new(), &desired, self.config.asset_filter());
        Ok(emit(&changes, &self.dialect)?)
    }

    /// Generates the DDL that migrates the live schema to match the
    /// metadata. An empty result means the database is already in sync.
    ///
    /// # Errors
    ///
    /// Fails on introspection or type mapping errors.
    pub async fn update_schema_sql(&self, entities: &[EntityMetadata]) -> Result<Vec<String>> {
        let current = self.backend.introspect().await?;
        let desired = build_schema(entities);
        let changes = diff(&current, &desired, self.config.asset_filter());
        Ok(emit(&changes, &self.dialect)?)
    }

    /// Creates the full schema against the backend.
    ///
    /// # Errors
    ///
    /// Fails on generation or execution errors; execution stops at the
    /// first failing statement.
    pub async fn create_schema(&self, entities: &[EntityMetadata]) -> Result<()> {
        let statements = self.create_schema_sql(entities)?;
        info!(statements = statements.len(), "creating schema");
        self.apply(&statements).await
    }

    /// Migrates the live schema to match the metadata.
    ///
    /// # Errors
    ///
    /// Fails on introspection, generation, or execution errors.
    pub async fn update_schema(&self, entities: &[EntityMetadata]) -> Result<()> {
        let statements = self.update_schema_sql(entities).await?;
        if statements.is_empty() {
            info!("schema already in sync");
            return Ok(());
        }
        info!(statements = statements.len(), "updating schema");
        self.apply(&statements).await
    }

    /// Returns whether the live schema already matches the metadata.
    ///
    /// # Errors
    ///
    /// Fails on introspection or generation errors.
    pub async fn is_in_sync(&self, entities: &[EntityMetadata]) -> Result<bool> {
        Ok(self.update_schema_sql(entities).await?.is_empty())
    }

    async fn apply(&self, statements: &[String]) -> Result<()> {
        for sql in statements {
            debug!(%sql, "executing");
            self.backend.execute(sql).await?;
        }
        Ok(())
    }
}
