//! schemasync CLI
//!
//! Command-line tool for synchronizing a live database schema with a
//! declarative entity description.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use schemasync::prelude::*;

/// Schema synchronization from declarative entity metadata.
#[derive(Parser)]
#[command(name = "schemasync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (sqlite: or mysql: connection string).
    #[arg(short, long, env = "DATABASE_URL")]
    database: String,

    /// Path to the JSON entity description.
    #[arg(short, long, default_value = "schema.json")]
    schema: PathBuf,

    /// Regex naming the assets this tool manages; everything else is left
    /// untouched.
    #[arg(short, long)]
    filter_pattern: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the full schema from scratch.
    Create {
        /// Print the SQL instead of executing it.
        #[arg(long)]
        dump_sql: bool,
    },

    /// Migrate the live schema to match the entity description.
    Update {
        /// Print the SQL instead of executing it.
        #[arg(long)]
        dump_sql: bool,
    },

    /// Report whether the live schema matches the entity description.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let raw = std::fs::read_to_string(&cli.schema)?;
    let entities: Vec<EntityMetadata> = serde_json::from_str(&raw)?;
    info!(
        entities = entities.len(),
        schema = %cli.schema.display(),
        "loaded entity description"
    );

    let mut config = SyncConfig::new();
    if let Some(pattern) = &cli.filter_pattern {
        config.set_asset_filter(AssetFilter::pattern(pattern)?);
    }

    if cli.database.starts_with("mysql:") {
        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect(&cli.database)
            .await?;
        let tool =
            SchemaTool::new(MySqlBackend::new(pool), MySqlDialect::new()).with_config(config);
        run_command(&tool, &entities, &cli.command).await
    } else if cli.database.starts_with("sqlite:") {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&cli.database)
            .await?;
        let tool =
            SchemaTool::new(SqliteBackend::new(pool), SqliteDialect::new()).with_config(config);
        run_command(&tool, &entities, &cli.command).await
    } else {
        bail!("unsupported database URL '{}'", cli.database);
    }
}

async fn run_command<B, D>(
    tool: &SchemaTool<B, D>,
    entities: &[EntityMetadata],
    command: &Commands,
) -> anyhow::Result<()>
where
    B: Introspect + Execute,
    D: DialectAdapter,
{
    match command {
        Commands::Create { dump_sql: true } => {
            for sql in tool.create_schema_sql(entities)? {
                println!("{sql};");
            }
        }
        Commands::Create { dump_sql: false } => {
            tool.create_schema(entities).await?;
            info!("schema created");
        }
        Commands::Update { dump_sql: true } => {
            let statements = tool.update_schema_sql(entities).await?;
            if statements.is_empty() {
                info!("schema already in sync");
            }
            for sql in statements {
                println!("{sql};");
            }
        }
        Commands::Update { dump_sql: false } => {
            tool.update_schema(entities).await?;
            info!("schema updated");
        }
        Commands::Status => {
            if tool.is_in_sync(entities).await? {
                println!("Schema is in sync.");
            } else {
                println!("Schema is out of date. Run `schemasync update`.");
            }
        }
    }
    Ok(())
}
