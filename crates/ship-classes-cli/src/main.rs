mod commands;
mod config;
mod logger;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ship_classes::{LogSink, NullSink, Synchronizer};
use ship_classes_printify::{PrintifyClient, PrintifyConfig};
use ship_classes_store::SqliteClassStore;

use crate::config::AppConfig;
use crate::logger::FileLogSink;

/// Synchronizer wired to the production client and store.
type AppSynchronizer = Synchronizer<PrintifyClient, SqliteClassStore>;

#[derive(Parser)]
#[command(name = "ship-classes")]
#[command(about = "Generate shipping classes from Printify providers and products")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a synchronization pass now
    Sync,
    /// Periodically run sync while auto-sync is enabled
    Schedule {
        /// Seconds between passes
        #[arg(long, default_value_t = 86_400)]
        every: u64,
    },
    /// List stored shipping classes
    Classes,
    /// Show recent log entries, newest first
    Logs {
        /// Maximum number of entries
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },
    /// Show the effective configuration (token masked)
    Config,
}

fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine data directory")?;
    let dir = base.join("ship-classes");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory: {}", dir.display()))?;
    Ok(dir)
}

fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("classes.db"))
}

fn log_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("logs"))
}

fn build_log_sink(config: &AppConfig) -> Result<Arc<dyn LogSink>> {
    if config.enable_logging {
        Ok(Arc::new(FileLogSink::new(log_dir()?)))
    } else {
        Ok(Arc::new(NullSink))
    }
}

fn build_client(config: &AppConfig, log: Arc<dyn LogSink>) -> PrintifyClient {
    PrintifyClient::new(
        PrintifyConfig {
            api_token: config.api_token.clone(),
            api_base_url: None,
            cache_ttl: Duration::from_secs(config.cache_expiration),
        },
        log,
    )
}

fn build_synchronizer(config: &AppConfig) -> Result<(AppSynchronizer, Arc<dyn LogSink>)> {
    let log = build_log_sink(config)?;
    let client = build_client(config, Arc::clone(&log));
    let store = SqliteClassStore::open(&db_path()?, Arc::clone(&log))
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok((
        Synchronizer::new(client, store, config.shop_id, Arc::clone(&log)),
        log,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sync => {
            let config = config::load_config();
            commands::sync::run(&config).await
        }
        Command::Schedule { every } => commands::schedule::run(every).await,
        Command::Classes => {
            let store = SqliteClassStore::open(&db_path()?, Arc::new(NullSink))
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            commands::classes::run(&store).await
        }
        Command::Logs { limit } => commands::logs::run(&log_dir()?, limit),
        Command::Config => {
            let config = config::load_config();
            commands::show::run(&config)
        }
    }
}
