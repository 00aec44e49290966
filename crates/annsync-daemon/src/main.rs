//! annsyncd entry point.
//!
//! This file is intentionally thin: it sets up tracing, loads the config,
//! builds the two clients, and hands the engine to the scheduler. The
//! reconciliation logic lives in `annsync-reconcile`.

use anyhow::{Context, Result};
use annsync_daemon::scheduler;
use annsync_ledger::LedgerGateway;
use annsync_reconcile::ReconcileEngine;
use annsync_store::MariaStore;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

#[derive(Parser)]
#[command(name = "annsyncd")]
#[command(about = "Keeps the announcement store in sync with the ledger", long_about = None)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, default_value = "annsync.json")]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the reconciliation loop until interrupted.
    Run,

    /// Submit the genesis transaction that seeds the ledger. One-time
    /// operator bootstrap; the reconcile loop never calls this.
    InitLedger,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist — production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let loaded = annsync_config::load_from_path(&cli.config)?;
    info!(config_hash = %loaded.config_hash, "config loaded");
    let config = loaded.config;

    // Bootstrap failures are fatal: the engine cannot run without a ledger
    // connection and a database pool.
    let gateway =
        LedgerGateway::connect(&config.ledger).context("ledger gateway bootstrap failed")?;

    match cli.cmd {
        Command::InitLedger => {
            gateway
                .init_ledger()
                .await
                .context("InitLedger transaction failed")?;
            info!("ledger initialized");
        }
        Command::Run => {
            let url = config.store.resolve_url()?;
            let store = MariaStore::connect(&url)
                .await
                .context("store bootstrap failed")?;

            let engine = ReconcileEngine::new(gateway, store, config.scheduler.lookback());

            let (tx, rx) = watch::channel(false);
            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                let _ = tx.send(true);
            });

            info!(
                interval_secs = config.scheduler.poll_interval_secs,
                "reconcile loop started"
            );
            scheduler::run(engine, config.scheduler.poll_interval(), rx).await;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
