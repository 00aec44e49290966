//! Fixed-interval driver for the reconcile engine.
//!
//! Passes can neither queue nor overlap: a single task awaits each pass
//! inline, and the interval is set to `MissedTickBehavior::Skip`, so fire
//! points that elapse while a pass is still running are dropped rather than
//! burst afterwards.

use std::time::Duration;

use annsync_ledger::LedgerClient;
use annsync_reconcile::ReconcileEngine;
use annsync_store::StoreClient;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Drive `engine` every `interval` until `shutdown` flips.
///
/// A pass that fails to fetch the changed window is abandoned and retried
/// naturally on the next tick; per-record failures are already isolated
/// inside the engine and only surface here as report counts.
pub async fn run<L, S>(
    engine: ReconcileEngine<L, S>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    L: LedgerClient,
    S: StoreClient,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match engine.run_tick().await {
                    Ok(report) => info!(
                        processed = report.processed,
                        created = report.created,
                        updated = report.updated,
                        reverted = report.reverted,
                        failed = report.failures.len(),
                        "tick complete"
                    ),
                    Err(err) => warn!(error = %err, "tick abandoned; retrying next interval"),
                }
            }
            _ = shutdown.changed() => {
                info!("shutdown signal received");
                break;
            }
        }
    }
}
