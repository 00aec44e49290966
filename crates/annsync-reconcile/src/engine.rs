use std::time::Duration;

use annsync_ledger::{LedgerClient, LedgerError};
use annsync_schemas::Record;
use annsync_store::{StoreClient, StoreError};
use tracing::{debug, info, warn};

use crate::decision::{decide, ReconcileAction};
use crate::types::{FailureStage, ReconcileOutcome, RecordFailure, TickReport};

/// Orchestrates one reconciliation pass: fetch changed records, run the
/// per-record state machine against the ledger, write back on conflict.
///
/// Generic over the capability traits so scenario tests wire in-memory fakes
/// where production wires the gateway and the MariaDB pool.
pub struct ReconcileEngine<L, S> {
    ledger: L,
    store: S,
    lookback: Duration,
}

impl<L, S> ReconcileEngine<L, S>
where
    L: LedgerClient,
    S: StoreClient,
{
    pub fn new(ledger: L, store: S, lookback: Duration) -> Self {
        Self {
            ledger,
            store,
            lookback,
        }
    }

    /// One tick. A fetch failure abandons the whole pass (retried naturally
    /// on the next interval); every per-record failure is recorded in the
    /// report and the pass continues.
    pub async fn run_tick(&self) -> Result<TickReport, StoreError> {
        let records = self.store.fetch_changed(self.lookback).await?;
        if records.is_empty() {
            debug!("no changed records in window");
            return Ok(TickReport::default());
        }

        let mut report = TickReport::default();
        for record in &records {
            report.processed += 1;
            match self.reconcile_record(record).await {
                Ok(outcome) => {
                    info!(id = record.id, outcome = ?outcome, "record reconciled");
                    report.count(outcome);
                }
                Err(failure) => {
                    // Per-record isolation: log, keep the evidence, move on.
                    warn!(
                        id = failure.id,
                        stage = ?failure.stage,
                        error = %failure.error,
                        "record skipped"
                    );
                    report.failures.push(failure);
                }
            }
        }
        Ok(report)
    }

    /// The per-record state machine: exists → (create | read → author check
    /// → update | revert).
    pub async fn reconcile_record(
        &self,
        record: &Record,
    ) -> Result<ReconcileOutcome, RecordFailure> {
        let exists = self
            .ledger
            .asset_exists(record.id)
            .await
            .map_err(|e| ledger_failure(record.id, FailureStage::Exists, e))?;

        let existing = if exists {
            Some(
                self.ledger
                    .read_asset(record.id)
                    .await
                    .map_err(|e| ledger_failure(record.id, FailureStage::Read, e))?,
            )
        } else {
            None
        };

        match decide(record, existing.as_ref()) {
            ReconcileAction::CreateAsset => {
                self.ledger
                    .create_asset(record.id, &record.author, &record.date, &record.message)
                    .await
                    .map_err(|e| ledger_failure(record.id, FailureStage::Create, e))?;
                Ok(ReconcileOutcome::Created)
            }
            ReconcileAction::UpdateAsset => {
                self.ledger
                    .update_asset(record.id, &record.author, &record.date, &record.message)
                    .await
                    .map_err(|e| ledger_failure(record.id, FailureStage::Update, e))?;
                Ok(ReconcileOutcome::Updated)
            }
            ReconcileAction::RevertRecord(asset) => {
                self.store
                    .overwrite(&asset)
                    .await
                    .map_err(|e| RecordFailure {
                        id: record.id,
                        stage: FailureStage::Revert,
                        error: e.to_string(),
                    })?;
                Ok(ReconcileOutcome::Reverted)
            }
        }
    }
}

fn ledger_failure(id: i64, stage: FailureStage, err: LedgerError) -> RecordFailure {
    RecordFailure {
        id,
        stage,
        error: err.to_string(),
    }
}
