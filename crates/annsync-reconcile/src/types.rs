use serde::Serialize;

/// Terminal state of one record within one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ReconcileOutcome {
    /// No asset existed; one was created and the record's author became
    /// authoritative for the id.
    Created,
    /// Authorship confirmed; the record's date/message were propagated.
    Updated,
    /// Authorship conflict; the store row was restored from the asset.
    Reverted,
}

/// Which step of the per-record state machine failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FailureStage {
    Exists,
    Read,
    Create,
    Update,
    Revert,
}

/// Evidence for one skipped record. Kept minimal but explicit; surfaced as a
/// warn log line and retained in the tick report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub id: i64,
    pub stage: FailureStage,
    pub error: String,
}

/// Summary of one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub reverted: usize,
    pub failures: Vec<RecordFailure>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn count(&mut self, outcome: ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::Created => self.created += 1,
            ReconcileOutcome::Updated => self.updated += 1,
            ReconcileOutcome::Reverted => self.reverted += 1,
        }
    }
}
