use std::time::Duration;

use annsync_reconcile::{FailureStage, ReconcileEngine};
use annsync_testkit::{sample_record, MemoryLedger, MemoryStore};

/// A ledger failure on one record must not abort the batch: the other
/// records in the same tick still reconcile.
#[tokio::test]
async fn scenario_record_failure_is_isolated() {
    let ledger = MemoryLedger::new();
    ledger.poison(1);

    let store = MemoryStore::new();
    store.insert_changed(sample_record(1, "alice", "first"));
    store.insert_changed(sample_record(2, "bob", "second"));

    let engine = ReconcileEngine::new(ledger.clone(), store, Duration::from_secs(5));
    let report = engine.run_tick().await.unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, 1);
    assert_eq!(report.failures[0].stage, FailureStage::Exists);

    assert!(ledger.asset(1).is_none());
    assert!(ledger.asset(2).is_some());
}
