use std::time::Duration;

use annsync_reconcile::ReconcileEngine;
use annsync_schemas::Record;
use annsync_testkit::{MemoryLedger, MemoryStore};

/// Reconciling the same unchanged record twice must leave no trace beyond
/// the first pass: the second update writes identical values.
#[tokio::test]
async fn scenario_second_pass_is_idempotent() {
    let ledger = MemoryLedger::new();
    let store = MemoryStore::new();
    store.insert_changed(Record {
        id: 1,
        author: "alice".to_string(),
        date: "2024-01-01".to_string(),
        message: "hi".to_string(),
    });

    let engine = ReconcileEngine::new(ledger.clone(), store.clone(), Duration::from_secs(5));

    let first = engine.run_tick().await.unwrap();
    assert_eq!(first.created, 1);
    let after_first = ledger.asset(1).unwrap();

    // Same record still inside the window on the next tick.
    let second = engine.run_tick().await.unwrap();
    assert_eq!(second.updated, 1);
    assert_eq!(second.reverted, 0);
    assert!(second.is_clean());

    assert_eq!(ledger.asset(1).unwrap(), after_first);
    assert_eq!(store.row(1).unwrap().message, "hi");
}
