use std::time::Duration;

use annsync_reconcile::{ReconcileEngine, TickReport};
use annsync_testkit::{MemoryLedger, MemoryStore};

#[tokio::test]
async fn scenario_empty_batch_is_noop() {
    let ledger = MemoryLedger::new();
    let store = MemoryStore::new();

    let engine = ReconcileEngine::new(ledger.clone(), store, Duration::from_secs(5));
    let report = engine.run_tick().await.unwrap();

    assert_eq!(report, TickReport::default());
    // No ledger traffic at all on an empty window.
    assert_eq!(ledger.call_count(), 0);
}
