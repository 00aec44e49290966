use std::time::Duration;

use annsync_reconcile::ReconcileEngine;
use annsync_schemas::Record;
use annsync_testkit::{MemoryLedger, MemoryStore};

/// A record whose id collides with the genesis placeholder asset goes
/// through the ordinary author-check path: existence alone decides.
#[tokio::test]
async fn scenario_bootstrap_seed_takes_conflict_path() {
    let ledger = MemoryLedger::with_genesis_seed();
    let seed = ledger.asset(0).unwrap();

    let store = MemoryStore::new();
    store.insert_changed(Record {
        id: 0,
        author: "mallory".to_string(),
        date: "2024-01-03".to_string(),
        message: "squatting the seed id".to_string(),
    });

    let engine = ReconcileEngine::new(ledger.clone(), store.clone(), Duration::from_secs(5));
    let report = engine.run_tick().await.unwrap();

    assert_eq!(report.reverted, 1);
    assert_eq!(ledger.asset(0), Some(seed));

    let row = store.row(0).unwrap();
    assert_eq!(row.author, "user_0");
    assert_eq!(row.date, "Unknown");
    assert_eq!(row.message, "Unknown");
}
