use std::time::Duration;

use annsync_reconcile::ReconcileEngine;
use annsync_schemas::{Asset, Record};
use annsync_testkit::{MemoryLedger, MemoryStore};

#[tokio::test]
async fn scenario_update_when_author_matches() {
    let ledger = MemoryLedger::new();
    ledger.seed(Asset {
        author: "alice".to_string(),
        date: "2024-01-01".to_string(),
        id: 1,
        message: "hi".to_string(),
    });

    let store = MemoryStore::new();
    store.insert_changed(Record {
        id: 1,
        author: "alice".to_string(),
        date: "2024-01-02".to_string(),
        message: "hi2".to_string(),
    });

    let engine = ReconcileEngine::new(ledger.clone(), store.clone(), Duration::from_secs(5));
    let report = engine.run_tick().await.unwrap();

    assert_eq!(report.updated, 1);
    assert!(report.is_clean());

    let asset = ledger.asset(1).unwrap();
    assert_eq!(asset.author, "alice"); // never reassigned
    assert_eq!(asset.date, "2024-01-02");
    assert_eq!(asset.message, "hi2");
}
