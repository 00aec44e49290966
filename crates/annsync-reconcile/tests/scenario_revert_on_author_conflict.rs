use std::time::Duration;

use annsync_reconcile::ReconcileEngine;
use annsync_schemas::{Asset, Record};
use annsync_testkit::{MemoryLedger, MemoryStore};

#[tokio::test]
async fn scenario_revert_on_author_conflict() {
    let authoritative = Asset {
        author: "alice".to_string(),
        date: "2024-01-01".to_string(),
        id: 1,
        message: "hi".to_string(),
    };

    let ledger = MemoryLedger::new();
    ledger.seed(authoritative.clone());

    let store = MemoryStore::new();
    store.insert_changed(Record {
        id: 1,
        author: "bob".to_string(),
        date: "2024-01-03".to_string(),
        message: "evil".to_string(),
    });

    let engine = ReconcileEngine::new(ledger.clone(), store.clone(), Duration::from_secs(5));
    let report = engine.run_tick().await.unwrap();

    assert_eq!(report.reverted, 1);
    assert!(report.is_clean());

    // The asset is untouched; the unauthorized edit is discarded in the store.
    assert_eq!(ledger.asset(1), Some(authoritative.clone()));
    assert_eq!(store.row(1), Some(Record::from_asset(&authoritative)));
}

#[tokio::test]
async fn scenario_revert_failure_when_row_vanished() {
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
        author: "bob".to_string(),
        date: "2024-01-03".to_string(),
        message: "evil".to_string(),
    });

    let engine = ReconcileEngine::new(ledger.clone(), store.clone(), Duration::from_secs(5));

    // Row disappears between fetch and write-back.
    let record = store.row(1).unwrap();
    store.remove_row(1);
    let failure = engine.reconcile_record(&record).await.unwrap_err();

    assert_eq!(failure.id, 1);
    assert!(failure.error.contains("does not exist"));
}
