use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use annsync_schemas::{Asset, Record};
use annsync_store::{StoreClient, StoreError};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Record>,
    /// Ids inside the current changed window. Marks persist until cleared so
    /// repeated ticks over an unchanged window can be exercised.
    changed: BTreeSet<i64>,
}

/// In-memory announcement table with shared state across clones.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a row and mark it changed, as the external writer would.
    pub fn insert_changed(&self, record: Record) {
        let mut g = self.inner.lock().unwrap();
        g.changed.insert(record.id);
        g.rows.insert(record.id, record);
    }

    pub fn row(&self, id: i64) -> Option<Record> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    /// Drop a row entirely (simulates deletion between fetch and write-back).
    pub fn remove_row(&self, id: i64) {
        let mut g = self.inner.lock().unwrap();
        g.rows.remove(&id);
        g.changed.remove(&id);
    }

    pub fn clear_changed(&self) {
        self.inner.lock().unwrap().changed.clear();
    }
}

impl StoreClient for MemoryStore {
    async fn fetch_changed(&self, _lookback: Duration) -> Result<Vec<Record>, StoreError> {
        let g = self.inner.lock().unwrap();
        Ok(g.changed
            .iter()
            .filter_map(|id| g.rows.get(id).cloned())
            .collect())
    }

    async fn overwrite(&self, asset: &Asset) -> Result<(), StoreError> {
        let mut g = self.inner.lock().unwrap();
        match g.rows.get_mut(&asset.id) {
            Some(row) => {
                row.author = asset.author.clone();
                row.date = asset.date.clone();
                row.message = asset.message.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(asset.id)),
        }
    }
}
