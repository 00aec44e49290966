use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use annsync_ledger::{LedgerClient, LedgerError};
use annsync_schemas::Asset;

#[derive(Default)]
struct Inner {
    assets: BTreeMap<i64, Asset>,
    /// Ids for which every operation fails with a transport error.
    poisoned: BTreeSet<i64>,
    /// Total ledger operations observed, across all clones.
    calls: u64,
}

/// In-memory ledger with shared state: clones see the same world state, so a
/// test can hand one handle to the engine and keep another for assertions.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger initialized the way the genesis transaction seeds it: a
    /// placeholder asset under id 0.
    pub fn with_genesis_seed() -> Self {
        let ledger = Self::new();
        ledger.seed(Asset {
            author: "user_0".to_string(),
            date: "Unknown".to_string(),
            id: 0,
            message: "Unknown".to_string(),
        });
        ledger
    }

    /// Install an asset directly, bypassing call counting.
    pub fn seed(&self, asset: Asset) {
        let mut g = self.inner.lock().unwrap();
        g.assets.insert(asset.id, asset);
    }

    /// Make every operation on `id` fail with a transport error.
    pub fn poison(&self, id: i64) {
        self.inner.lock().unwrap().poisoned.insert(id);
    }

    pub fn asset(&self, id: i64) -> Option<Asset> {
        self.inner.lock().unwrap().assets.get(&id).cloned()
    }

    pub fn asset_count(&self) -> usize {
        self.inner.lock().unwrap().assets.len()
    }

    /// Ledger operations observed so far (exists/read/create/update).
    pub fn call_count(&self) -> u64 {
        self.inner.lock().unwrap().calls
    }

    fn touch(&self, id: i64) -> Result<std::sync::MutexGuard<'_, Inner>, LedgerError> {
        let mut g = self.inner.lock().unwrap();
        g.calls += 1;
        if g.poisoned.contains(&id) {
            return Err(LedgerError::Transport("injected ledger outage".to_string()));
        }
        Ok(g)
    }
}

impl LedgerClient for MemoryLedger {
    async fn asset_exists(&self, id: i64) -> Result<bool, LedgerError> {
        let g = self.touch(id)?;
        Ok(g.assets.contains_key(&id))
    }

    async fn read_asset(&self, id: i64) -> Result<Asset, LedgerError> {
        let g = self.touch(id)?;
        g.assets.get(&id).cloned().ok_or(LedgerError::NotFound(id))
    }

    async fn create_asset(
        &self,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError> {
        let mut g = self.touch(id)?;
        if g.assets.contains_key(&id) {
            return Err(LedgerError::AlreadyExists(id));
        }
        g.assets.insert(
            id,
            Asset {
                author: author.to_string(),
                date: date.to_string(),
                id,
                message: message.to_string(),
            },
        );
        Ok(())
    }

    async fn update_asset(
        &self,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError> {
        let mut g = self.touch(id)?;
        if !g.assets.contains_key(&id) {
            return Err(LedgerError::NotFound(id));
        }
        g.assets.insert(
            id,
            Asset {
                author: author.to_string(),
                date: date.to_string(),
                id,
                message: message.to_string(),
            },
        );
        Ok(())
    }
}
