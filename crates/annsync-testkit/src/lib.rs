//! annsync-testkit
//!
//! Deterministic in-memory collaborators for scenario tests: a ledger and a
//! store implementing the capability traits, with inspection accessors and
//! failure injection. No network, no database.

mod memory_ledger;
mod memory_store;

pub use memory_ledger::MemoryLedger;
pub use memory_store::MemoryStore;

use annsync_schemas::Record;

/// A changed announcement row as the external writer would produce it.
pub fn sample_record(id: i64, author: &str, message: &str) -> Record {
    Record {
        id,
        author: author.to_string(),
        date: chrono::Utc::now().to_rfc3339(),
        message: message.to_string(),
    }
}
