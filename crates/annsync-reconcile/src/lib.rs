//! annsync-reconcile
//!
//! The reconciliation engine: per changed record, decide and apply the
//! correct action against the ledger.
//!
//! Architectural decisions:
//! - First writer establishes ownership: an asset's author is fixed at
//!   creation and never reassigned through this path.
//! - Authorship conflicts are resolved by overwriting the *record* from the
//!   ledger, never the asset.
//! - Failures are isolated per record; nothing on the per-record path aborts
//!   the batch or the process.
//!
//! The decision itself is pure logic in [`decide`]; IO lives in
//! [`ReconcileEngine`], generic over the two capability traits.

mod decision;
mod engine;
mod types;

pub use decision::{decide, ReconcileAction};
pub use engine::ReconcileEngine;
pub use types::*;
