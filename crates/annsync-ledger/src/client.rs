use crate::error::LedgerError;
use annsync_schemas::Asset;

/// Typed capability interface over the authoritative ledger.
///
/// The four operations are the only ledger surface the reconcile engine may
/// touch. Idempotency is the caller's responsibility: `create_asset` is
/// expected to follow a negative `asset_exists` check, and `update_asset` a
/// positive one.
///
/// Futures from these methods are awaited inline by a single driver task and
/// never cross task boundaries, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    /// True iff an asset with this id has been committed.
    async fn asset_exists(&self, id: i64) -> Result<bool, LedgerError>;

    /// The committed asset for this id; `NotFound` if absent.
    async fn read_asset(&self, id: i64) -> Result<Asset, LedgerError>;

    /// Commit a new asset, fixing `author` as the authoritative author for
    /// this id. `AlreadyExists` if an asset is already committed.
    async fn create_asset(
        &self,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError>;

    /// Overwrite the committed asset's fields. `NotFound` if absent.
    async fn update_asset(
        &self,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError>;
}
