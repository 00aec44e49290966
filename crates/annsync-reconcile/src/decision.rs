use annsync_schemas::{Asset, Record};

/// What the engine must do for one record, given the ledger's view of the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No asset under this id: create it from the record, fixing the author.
    CreateAsset,
    /// Authorship confirmed: propagate the record's date/message.
    UpdateAsset,
    /// Authorship conflict: restore the store row from this asset.
    RevertRecord(Asset),
}

/// The three-state decision. No further branching exists: absent → create,
/// present with matching author → update, present with differing author →
/// revert. A pre-seeded bootstrap asset takes the same path as any other —
/// existence alone triggers the author check.
pub fn decide(record: &Record, existing: Option<&Asset>) -> ReconcileAction {
    match existing {
        None => ReconcileAction::CreateAsset,
        Some(asset) if asset.author == record.author => ReconcileAction::UpdateAsset,
        Some(asset) => ReconcileAction::RevertRecord(asset.clone()),
    }
}
