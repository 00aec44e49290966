//! annsync-schemas
//!
//! Entity types shared by every crate in the workspace.
//!
//! Two representations of the same logical announcement exist:
//! - [`Record`]: the mutable-store row (MariaDB `announcement` table).
//! - [`Asset`]: the ledger-resident form, correlated 1:1 by integer id.
//!
//! No IO here; this crate is a leaf.

use serde::{Deserialize, Serialize};

/// A row of the mutable `announcement` table, as returned by the store's
/// changed-records query. Produced by an external writer; the engine only
/// reads it and, on an authorship conflict, overwrites it from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub author: String,
    /// Free-form timestamp text; compared only for propagation, never parsed.
    pub date: String,
    pub message: String,
}

/// The ledger-resident representation of a record.
///
/// Struct fields are declared in alphabetical order so the serialized JSON
/// byte string is identical across implementations (the chaincode relies on
/// declaration order for its canonical world-state encoding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Message")]
    pub message: String,
}

impl Asset {
    /// The ledger form of a store record, used when creating or updating an
    /// asset from an authorized edit.
    pub fn from_record(record: &Record) -> Self {
        Self {
            author: record.author.clone(),
            date: record.date.clone(),
            id: record.id,
            message: record.message.clone(),
        }
    }
}

impl Record {
    /// The store form of a ledger asset, used on the conflict-revert path.
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            author: asset.author.clone(),
            date: asset.date.clone(),
            message: asset.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_json_keys_are_alphabetical() {
        let asset = Asset {
            author: "alice".to_string(),
            date: "2024-01-01".to_string(),
            id: 1,
            message: "hi".to_string(),
        };
        let json = serde_json::to_string(&asset).unwrap();
        assert_eq!(
            json,
            r#"{"Author":"alice","Date":"2024-01-01","ID":1,"Message":"hi"}"#
        );
    }

    #[test]
    fn asset_round_trips_through_record() {
        let asset = Asset {
            author: "alice".to_string(),
            date: "2024-01-01".to_string(),
            id: 7,
            message: "hi".to_string(),
        };
        let record = Record::from_asset(&asset);
        assert_eq!(Asset::from_record(&record), asset);
    }

    #[test]
    fn asset_decodes_ledger_payload() {
        let payload = r#"{"Author":"user_0","Date":"Unknown","ID":0,"Message":"Unknown"}"#;
        let asset: Asset = serde_json::from_str(payload).unwrap();
        assert_eq!(asset.id, 0);
        assert_eq!(asset.author, "user_0");
    }
}
