//! annsync-store
//!
//! Capability wrapper around the mutable announcement store (MariaDB).
//!
//! Two operations only: fetch rows changed within a trailing window, and
//! overwrite a row by id on the conflict-revert path. The table is written by
//! an external application; this crate never inserts or deletes rows.

use std::time::Duration;

use anyhow::{Context, Result};
use annsync_config::ResolvedStoreUrl;
use annsync_schemas::{Asset, Record};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySqlPool, Row};
use tracing::debug;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The row vanished between fetch and write-back.
    NotFound(i64),
    /// Connectivity or query failure.
    Database(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "announcement row {id} does not exist"),
            StoreError::Database(msg) => write!(f, "store failure: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Capability trait
// ---------------------------------------------------------------------------

/// Typed capability interface over the mutable store.
///
/// Futures from these methods are awaited inline by a single driver task and
/// never cross task boundaries, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait StoreClient {
    /// Rows whose last-modified timestamp falls within the trailing
    /// `lookback` window. Ordering is unspecified; each row is reconciled
    /// independently.
    async fn fetch_changed(&self, lookback: Duration) -> Result<Vec<Record>, StoreError>;

    /// Overwrite the row matching `asset.id` with the asset's author, date
    /// and message, discarding an unauthorized edit. `NotFound` if the row
    /// no longer exists.
    async fn overwrite(&self, asset: &Asset) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// MariaDB implementation
// ---------------------------------------------------------------------------

/// Production store client over a MySQL connection pool.
pub struct MariaStore {
    pool: MySqlPool,
}

impl MariaStore {
    /// Connect and ping. Failure here is a boot failure; the daemon aborts.
    pub async fn connect(url: &ResolvedStoreUrl) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect(url.as_str())
            .await
            .context("failed to connect to MariaDB")?;

        let (one,): (i32,) = sqlx::query_as("select 1")
            .fetch_one(&pool)
            .await
            .context("failed to ping database")?;
        debug!(ok = (one == 1), "database connection established");

        Ok(Self { pool })
    }
}

impl StoreClient for MariaStore {
    async fn fetch_changed(&self, lookback: Duration) -> Result<Vec<Record>, StoreError> {
        // The window is evaluated server-side against the row's timestamp
        // text, matching the writer's clock rather than ours.
        let rows = sqlx::query(
            r#"
            select id, author, date, msg
            from announcement
            where date >= date_sub(current_timestamp, interval ? second)
            "#,
        )
        .bind(lookback.as_secs())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(Record {
                id: row
                    .try_get("id")
                    .map_err(|e| StoreError::Database(e.to_string()))?,
                author: row
                    .try_get("author")
                    .map_err(|e| StoreError::Database(e.to_string()))?,
                date: row
                    .try_get("date")
                    .map_err(|e| StoreError::Database(e.to_string()))?,
                message: row
                    .try_get("msg")
                    .map_err(|e| StoreError::Database(e.to_string()))?,
            });
        }
        Ok(records)
    }

    async fn overwrite(&self, asset: &Asset) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            update announcement
            set author = ?, date = ?, msg = ?
            where id = ?
            "#,
        )
        .bind(&asset.author)
        .bind(&asset.date)
        .bind(&asset.message)
        .bind(asset.id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(asset.id));
        }
        debug!(id = asset.id, "announcement row reverted from ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_row() {
        assert_eq!(
            StoreError::NotFound(3).to_string(),
            "announcement row 3 does not exist"
        );
    }
}
