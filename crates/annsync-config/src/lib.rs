//! annsync-config
//!
//! Typed configuration for the sync daemon, loaded once at startup and passed
//! into constructors. No other crate reads files or `std::env` for connection
//! parameters.
//!
//! # Contract
//! - The config file stores only the env var **NAME** for the database URL
//!   (e.g. `"ANNSYNC_DATABASE_URL"`), never the URL itself.
//! - [`StoreSettings::resolve_url`] is called once at startup; the returned
//!   [`ResolvedStoreUrl`] redacts its value in `Debug` output.
//! - Error messages reference the env var NAME, never the value.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default env var NAME for the MariaDB connection URL.
pub const DEFAULT_STORE_URL_ENV: &str = "ANNSYNC_DATABASE_URL";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level daemon configuration, parsed from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub ledger: LedgerSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

/// Connection parameters for the ledger gateway.
///
/// These replace what used to live as module-level constants in the legacy
/// sync script: endpoint, organization MSP id, channel/chaincode names, and
/// the PEM material paths for TLS + client identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Gateway base URL, e.g. `https://localhost:7051`.
    pub endpoint: String,
    /// Membership service provider id of the submitting organization.
    pub msp_id: String,
    /// Channel carrying the announcement chaincode.
    pub channel: String,
    /// Chaincode (smart contract) name.
    pub chaincode: String,
    /// Root CA certificate used to verify the gateway's TLS certificate.
    pub tls_ca_path: String,
    /// Directory holding the client's signing certificate (first file is used).
    pub cert_dir: String,
    /// Directory holding the client's private key (first file is used).
    pub key_dir: String,
}

/// Mutable-store (MariaDB) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Env var NAME holding the database URL. The URL itself never appears in
    /// the config file.
    #[serde(default = "default_store_url_env")]
    pub url_env: String,
}

fn default_store_url_env() -> String {
    DEFAULT_STORE_URL_ENV.to_string()
}

/// Scheduler cadence. The lookback window defaults to the poll interval so a
/// record changed between ticks falls inside exactly one trailing window
/// under nominal timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Trailing window for the changed-records query; defaults to
    /// `poll_interval_secs` when absent.
    #[serde(default)]
    pub lookback_secs: Option<u64>,
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            lookback_secs: None,
        }
    }
}

impl SchedulerSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn lookback(&self) -> Duration {
        Duration::from_secs(self.lookback_secs.unwrap_or(self.poll_interval_secs))
    }
}

// ---------------------------------------------------------------------------
// Secret resolution
// ---------------------------------------------------------------------------

/// The database URL resolved from the environment.
///
/// **The value is redacted in `Debug` output** — connection URLs carry
/// credentials inline.
#[derive(Clone)]
pub struct ResolvedStoreUrl(String);

impl ResolvedStoreUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ResolvedStoreUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResolvedStoreUrl").field(&"<REDACTED>").finish()
    }
}

impl StoreSettings {
    /// Resolve the database URL from the env var named in the config.
    /// Called once at startup; missing or empty vars are a boot failure.
    pub fn resolve_url(&self) -> Result<ResolvedStoreUrl> {
        match std::env::var(&self.url_env) {
            Ok(v) if !v.trim().is_empty() => Ok(ResolvedStoreUrl(v)),
            _ => bail!("missing or empty env var {}", self.url_env),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading + canonical hash
// ---------------------------------------------------------------------------

/// A parsed config plus the canonical hash logged at boot.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SyncConfig,
    /// sha256 of the canonical (key-sorted, compact) JSON rendering.
    pub config_hash: String,
}

/// Read and parse the JSON config file at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<LoadedConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    load_from_str(&raw)
}

pub fn load_from_str(raw: &str) -> Result<LoadedConfig> {
    let value: serde_json::Value = serde_json::from_str(raw).context("invalid config json")?;
    let config: SyncConfig =
        serde_json::from_value(value.clone()).context("config shape mismatch")?;
    let config_hash = sha256_hex(canonicalize_json(&value)?.as_bytes());
    Ok(LoadedConfig { config, config_hash })
}

fn canonicalize_json(v: &serde_json::Value) -> Result<String> {
    // serde_json::Value maps are sorted by key (preserve_order is off), so a
    // compact serialization is already canonical for hashing purposes.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
