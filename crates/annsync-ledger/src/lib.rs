//! annsync-ledger
//!
//! Capability wrapper around the authoritative ledger.
//!
//! The [`LedgerClient`] trait is the seam the reconcile engine is generic
//! over: four typed operations keyed by the integer record id. Call sites are
//! checked at build time — the string-named transaction verbs exist only as
//! constants inside the gateway implementation.
//!
//! [`LedgerGateway`] is the production implementation: an HTTPS/JSON client
//! against the gateway peer, with a pinned root CA and an X.509 client
//! identity loaded from PEM material at startup.

mod client;
mod error;
mod gateway;
mod identity;

pub use client::LedgerClient;
pub use error::LedgerError;
pub use gateway::{
    LedgerGateway, VERB_ASSET_EXISTS, VERB_CREATE_ASSET, VERB_INIT_LEDGER, VERB_READ_ASSET,
    VERB_UPDATE_ASSET,
};
