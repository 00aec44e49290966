//! Error taxonomy for ledger operations.
//!
//! Implements `std::error::Error` so it can be boxed and propagated through
//! `anyhow` chains without extra wrapping. No variant in the per-record path
//! is fatal to the process; the engine logs and skips.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No asset committed under this id.
    NotFound(i64),
    /// An asset is already committed under this id. Should not occur after a
    /// passed existence check; a race between ticks can still surface it.
    AlreadyExists(i64),
    /// Gateway unreachable or the peer refused the transaction.
    Transport(String),
    /// The gateway answered but the payload did not parse.
    Decode(String),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::NotFound(id) => write!(f, "the asset {id} does not exist"),
            LedgerError::AlreadyExists(id) => write!(f, "the asset {id} already exists"),
            LedgerError::Transport(msg) => write!(f, "ledger transport failure: {msg}"),
            LedgerError::Decode(msg) => write!(f, "malformed ledger payload: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_id() {
        assert_eq!(
            LedgerError::NotFound(7).to_string(),
            "the asset 7 does not exist"
        );
        assert_eq!(
            LedgerError::AlreadyExists(7).to_string(),
            "the asset 7 already exists"
        );
    }
}
