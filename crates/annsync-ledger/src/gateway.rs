//! HTTPS/JSON gateway implementation of [`LedgerClient`].
//!
//! Transactions are posted to the gateway's `submit` (ordering + commit) or
//! `evaluate` (local query) endpoint as `{channel, chaincode, function,
//! args}`. The chaincode's verb names live here and nowhere else; everything
//! above this module calls the typed trait methods.

use std::time::Duration;

use anyhow::{Context, Result};
use annsync_config::LedgerSettings;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::client::LedgerClient;
use crate::error::LedgerError;
use crate::identity;
use annsync_schemas::Asset;

pub const VERB_INIT_LEDGER: &str = "InitLedger";
pub const VERB_ASSET_EXISTS: &str = "AssetExists";
pub const VERB_CREATE_ASSET: &str = "CreateAsset";
pub const VERB_READ_ASSET: &str = "ReadAsset";
pub const VERB_UPDATE_ASSET: &str = "UpdateAsset";

/// Local query budget.
const EVALUATE_TIMEOUT: Duration = Duration::from_secs(5);
/// Submit budget covers endorsement and commit notification.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Copy)]
enum CallPath {
    Submit,
    Evaluate,
}

impl CallPath {
    fn as_str(self) -> &'static str {
        match self {
            CallPath::Submit => "submit",
            CallPath::Evaluate => "evaluate",
        }
    }

    fn timeout(self) -> Duration {
        match self {
            CallPath::Submit => SUBMIT_TIMEOUT,
            CallPath::Evaluate => EVALUATE_TIMEOUT,
        }
    }
}

/// One transaction invocation as it crosses the wire.
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    msp_id: &'a str,
    channel: &'a str,
    chaincode: &'a str,
    function: &'a str,
    args: Vec<String>,
}

/// Production ledger client over a mutually-authenticated HTTPS connection.
pub struct LedgerGateway {
    http: reqwest::Client,
    endpoint: String,
    msp_id: String,
    channel: String,
    chaincode: String,
}

impl LedgerGateway {
    /// Build the gateway connection from externalized settings: pinned root
    /// CA, client identity from the first file of the cert/key directories.
    /// Any failure here is a boot failure — the engine cannot run without a
    /// ledger connection.
    pub fn connect(settings: &LedgerSettings) -> Result<Self> {
        let ca = identity::load_root_ca(&settings.tls_ca_path)?;
        let id = identity::load_identity(&settings.cert_dir, &settings.key_dir)?;

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .add_root_certificate(ca)
            .identity(id)
            .build()
            .context("failed to build gateway http client")?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            msp_id: settings.msp_id.clone(),
            channel: settings.channel.clone(),
            chaincode: settings.chaincode.clone(),
        })
    }

    /// Seed the ledger's genesis assets. Operator bootstrap only; never
    /// invoked on the reconcile path.
    pub async fn init_ledger(&self) -> Result<(), LedgerError> {
        let (status, _) = self
            .call(CallPath::Submit, VERB_INIT_LEDGER, Vec::new())
            .await?;
        if let Some(err) = classify_status(status, 0) {
            return Err(err);
        }
        debug!(function = VERB_INIT_LEDGER, "transaction committed");
        Ok(())
    }

    async fn call(
        &self,
        path: CallPath,
        function: &'static str,
        args: Vec<String>,
    ) -> Result<(StatusCode, Vec<u8>), LedgerError> {
        let url = format!("{}/{}", self.endpoint, path.as_str());
        let body = InvokeRequest {
            msp_id: &self.msp_id,
            channel: &self.channel,
            chaincode: &self.chaincode,
            function,
            args,
        };
        let resp = self
            .http
            .post(&url)
            .timeout(path.timeout())
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("{function}: {e}")))?;
        let status = resp.status();
        let payload = resp
            .bytes()
            .await
            .map_err(|e| LedgerError::Transport(format!("{function}: {e}")))?;
        Ok((status, payload.to_vec()))
    }

    async fn submit_unit(
        &self,
        function: &'static str,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError> {
        let args = vec![
            id.to_string(),
            author.to_string(),
            date.to_string(),
            message.to_string(),
        ];
        let (status, _) = self.call(CallPath::Submit, function, args).await?;
        if let Some(err) = classify_status(status, id) {
            return Err(err);
        }
        debug!(function, id, "transaction committed");
        Ok(())
    }
}

impl LedgerClient for LedgerGateway {
    async fn asset_exists(&self, id: i64) -> Result<bool, LedgerError> {
        // Existence is checked through the submit path: the chaincode reads
        // world state transactionally, matching the legacy client.
        let (status, payload) = self
            .call(CallPath::Submit, VERB_ASSET_EXISTS, vec![id.to_string()])
            .await?;
        if let Some(err) = classify_status(status, id) {
            return Err(err);
        }
        serde_json::from_slice(&payload).map_err(|e| LedgerError::Decode(e.to_string()))
    }

    async fn read_asset(&self, id: i64) -> Result<Asset, LedgerError> {
        let (status, payload) = self
            .call(CallPath::Evaluate, VERB_READ_ASSET, vec![id.to_string()])
            .await?;
        if let Some(err) = classify_status(status, id) {
            return Err(err);
        }
        serde_json::from_slice(&payload).map_err(|e| LedgerError::Decode(e.to_string()))
    }

    async fn create_asset(
        &self,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError> {
        self.submit_unit(VERB_CREATE_ASSET, id, author, date, message)
            .await
    }

    async fn update_asset(
        &self,
        id: i64,
        author: &str,
        date: &str,
        message: &str,
    ) -> Result<(), LedgerError> {
        self.submit_unit(VERB_UPDATE_ASSET, id, author, date, message)
            .await
    }
}

/// Gateway response status → error taxonomy. `None` means success.
fn classify_status(status: StatusCode, id: i64) -> Option<LedgerError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => LedgerError::NotFound(id),
        StatusCode::CONFLICT => LedgerError::AlreadyExists(id),
        other => LedgerError::Transport(format!("gateway returned {other}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_the_taxonomy() {
        assert_eq!(classify_status(StatusCode::OK, 1), None);
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, 1),
            Some(LedgerError::NotFound(1))
        );
        assert_eq!(
            classify_status(StatusCode::CONFLICT, 1),
            Some(LedgerError::AlreadyExists(1))
        );
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, 1),
            Some(LedgerError::Transport(_))
        ));
    }

    #[test]
    fn invoke_request_serializes_verb_and_args() {
        let req = InvokeRequest {
            msp_id: "Org1MSP",
            channel: "mychannel",
            chaincode: "message_sc",
            function: VERB_CREATE_ASSET,
            args: vec!["1".into(), "alice".into(), "2024-01-01".into(), "hi".into()],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["function"], "CreateAsset");
        assert_eq!(json["args"][0], "1");
        assert_eq!(json["channel"], "mychannel");
    }

    #[test]
    fn verbs_match_the_chaincode_contract() {
        assert_eq!(VERB_INIT_LEDGER, "InitLedger");
        assert_eq!(VERB_ASSET_EXISTS, "AssetExists");
        assert_eq!(VERB_CREATE_ASSET, "CreateAsset");
        assert_eq!(VERB_READ_ASSET, "ReadAsset");
        assert_eq!(VERB_UPDATE_ASSET, "UpdateAsset");
    }
}
