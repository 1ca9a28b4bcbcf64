/// CCIP-Read gateway
///
/// Answers one `{sender, data}` request at a time: decode the lookup, fetch
/// the raw record, encode and sign it, and return the callback payload.
use crate::coder::{decode_request, encode_response};
use crate::config::GatewayConfig;
use crate::crypto::ResponseSigner;
use crate::error::{CoderError, GatewayError, GatewayResult};
use crate::records::{RecordSource, RecordStore};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Request body of a CCIP-Read gateway call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// Resolver contract that raised `OffchainLookup`
    pub sender: String,
    /// `resolve(bytes,bytes)` calldata, hex
    pub data: String,
}

/// Response body of a CCIP-Read gateway call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// ABI-encoded `(bytes result, uint64 expires, bytes sig)`, hex
    pub data: String,
}

/// Signing gateway over a record source
pub struct Gateway {
    signer: ResponseSigner,
    records: Box<dyn RecordSource + Send + Sync>,
    ttl: Duration,
}

impl Gateway {
    pub fn new(
        signer: ResponseSigner,
        records: impl RecordSource + Send + Sync + 'static,
        ttl: Duration,
    ) -> Self {
        Self {
            signer,
            records: Box::new(records),
            ttl,
        }
    }

    /// Build a gateway from configuration, loading the record store from disk
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let signer = ResponseSigner::from_hex(&config.signing.private_key_hex)?;
        let records = RecordStore::load(&config.records.path)?;
        let ttl = i64::try_from(config.response.ttl_seconds)
            .map_err(|_| GatewayError::Config("Response TTL is too large".to_string()))?;

        info!(
            "Loaded {} names from {}, signing as {}",
            records.len(),
            config.records.path.display(),
            signer.address()
        );

        Ok(Self::new(signer, records, Duration::seconds(ttl)))
    }

    /// Address the resolver must trust to accept our responses
    pub fn signer_address(&self) -> alloy_primitives::Address {
        self.signer.address()
    }

    /// Handle a request, stamping the response to expire `ttl` from now
    pub fn handle(&self, request: &GatewayRequest) -> GatewayResult<GatewayResponse> {
        self.handle_at(request, Utc::now())
    }

    /// Handle a request as if received at `now`
    pub fn handle_at(
        &self,
        request: &GatewayRequest,
        now: DateTime<Utc>,
    ) -> GatewayResult<GatewayResponse> {
        let lookup = decode_request(&request.sender, &request.data).map_err(|e| {
            warn!("Rejected lookup from {}: {}", request.sender, e);
            e
        })?;

        debug!(
            "Decoded {} lookup for {} from {}",
            lookup.kind(),
            lookup.name(),
            lookup.sender()
        );

        let result = self.records.resolve(&lookup)?;

        let expires = u64::try_from((now + self.ttl).timestamp())
            .map_err(|_| CoderError::EncodingFailed("expiry precedes the Unix epoch".to_string()))?;

        let encoded = lookup.encode_result(&result, expires)?;
        let signature = self.signer.sign_hash(&encoded.hash)?;
        let response = encode_response(&encoded.data, expires, &signature)?;

        info!(
            "Signed {} lookup for {} (expires {})",
            lookup.kind(),
            lookup.name(),
            expires
        );

        Ok(GatewayResponse {
            data: format!("0x{}", hex::encode(response)),
        })
    }

    /// Handle a JSON request body and produce a JSON response body
    pub fn handle_json(&self, body: &str) -> GatewayResult<String> {
        let request: GatewayRequest = serde_json::from_str(body)?;
        let response = self.handle(&request)?;
        Ok(serde_json::to_string(&response)?)
    }
}
