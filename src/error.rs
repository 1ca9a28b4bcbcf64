/// Error types for the off-chain lookup coder and gateway
use crate::dns_name::DnsNameError;
use thiserror::Error;

/// Errors raised while decoding requests or encoding results and responses
#[derive(Error, Debug)]
pub enum CoderError {
    /// Sender did not decode to exactly 20 bytes
    #[error("sender is not a valid address")]
    InvalidSender,

    /// Request data is not hexadecimal
    #[error("data is not a valid hex string")]
    InvalidHex(#[source] hex::FromHexError),

    /// Request data does not start with the `resolve(bytes,bytes)` selector
    #[error("data is not a resolve call")]
    NotAResolveCall,

    /// ABI decoding of the outer call or the lookup inputs failed
    #[error("failed to decode {what}")]
    MalformedCalldata {
        what: &'static str,
        #[source]
        source: Option<alloy_sol_types::Error>,
    },

    /// The DNS-encoded name inside the request could not be parsed
    #[error("failed to parse dns-encoded name in the resolve calldata")]
    InvalidDnsName(#[source] DnsNameError),

    /// Inner call targets a resolver function we do not serve
    #[error("unsupported lookup: 0x{}", hex::encode(.selector))]
    UnsupportedLookup { selector: [u8; 4] },

    /// The `node` argument is not the namehash of the queried name
    #[error("name hash does not match the lookup input")]
    NameHashMismatch,

    /// Backend result has the wrong length for the lookup type
    #[error("address must be 20 bytes long")]
    InvalidResultLength { expected: usize, actual: usize },

    #[error("signature must be 65 bytes long")]
    InvalidSignatureLength(usize),

    #[error("invalid \"v\" value in the signature")]
    InvalidSignatureRecoveryId(u8),

    /// Result bytes could not be produced or encoded
    #[error("failed to ABI-encode the result: {0}")]
    EncodingFailed(String),
}

impl CoderError {
    pub(crate) fn malformed(what: &'static str, source: alloy_sol_types::Error) -> Self {
        CoderError::MalformedCalldata {
            what,
            source: Some(source),
        }
    }
}

/// Result type alias for coder operations
pub type CoderResult<T> = Result<T, CoderError>;

/// Errors raised by the signing gateway around the coder
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Request or response coding errors
    #[error(transparent)]
    Coder(#[from] CoderError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record store errors (bad values, unreadable documents)
    #[error("Record store error: {0}")]
    Records(String),

    /// Signing key or signature errors
    #[error("Signing error: {0}")]
    Signing(String),

    /// No records are configured for the queried name
    #[error("Name not found: {0}")]
    NameNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
