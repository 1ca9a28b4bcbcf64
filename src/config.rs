/// Configuration management for the off-chain lookup gateway
use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default validity window of a signed response, in seconds
pub const DEFAULT_RESPONSE_TTL: u64 = 300;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub signing: SigningConfig,
    pub records: RecordsConfig,
    pub response: ResponseConfig,
    pub logging: LoggingConfig,
}

/// Signing key configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    /// secp256k1 private key, hex
    pub private_key_hex: String,
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("private_key_hex", &"<redacted>")
            .finish()
    }
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    pub path: PathBuf,
}

/// Response configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Seconds a signed response stays valid
    pub ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> GatewayResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(var: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let private_key_hex = var("GATEWAY_SIGNER_PRIVATE_KEY_HEX").ok_or_else(|| {
            GatewayError::Config("GATEWAY_SIGNER_PRIVATE_KEY_HEX is required".to_string())
        })?;

        let records_path = var("GATEWAY_RECORDS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./records.json"));

        let ttl_seconds = match var("GATEWAY_RESPONSE_TTL") {
            Some(value) => value.parse().map_err(|_| {
                GatewayError::Config(format!("Invalid GATEWAY_RESPONSE_TTL: {}", value))
            })?,
            None => DEFAULT_RESPONSE_TTL,
        };

        let log_level = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(GatewayConfig {
            signing: SigningConfig { private_key_hex },
            records: RecordsConfig { path: records_path },
            response: ResponseConfig { ttl_seconds },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> GatewayResult<()> {
        let key = &self.signing.private_key_hex;
        let key = key.strip_prefix("0x").unwrap_or(key);
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GatewayError::Config(
                "Signer private key must be 32 bytes of hex".to_string(),
            ));
        }

        if self.response.ttl_seconds == 0 {
            return Err(GatewayError::Config(
                "Response TTL must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
