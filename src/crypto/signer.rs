/// Response signing
///
/// Implements recoverable secp256k1 signing of binding hashes so the
/// off-chain resolver can `ecrecover` the gateway's address.

use crate::error::{GatewayError, GatewayResult};
use alloy_primitives::{keccak256, Address, B256};
use k256::{
    ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey},
    SecretKey,
};

/// Offset added to the recovery id in the `v` byte
const V_OFFSET: u8 = 27;

/// Response signer - holds the gateway's signing key
pub struct ResponseSigner {
    signing_key: SigningKey,
}

impl ResponseSigner {
    /// Create a new signer from a private key (32 bytes)
    pub fn new(private_key: &[u8]) -> GatewayResult<Self> {
        if private_key.len() != 32 {
            return Err(GatewayError::Signing(
                "Private key must be exactly 32 bytes".to_string(),
            ));
        }

        let secret_key = SecretKey::from_slice(private_key)
            .map_err(|e| GatewayError::Signing(format!("Invalid private key: {}", e)))?;

        Ok(Self {
            signing_key: SigningKey::from(secret_key),
        })
    }

    /// Create a signer from a hex-encoded private key, with or without `0x`
    pub fn from_hex(hex_key: &str) -> GatewayResult<Self> {
        let key_bytes = hex::decode(hex_key.strip_prefix("0x").unwrap_or(hex_key))
            .map_err(|e| GatewayError::Signing(format!("Invalid hex private key: {}", e)))?;

        Self::new(&key_bytes)
    }

    /// Ethereum address of the signing key, as listed in the resolver's
    /// trusted signers
    pub fn address(&self) -> Address {
        verifying_key_address(self.signing_key.verifying_key())
    }

    /// Sign a binding hash.
    ///
    /// Returns `r | s | v` with `v` in {27, 28}.
    pub fn sign_hash(&self, hash: &B256) -> GatewayResult<[u8; 65]> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(|e| GatewayError::Signing(format!("Failed to sign hash: {}", e)))?;

        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte() + V_OFFSET;
        Ok(out)
    }
}

/// Recover the address that produced `signature` over `hash`.
///
/// Accepts `v` as 27/28 or as a raw recovery id 0/1.
pub fn recover_signer(hash: &B256, signature: &[u8]) -> GatewayResult<Address> {
    if signature.len() != 65 {
        return Err(GatewayError::Signing(
            "Signature must be exactly 65 bytes".to_string(),
        ));
    }

    let v = signature[64];
    let recovery_byte = if v >= V_OFFSET { v - V_OFFSET } else { v };
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or_else(|| GatewayError::Signing(format!("Invalid recovery id: {}", v)))?;

    let signature = Signature::from_slice(&signature[..64])
        .map_err(|e| GatewayError::Signing(format!("Invalid signature: {}", e)))?;

    let verifying_key = VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id)
        .map_err(|e| GatewayError::Signing(format!("Failed to recover signer: {}", e)))?;

    Ok(verifying_key_address(&verifying_key))
}

fn verifying_key_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 uncompressed marker
    let digest = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&digest[12..])
}
