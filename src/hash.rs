/// Binding hash signed by the gateway
use alloy_primitives::{keccak256, Address, Keccak256, B256};

/// EIP-191 version byte for "data with intended validator"
const EIP191_PREFIX: [u8; 2] = [0x19, 0x00];

/// Hash binding a result to the request it answers.
///
/// Layout (all fixed width):
/// `0x19 0x00 | sender (20) | expires (8, big-endian) | keccak256(request) | keccak256(result)`
///
/// This is what the origin resolver recomputes before recovering the signer.
pub fn binding_hash(sender: Address, expires: u64, request_data: &[u8], result_data: &[u8]) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(EIP191_PREFIX);
    hasher.update(sender.as_slice());
    hasher.update(expires.to_be_bytes());
    hasher.update(keccak256(request_data));
    hasher.update(keccak256(result_data));
    hasher.finalize()
}
