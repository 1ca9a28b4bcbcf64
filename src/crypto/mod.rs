/// Cryptography module for response signing
///
/// Handles secp256k1 signing of binding hashes

pub mod signer;

pub use signer::{recover_signer, ResponseSigner};
