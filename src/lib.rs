//! ENS off-chain lookup coder
//!
//! Decodes EIP-3668 (CCIP-Read) `resolve(bytes,bytes)` requests issued by an
//! ENS off-chain resolver, encodes results and signed responses the resolver
//! can verify on-chain, and wires them into a small signing gateway.

pub mod abi;
pub mod coder;
pub mod config;
pub mod crypto;
pub mod dns_name;
pub mod error;
pub mod gateway;
pub mod hash;
pub mod lookup;
pub mod namehash;
pub mod records;

pub use coder::{decode_request, encode_response};
pub use error::{CoderError, CoderResult, GatewayError, GatewayResult};
pub use hash::binding_hash;
pub use lookup::{AddrLookup, EncodedResult, Lookup, MulticoinAddrLookup, TextLookup};
pub use namehash::namehash;
