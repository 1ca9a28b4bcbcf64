/// Resolver lookups decoded from a `resolve(bytes,bytes)` call
///
/// The set of lookups is fixed by the resolver interfaces we serve, so it is
/// a closed enum rather than a trait object.

pub mod addr;
pub mod multicoin;
pub mod text;

pub use addr::AddrLookup;
pub use multicoin::MulticoinAddrLookup;
pub use text::TextLookup;

use crate::error::{CoderError, CoderResult};
use crate::hash::binding_hash;
use crate::namehash::namehash;
use alloy_primitives::{Address, B256};

/// ABI-encoded result together with the hash the gateway must sign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    pub data: Vec<u8>,
    pub hash: B256,
}

/// A validated lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// `addr(bytes32)`
    Addr(AddrLookup),
    /// `addr(bytes32,uint256)`
    MulticoinAddr(MulticoinAddrLookup),
    /// `text(bytes32,string)`
    Text(TextLookup),
}

impl Lookup {
    fn origin(&self) -> &LookupOrigin {
        match self {
            Lookup::Addr(l) => &l.origin,
            Lookup::MulticoinAddr(l) => &l.origin,
            Lookup::Text(l) => &l.origin,
        }
    }

    /// The queried name, already checked against the `node` argument
    pub fn name(&self) -> &str {
        &self.origin().name
    }

    /// Address of the contract that issued the lookup
    pub fn sender(&self) -> Address {
        self.origin().sender
    }

    /// The complete `resolve` calldata as received
    pub fn request_data(&self) -> &[u8] {
        &self.origin().request_data
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Lookup::Addr(_) => "addr",
            Lookup::MulticoinAddr(_) => "multicoin-addr",
            Lookup::Text(_) => "text",
        }
    }

    /// Encode a backend result and compute the hash binding it to this request
    pub fn encode_result(&self, result: &[u8], expires: u64) -> CoderResult<EncodedResult> {
        match self {
            Lookup::Addr(l) => l.encode_result(result, expires),
            Lookup::MulticoinAddr(l) => l.encode_result(result, expires),
            Lookup::Text(l) => l.encode_result(result, expires),
        }
    }
}

impl From<AddrLookup> for Lookup {
    fn from(lookup: AddrLookup) -> Self {
        Lookup::Addr(lookup)
    }
}

impl From<MulticoinAddrLookup> for Lookup {
    fn from(lookup: MulticoinAddrLookup) -> Self {
        Lookup::MulticoinAddr(lookup)
    }
}

impl From<TextLookup> for Lookup {
    fn from(lookup: TextLookup) -> Self {
        Lookup::Text(lookup)
    }
}

/// Fields every lookup carries from the outer request
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LookupOrigin {
    name: String,
    sender: Address,
    request_data: Vec<u8>,
}

impl LookupOrigin {
    /// Bind the decoded `node` to `name`; fails unless it is the name's namehash
    pub(crate) fn verify(
        name: String,
        node: B256,
        sender: Address,
        request_data: Vec<u8>,
    ) -> CoderResult<Self> {
        if namehash(&name) != node {
            return Err(CoderError::NameHashMismatch);
        }

        Ok(Self {
            name,
            sender,
            request_data,
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn seal(&self, data: Vec<u8>, expires: u64) -> EncodedResult {
        let hash = binding_hash(self.sender, expires, &self.request_data, &data);
        EncodedResult { data, hash }
    }
}
