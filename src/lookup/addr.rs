/// `addr(bytes32)` lookups
use super::{EncodedResult, LookupOrigin};
use crate::abi::IAddrResolver;
use crate::error::{CoderError, CoderResult};
use alloy_primitives::Address;
use alloy_sol_types::{SolCall, SolValue};

/// Length of an Ethereum address result
const ADDRESS_LEN: usize = 20;

/// Lookup of the Ethereum address of a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrLookup {
    pub(super) origin: LookupOrigin,
}

impl AddrLookup {
    /// Decode `addr(bytes32)` arguments (selector already stripped) and check
    /// that `node` is the namehash of `name`
    pub fn new(
        name: String,
        lookup_inputs: &[u8],
        sender: Address,
        request_data: Vec<u8>,
    ) -> CoderResult<Self> {
        let call = IAddrResolver::addrCall::abi_decode_raw(lookup_inputs)
            .map_err(|e| CoderError::malformed("lookup inputs", e))?;

        let origin = LookupOrigin::verify(name, call.node, sender, request_data)?;

        Ok(Self { origin })
    }

    pub fn name(&self) -> &str {
        self.origin.name()
    }

    /// Encode a 20-byte address as the `address` return value
    pub fn encode_result(&self, result: &[u8], expires: u64) -> CoderResult<EncodedResult> {
        if result.len() != ADDRESS_LEN {
            return Err(CoderError::InvalidResultLength {
                expected: ADDRESS_LEN,
                actual: result.len(),
            });
        }

        let data = Address::from_slice(result).abi_encode();

        Ok(self.origin.seal(data, expires))
    }
}
