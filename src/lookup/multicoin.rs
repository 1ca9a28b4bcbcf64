/// `addr(bytes32,uint256)` lookups (ENSIP-9)
use super::{EncodedResult, LookupOrigin};
use crate::abi::IMulticoinAddrResolver;
use crate::error::{CoderError, CoderResult};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};

/// Lookup of a name's address on another chain, identified by SLIP-44 coin type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticoinAddrLookup {
    pub(super) origin: LookupOrigin,
    coin_type: U256,
}

impl MulticoinAddrLookup {
    pub fn new(
        name: String,
        lookup_inputs: &[u8],
        sender: Address,
        request_data: Vec<u8>,
    ) -> CoderResult<Self> {
        let call = IMulticoinAddrResolver::addrCall::abi_decode_raw(lookup_inputs)
            .map_err(|e| CoderError::malformed("lookup inputs", e))?;

        let origin = LookupOrigin::verify(name, call.node, sender, request_data)?;

        Ok(Self {
            origin,
            coin_type: call.coinType,
        })
    }

    pub fn name(&self) -> &str {
        self.origin.name()
    }

    /// Requested coin type, returned by value
    pub fn coin_type(&self) -> U256 {
        self.coin_type
    }

    /// Encode the coin-specific address bytes as the `bytes` return value
    pub fn encode_result(&self, result: &[u8], expires: u64) -> CoderResult<EncodedResult> {
        let data = Bytes::copy_from_slice(result).abi_encode();

        Ok(self.origin.seal(data, expires))
    }
}
