/// `text(bytes32,string)` lookups
use super::{EncodedResult, LookupOrigin};
use crate::abi::ITextResolver;
use crate::error::{CoderError, CoderResult};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};

/// Lookup of a text record such as `url` or `com.twitter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLookup {
    pub(super) origin: LookupOrigin,
    key: String,
}

impl TextLookup {
    pub fn new(
        name: String,
        lookup_inputs: &[u8],
        sender: Address,
        request_data: Vec<u8>,
    ) -> CoderResult<Self> {
        let call = ITextResolver::textCall::abi_decode_raw(lookup_inputs)
            .map_err(|e| CoderError::malformed("lookup inputs", e))?;

        let origin = LookupOrigin::verify(name, call.node, sender, request_data)?;

        Ok(Self {
            origin,
            key: call.key,
        })
    }

    pub fn name(&self) -> &str {
        self.origin.name()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encode the record value as the `string` return value.
    ///
    /// `string` and `bytes` share one ABI layout, so the value goes through the
    /// `bytes` encoder and is not required to be valid UTF-8.
    pub fn encode_result(&self, result: &[u8], expires: u64) -> CoderResult<EncodedResult> {
        let data = Bytes::copy_from_slice(result).abi_encode();

        Ok(self.origin.seal(data, expires))
    }
}
