/// Request decoding and response encoding for `resolve(bytes,bytes)`
use crate::abi::{
    IResolverService, SELECTOR_ADDR, SELECTOR_MULTICOIN_ADDR, SELECTOR_RESOLVE, SELECTOR_TEXT,
};
use crate::dns_name;
use crate::error::{CoderError, CoderResult};
use crate::lookup::{AddrLookup, Lookup, MulticoinAddrLookup, TextLookup};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};

const ADDRESS_LEN: usize = 20;

/// Signature layout: r (32) | s (32) | v (1)
pub const SIGNATURE_LEN: usize = 65;

/// Recovery ids accepted in `v`: 27/28 plus the extended range some signers emit
const RECOVERY_ID_RANGE: std::ops::RangeInclusive<u8> = 27..=34;

/// Decode a gateway request into the lookup it asks for.
///
/// `sender` is the resolver contract address and `data` the calldata it
/// passed to `OffchainLookup`; both are hex with an optional `0x` prefix.
pub fn decode_request(sender: &str, data: &str) -> CoderResult<Lookup> {
    let sender_bytes = decode_hex(sender).map_err(|_| CoderError::InvalidSender)?;
    if sender_bytes.len() != ADDRESS_LEN {
        return Err(CoderError::InvalidSender);
    }
    let sender = Address::from_slice(&sender_bytes);

    let request_data = decode_hex(data).map_err(CoderError::InvalidHex)?;

    if request_data.len() < 4 || request_data[..4] != SELECTOR_RESOLVE {
        return Err(CoderError::NotAResolveCall);
    }

    let resolve = IResolverService::resolveCall::abi_decode_raw(&request_data[4..])
        .map_err(|e| CoderError::malformed("resolve calldata", e))?;

    let name = dns_name::decode(&resolve.name).map_err(CoderError::InvalidDnsName)?;

    let Some((selector, lookup_inputs)) = resolve.data.split_first_chunk::<4>() else {
        return Err(CoderError::MalformedCalldata {
            what: "resolve calldata",
            source: None,
        });
    };

    let lookup = match *selector {
        SELECTOR_ADDR => AddrLookup::new(name, lookup_inputs, sender, request_data)?.into(),
        SELECTOR_MULTICOIN_ADDR => {
            MulticoinAddrLookup::new(name, lookup_inputs, sender, request_data)?.into()
        }
        SELECTOR_TEXT => TextLookup::new(name, lookup_inputs, sender, request_data)?.into(),
        selector => return Err(CoderError::UnsupportedLookup { selector }),
    };

    Ok(lookup)
}

/// ABI-encode the `(bytes result, uint64 expires, bytes sig)` returned to the
/// resolver's callback
pub fn encode_response(result: &[u8], expires: u64, signature: &[u8]) -> CoderResult<Vec<u8>> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CoderError::InvalidSignatureLength(signature.len()));
    }

    let v = signature[SIGNATURE_LEN - 1];
    if !RECOVERY_ID_RANGE.contains(&v) {
        return Err(CoderError::InvalidSignatureRecoveryId(v));
    }

    Ok((
        Bytes::copy_from_slice(result),
        expires,
        Bytes::copy_from_slice(signature),
    )
        .abi_encode_params())
}

/// Decode hex with or without a `0x` prefix
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{IAddrResolver, IMulticoinAddrResolver, ITextResolver};
    use crate::lookup::test_support::*;
    use crate::namehash::namehash;
    use alloy_primitives::U256;
    use rand::Rng;
    use std::error::Error as _;

    fn hex_prefixed(bytes: &[u8]) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    fn sender_hex(sender: &Address) -> String {
        hex_prefixed(sender.as_slice())
    }

    #[test]
    fn test_decode_request_addr_lookup() {
        let sender = random_address();
        let name = random_name();

        let inner = IAddrResolver::addrCall {
            node: namehash(&name),
        }
        .abi_encode();
        let request_data = resolve_call(&name, inner);

        let lookup = decode_request(&sender_hex(&sender), &hex_prefixed(&request_data)).unwrap();

        assert!(matches!(lookup, Lookup::Addr(_)));
        assert_eq!(lookup.name(), name);
        assert_eq!(lookup.sender(), sender);
        assert_eq!(lookup.request_data(), request_data.as_slice());
    }

    #[test]
    fn test_decode_request_multicoin_addr_lookup() {
        let sender = random_address();
        let name = random_name();
        let coin_type = U256::from(rand::thread_rng().gen_range(0u64..100_000));

        let inner = IMulticoinAddrResolver::addrCall {
            node: namehash(&name),
            coinType: coin_type,
        }
        .abi_encode();
        let request_data = resolve_call(&name, inner);

        let lookup = decode_request(&sender_hex(&sender), &hex_prefixed(&request_data)).unwrap();

        let Lookup::MulticoinAddr(multicoin) = &lookup else {
            panic!("expected a multicoin addr lookup, got {}", lookup.kind());
        };
        assert_eq!(multicoin.name(), name);
        assert_eq!(multicoin.coin_type(), coin_type);
        assert_eq!(lookup.sender(), sender);
        assert_eq!(lookup.request_data(), request_data.as_slice());
    }

    #[test]
    fn test_decode_request_text_lookup() {
        let sender = random_address();
        let name = random_name();
        let key = format!("key{}", rand::thread_rng().gen_range(0..100_000));

        let inner = ITextResolver::textCall {
            node: namehash(&name),
            key: key.clone(),
        }
        .abi_encode();
        let request_data = resolve_call(&name, inner);

        // bare hex, no prefix
        let lookup = decode_request(
            &hex::encode(sender.as_slice()),
            &hex::encode(&request_data),
        )
        .unwrap();

        let Lookup::Text(text) = &lookup else {
            panic!("expected a text lookup, got {}", lookup.kind());
        };
        assert_eq!(text.name(), name);
        assert_eq!(text.key(), key);
        assert_eq!(lookup.sender(), sender);
        assert_eq!(lookup.request_data(), request_data.as_slice());
    }

    #[test]
    fn test_decode_request_invalid_address() {
        let err = decode_request("0xcafebabe", "0x").unwrap_err();
        assert_eq!(err.to_string(), "sender is not a valid address");

        let err = decode_request("not hex", "0x").unwrap_err();
        assert!(matches!(err, CoderError::InvalidSender));
    }

    #[test]
    fn test_decode_request_non_hex_data() {
        let sender = random_address();
        let err = decode_request(&sender_hex(&sender), "zebra").unwrap_err();
        assert_eq!(err.to_string(), "data is not a valid hex string");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_decode_request_empty_data() {
        let sender = random_address();
        let err = decode_request(&sender_hex(&sender), "0x").unwrap_err();
        assert_eq!(err.to_string(), "data is not a resolve call");
    }

    #[test]
    fn test_decode_request_wrong_outer_selector() {
        let sender = random_address();
        let name = random_name();
        let inner = IAddrResolver::addrCall {
            node: namehash(&name),
        }
        .abi_encode();

        // an addr call sent directly instead of wrapped in resolve
        let err = decode_request(&sender_hex(&sender), &hex_prefixed(&inner)).unwrap_err();
        assert!(matches!(err, CoderError::NotAResolveCall));
    }

    #[test]
    fn test_decode_request_malformed_data() {
        let sender = random_address();
        let name = random_name();

        let inner = IAddrResolver::addrCall {
            node: namehash(&name),
        }
        .abi_encode();

        // resolve selector followed by addr arguments
        let mut malformed = SELECTOR_RESOLVE.to_vec();
        malformed.extend_from_slice(&inner[4..]);

        let err = decode_request(&sender_hex(&sender), &hex_prefixed(&malformed)).unwrap_err();
        assert!(err.to_string().contains("failed to decode resolve calldata"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_decode_request_invalid_dns_encoded_name() {
        let sender = random_address();
        let name = random_name();

        let inner = IAddrResolver::addrCall {
            node: namehash(&name),
        }
        .abi_encode();

        // raw name instead of the dns-encoded name
        let request_data = IResolverService::resolveCall {
            name: name.as_bytes().to_vec().into(),
            data: inner.into(),
        }
        .abi_encode();

        let err = decode_request(&sender_hex(&sender), &hex_prefixed(&request_data)).unwrap_err();
        assert!(err
            .to_string()
            .contains("failed to parse dns-encoded name"));
        assert!(matches!(err, CoderError::InvalidDnsName(_)));
    }

    #[test]
    fn test_decode_request_unsupported_lookup() {
        let sender = random_address();
        let name = random_name();

        let mut inner = IAddrResolver::addrCall {
            node: namehash(&name),
        }
        .abi_encode();

        let mut random_selector: [u8; 4] = rand::thread_rng().gen();
        while [SELECTOR_ADDR, SELECTOR_MULTICOIN_ADDR, SELECTOR_TEXT].contains(&random_selector) {
            random_selector = rand::thread_rng().gen();
        }
        inner[..4].copy_from_slice(&random_selector);

        let request_data = resolve_call(&name, inner);

        let err = decode_request(&sender_hex(&sender), &hex_prefixed(&request_data)).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("unsupported lookup: {}", hex_prefixed(&random_selector))
        );
        assert!(matches!(
            err,
            CoderError::UnsupportedLookup { selector } if selector == random_selector
        ));
    }

    #[test]
    fn test_decode_request_short_inner_call() {
        let sender = random_address();
        let request_data = resolve_call("alice.eth", vec![0x3b, 0x3b]);

        let err = decode_request(&sender_hex(&sender), &hex_prefixed(&request_data)).unwrap_err();
        assert!(matches!(
            err,
            CoderError::MalformedCalldata { source: None, .. }
        ));
    }

    #[test]
    fn test_decode_request_name_hash_mismatch() {
        let sender = random_address();

        let inner = IAddrResolver::addrCall {
            node: namehash("bob.eth"),
        }
        .abi_encode();
        let request_data = resolve_call("alice.eth", inner);

        let err = decode_request(&sender_hex(&sender), &hex_prefixed(&request_data)).unwrap_err();
        assert!(matches!(err, CoderError::NameHashMismatch));
    }

    fn mock_signature(v: u8) -> Vec<u8> {
        let mut signature = vec![0u8; SIGNATURE_LEN];
        rand::thread_rng().fill(&mut signature[..64]);
        signature[64] = v;
        signature
    }

    #[test]
    fn test_encode_response() {
        let result: [u8; 32] = rand::thread_rng().gen();
        let expires = 1_900_000_000u64;
        let signature = mock_signature(27);

        let response = encode_response(&result, expires, &signature).unwrap();

        let (decoded_result, decoded_expires, decoded_signature) =
            <(Bytes, u64, Bytes)>::abi_decode_params(&response).unwrap();
        assert_eq!(decoded_result.as_ref(), result.as_slice());
        assert_eq!(decoded_expires, expires);
        assert_eq!(decoded_signature.as_ref(), signature.as_slice());
    }

    #[test]
    fn test_encode_response_matches_resolve_returns() {
        let result = vec![0xaa; 40];
        let signature = mock_signature(28);

        let response = encode_response(&result, 7, &signature).unwrap();

        let returns = IResolverService::resolveCall::abi_decode_returns(&response).unwrap();
        assert_eq!(returns.result.as_ref(), result.as_slice());
        assert_eq!(returns.expires, 7);
        assert_eq!(returns.sig.as_ref(), signature.as_slice());
    }

    #[test]
    fn test_encode_response_invalid_signature_length() {
        for len in [0usize, 64, 66] {
            let err = encode_response(b"result", 1, &vec![27u8; len]).unwrap_err();
            assert_eq!(err.to_string(), "signature must be 65 bytes long");
        }
    }

    #[test]
    fn test_encode_response_invalid_recovery_id() {
        for v in [0u8, 26, 35] {
            let err = encode_response(b"result", 1, &mock_signature(v)).unwrap_err();
            assert_eq!(err.to_string(), "invalid \"v\" value in the signature");
            assert!(matches!(err, CoderError::InvalidSignatureRecoveryId(got) if got == v));
        }
    }

    #[test]
    fn test_encode_response_accepts_extended_recovery_ids() {
        for v in [27u8, 28, 34] {
            assert!(encode_response(b"result", 1, &mock_signature(v)).is_ok());
        }
    }
}
