/// Solidity interfaces spoken by the off-chain resolver
///
/// Each resolver function lives in its own interface so the two overloads of
/// `addr` keep distinct call types.
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Entry point the on-chain resolver reverts into via `OffchainLookup`
    interface IResolverService {
        function resolve(bytes name, bytes data)
            external
            view
            returns (bytes result, uint64 expires, bytes sig);
    }

    interface IAddrResolver {
        function addr(bytes32 node) external view returns (address);
    }

    /// ENSIP-9 multicoin addresses
    interface IMulticoinAddrResolver {
        function addr(bytes32 node, uint256 coinType) external view returns (bytes);
    }

    interface ITextResolver {
        function text(bytes32 node, string key) external view returns (string);
    }
}

/// `resolve(bytes,bytes)`
pub const SELECTOR_RESOLVE: [u8; 4] = IResolverService::resolveCall::SELECTOR;

/// `addr(bytes32)`
pub const SELECTOR_ADDR: [u8; 4] = IAddrResolver::addrCall::SELECTOR;

/// `addr(bytes32,uint256)`
pub const SELECTOR_MULTICOIN_ADDR: [u8; 4] = IMulticoinAddrResolver::addrCall::SELECTOR;

/// `text(bytes32,string)`
pub const SELECTOR_TEXT: [u8; 4] = ITextResolver::textCall::SELECTOR;
