/// ENS namehash (EIP-137)
use alloy_primitives::{keccak256, Keccak256, B256};
use std::borrow::Cow;

const VARIATION_SELECTOR: char = '\u{fe0f}';

/// Compute the node identifier of a dotted name.
///
/// `node("")` is 32 zero bytes; every other name folds its labels from the
/// right as `node = keccak256(node ++ keccak256(label))`.
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }

    let name = if name.contains(VARIATION_SELECTOR) {
        Cow::Owned(name.replace(VARIATION_SELECTOR, ""))
    } else {
        Cow::Borrowed(name)
    };

    name.rsplit('.').fold(B256::ZERO, |node, label| {
        let mut hasher = Keccak256::new();
        hasher.update(node);
        hasher.update(keccak256(label.as_bytes()));
        hasher.finalize()
    })
}
