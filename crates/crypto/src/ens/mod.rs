// Path: crates/crypto/src/ens/mod.rs
//! ENS name hashing (EIP-137) and reverse-record node derivation (EIP-181).

use crate::algorithms::hash::keccak256;
use crate::error::HashError;

/// The root of the reverse-resolution namespace.
pub const REVERSE_SUFFIX: &str = "addr.reverse";

/// The Keccak-256 hash of a single label.
pub fn labelhash(label: &str) -> Result<[u8; 32], HashError> {
    keccak256(label.as_bytes())
}

/// Computes the ENS node of a dot-separated name.
///
/// Starts from 32 zero bytes and folds the labels right to left with
/// `node = keccak256(node ++ keccak256(label))`. The empty name is the root node.
pub fn namehash(name: &str) -> Result<[u8; 32], HashError> {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return Ok(node);
    }
    for label in name.rsplit('.') {
        let mut buf = [0u8; 64];
        let (left, right) = buf.split_at_mut(32);
        left.copy_from_slice(&node);
        right.copy_from_slice(&labelhash(label)?);
        node = keccak256(buf)?;
    }
    Ok(node)
}

/// The reverse-record node for an account: `namehash("<hex>.addr.reverse")`.
///
/// The hex digits are lowercased so every spelling of an address maps to the
/// same node.
pub fn reverse_node(address: &[u8]) -> Result<[u8; 32], HashError> {
    namehash(&reverse_name(address))
}

/// The reverse-record name for an account.
pub fn reverse_name(address: &[u8]) -> String {
    format!("{}.{}", hex::encode(address), REVERSE_SUFFIX)
}

#[cfg(test)]
mod tests;
