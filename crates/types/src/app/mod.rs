// Path: crates/types/src/app/mod.rs
//! Core application-level data structures: calls, proposals and creators.

/// Data structures describing a call for proposals.
pub mod call;
/// Data structures for creator authorization.
pub mod creator;
/// Data structures for proposal content digests and registrations.
pub mod proposal;

pub use call::*;
pub use creator::*;
pub use proposal::*;

use crate::error::FormatError;
use alloy_primitives::Address;

/// Strips an optional `0x`/`0X` prefix from a hex string.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parses an account address, with or without the `0x` prefix.
///
/// The checksum is not enforced; addresses arrive from the backend and from
/// wallets in mixed case.
pub fn parse_address(s: &str) -> Result<Address, FormatError> {
    s.trim()
        .parse::<Address>()
        .map_err(|_| FormatError::InvalidAddress(s.to_string()))
}

/// Whether two address strings name the same account, ignoring case and prefix.
/// Strings that do not parse as addresses never match.
pub fn same_address(a: &str, b: &str) -> bool {
    matches!((parse_address(a), parse_address(b)), (Ok(a), Ok(b)) if a == b)
}
