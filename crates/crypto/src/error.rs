// Path: crates/crypto/src/error.rs
//! Local error types for the `cfp-crypto` crate.

// Re-export the canonical error type from the types crate.
pub use cfp_types::error::HashError;
