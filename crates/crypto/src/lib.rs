// Path: crates/crypto/src/lib.rs
//! # CFP Crypto Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # CFP Registry Cryptography
//!
//! Hash functions used by the registry client: SHA-256 content digests of
//! proposal files, and the Keccak-256 based ENS name hashing used for name
//! registration and reverse resolution.

pub mod algorithms;
pub mod digest;
pub mod ens;
pub mod error;

pub use digest::{digest_bytes, digest_file};
pub use ens::{labelhash, namehash, reverse_node};
