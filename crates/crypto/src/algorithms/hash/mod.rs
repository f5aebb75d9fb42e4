// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions using the RustCrypto `sha2` and `sha3` crates

use crate::error::HashError;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, HashError>;
}

/// SHA-256, used for proposal content digests.
#[derive(Default, Clone)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, HashError> {
        Ok(Sha256::digest(message).to_vec())
    }
}

/// Keccak-256 (the pre-standard SHA-3 variant used by Ethereum), used for ENS hashing.
#[derive(Default, Clone)]
pub struct Keccak256Hash;

impl HashFunction for Keccak256Hash {
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, HashError> {
        Ok(Keccak256::digest(message).to_vec())
    }
}

/// Generic hasher that can use any hash function
pub struct GenericHasher<H: HashFunction> {
    /// Hash function implementation
    hash_function: H,
}

impl<H: HashFunction> GenericHasher<H> {
    /// Create a new hasher with the given hash function
    pub fn new(hash_function: H) -> Self {
        Self { hash_function }
    }

    /// Hash a message
    pub fn hash(&self, message: &[u8]) -> Result<Vec<u8>, HashError> {
        self.hash_function.hash(message)
    }

    /// Hash a message into a fixed 32-byte array.
    pub fn hash32(&self, message: &[u8]) -> Result<[u8; 32], HashError> {
        self.hash(message)?
            .try_into()
            .map_err(|bytes: Vec<u8>| HashError::InvalidHashLength {
                expected: 32,
                got: bytes.len(),
            })
    }
}

/// Create a SHA-256 hash of any type that can be referenced as bytes
pub fn sha256<T: AsRef<[u8]>>(data: T) -> Result<[u8; 32], HashError> {
    GenericHasher::new(Sha256Hash).hash32(data.as_ref())
}

/// Create a Keccak-256 hash of any type that can be referenced as bytes
pub fn keccak256<T: AsRef<[u8]>>(data: T) -> Result<[u8; 32], HashError> {
    GenericHasher::new(Keccak256Hash).hash32(data.as_ref())
}

#[cfg(test)]
mod tests;
