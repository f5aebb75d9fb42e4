//! Tests for hash function implementations

use super::{keccak256, sha256, GenericHasher, HashFunction, Keccak256Hash, Sha256Hash};
use proptest::prelude::*;

#[test]
fn test_hash_functions() {
    let message = b"test message";

    let sha = Sha256Hash;
    let keccak = Keccak256Hash;

    let sha_hash = sha.hash(message).unwrap();
    let keccak_hash = keccak.hash(message).unwrap();

    assert_eq!(sha_hash.len(), 32);
    assert_eq!(keccak_hash.len(), 32);

    // Same width, different functions
    assert_ne!(sha_hash, keccak_hash);

    // Verify deterministic behavior
    assert_eq!(sha.hash(message).unwrap(), sha.hash(message).unwrap());
    assert_eq!(keccak.hash(message).unwrap(), keccak.hash(message).unwrap());
}

#[test]
fn test_generic_hasher() {
    let hasher = GenericHasher::new(Sha256Hash);
    assert_eq!(hasher.hash32(b"abc").unwrap(), sha256(b"abc").unwrap());
    assert_eq!(
        GenericHasher::new(Keccak256Hash).hash32(b"abc").unwrap(),
        keccak256(b"abc").unwrap()
    );
}

#[test]
fn test_known_vectors() {
    assert_eq!(
        hex::encode(sha256(b"").unwrap()),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        hex::encode(sha256(b"hello").unwrap()),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert_eq!(
        hex::encode(keccak256(b"").unwrap()),
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );
}

proptest! {
    #[test]
    fn sha256_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(sha256(&data).unwrap(), sha256(&data).unwrap());
    }

    #[test]
    fn sha256_separates_distinct_inputs(
        a in proptest::collection::vec(any::<u8>(), 0..128),
        b in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(sha256(&a).unwrap(), sha256(&b).unwrap());
    }
}
