use super::*;
use proptest::prelude::*;

fn hex32(s: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    hex::decode_to_slice(s, &mut out).unwrap();
    out
}

#[test]
fn test_namehash_vectors() {
    assert_eq!(namehash("").unwrap(), [0u8; 32]);
    assert_eq!(
        namehash("eth").unwrap(),
        hex32("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
    );
    assert_eq!(
        namehash("foo.eth").unwrap(),
        hex32("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
    );
    assert_eq!(
        namehash("addr.reverse").unwrap(),
        hex32("91d1777781884d03a6757a803996e38de2a42967fb37eeaca72729271025a9e2")
    );
}

#[test]
fn test_labelhash_matches_single_label_fold() {
    // namehash("eth") = keccak256(zero ++ labelhash("eth"))
    let mut buf = [0u8; 64];
    buf[32..].copy_from_slice(&labelhash("eth").unwrap());
    assert_eq!(keccak256(buf).unwrap(), namehash("eth").unwrap());
}

#[test]
fn test_reverse_name_is_lowercase() {
    let address = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
    assert_eq!(
        reverse_name(&address),
        "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed.addr.reverse"
    );
}

#[test]
fn test_reverse_node_composes_with_suffix() {
    let address = [0xABu8; 20];
    let expected = namehash(&format!("{}.addr.reverse", "ab".repeat(20))).unwrap();
    assert_eq!(reverse_node(&address).unwrap(), expected);
}

proptest! {
    #[test]
    fn namehash_extends_parent(label in "[a-z0-9]{1,16}", parent in "[a-z]{1,8}") {
        let name = format!("{label}.{parent}");
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&namehash(&parent).unwrap());
        buf[32..].copy_from_slice(&labelhash(&label).unwrap());
        prop_assert_eq!(namehash(&name).unwrap(), keccak256(buf).unwrap());
    }
}
