// Path: crates/client/src/names/tests.rs
use super::*;
use crate::test_support::{abi_string, spawn_node, NodeState};
use alloy_sol_types::SolCall;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct FakeLookup {
    names: HashMap<[u8; 32], String>,
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl ReverseLookup for FakeLookup {
    async fn name(&self, node: [u8; 32]) -> Result<String, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RpcError::Transport("connection refused".into()));
        }
        Ok(self.names.get(&node).cloned().unwrap_or_default())
    }
}

const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

fn alice() -> Address {
    parse_address(ALICE).unwrap()
}

#[tokio::test]
async fn resolves_and_caches() {
    let mut fake = FakeLookup::default();
    fake.names.insert(
        reverse_node(alice().as_slice()).unwrap(),
        "alice.users.eth".into(),
    );
    let resolver = NameResolver::new(fake);
    assert_eq!(resolver.display_name(ALICE).await, "alice.users.eth");
    assert_eq!(resolver.display_name(ALICE).await, "alice.users.eth");
    assert_eq!(resolver.lookup.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_record_shows_raw_address() {
    let resolver = NameResolver::new(FakeLookup::default());
    assert_eq!(resolver.display_name(ALICE).await, ALICE);
    assert_eq!(resolver.lookup(&alice()).await, None);
}

#[tokio::test]
async fn lookup_failure_is_not_an_error() {
    let resolver = NameResolver::new(FakeLookup {
        fail: true,
        ..Default::default()
    });
    assert_eq!(resolver.display_name(ALICE).await, ALICE);
}

#[tokio::test]
async fn non_address_passes_through() {
    let resolver = NameResolver::new(FakeLookup::default());
    assert_eq!(resolver.display_name("anonymous").await, "anonymous");
    assert_eq!(resolver.lookup.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn public_resolver_decodes_name() {
    let mut state = NodeState::default();
    state.call_results.insert(
        IPublicResolver::nameCall::SELECTOR,
        abi_string("bob.users.eth"),
    );
    let node = spawn_node(state).await;
    let rpc = Arc::new(JsonRpcClient::new(&node.url).unwrap());
    let resolver = NameResolver::new(PublicResolver::new(rpc, Address::with_last_byte(1)));
    assert_eq!(
        resolver.lookup(&alice()).await.as_deref(),
        Some("bob.users.eth")
    );
}

#[tokio::test]
async fn undeployed_resolver_yields_no_name() {
    let node = spawn_node(NodeState::default()).await;
    let rpc = Arc::new(JsonRpcClient::new(&node.url).unwrap());
    let resolver = NameResolver::new(PublicResolver::new(rpc, Address::with_last_byte(1)));
    assert_eq!(resolver.display_name(ALICE).await, ALICE);
}

#[tokio::test]
async fn unconfigured_resolver_knows_no_names() {
    let resolver = NameResolver::new(None::<FakeLookup>);
    assert_eq!(resolver.display_name(ALICE).await, ALICE);

    let mut fake = FakeLookup::default();
    fake.names.insert(
        reverse_node(alice().as_slice()).unwrap(),
        "alice.users.eth".into(),
    );
    let resolver = NameResolver::new(Some(fake));
    assert_eq!(resolver.display_name(ALICE).await, "alice.users.eth");
}
