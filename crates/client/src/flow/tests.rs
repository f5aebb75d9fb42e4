// Path: crates/client/src/flow/tests.rs
use super::*;
use crate::api::AuthorizeOutcome;
use async_trait::async_trait;
use cfp_types::app::{Call, CallRecord};
use cfp_types::error::{ApiError, RpcError};
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// An in-memory registry backend.
#[derive(Default)]
struct MemoryApi {
    registered: Mutex<HashSet<(CallId, ContentDigest)>>,
    fail_checks: bool,
    fail_posts: bool,
    posts: AtomicUsize,
}

impl MemoryApi {
    fn with(pairs: &[(CallId, ContentDigest)]) -> Self {
        let api = Self::default();
        api.registered.lock().unwrap().extend(pairs.iter().cloned());
        api
    }
}

#[async_trait]
impl RegistryApi for MemoryApi {
    async fn calls(&self) -> Result<Vec<Call>, ApiError> {
        Ok(vec![])
    }
    async fn call(&self, _: &CallId) -> Result<Option<CallRecord>, ApiError> {
        Ok(None)
    }
    async fn closing_time(&self, _: &CallId) -> Result<Option<DateTime<FixedOffset>>, ApiError> {
        Ok(None)
    }
    async fn creators(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec![])
    }
    async fn created_by(&self, _: &str) -> Result<Vec<CallId>, ApiError> {
        Ok(vec![])
    }
    async fn pending(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec![])
    }
    async fn is_authorized(&self, _: &str) -> Result<bool, ApiError> {
        Ok(false)
    }
    async fn is_registered(&self, _: &str) -> Result<bool, ApiError> {
        Ok(false)
    }
    async fn proposal_data(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<Option<ProposalData>, ApiError> {
        if self.fail_checks {
            return Err(ApiError::Transport("connection refused".into()));
        }
        let found = self
            .registered
            .lock()
            .unwrap()
            .contains(&(call_id.clone(), *digest));
        Ok(found.then(|| ProposalData {
            timestamp: "2024-03-01T10:00:00Z".into(),
            sender: "0x00000000000000000000000000000000000000aa".into(),
            block_number: 7,
        }))
    }
    async fn register_proposal(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<RegisterOutcome, ApiError> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        if self.fail_posts {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal error".into(),
            });
        }
        let fresh = self
            .registered
            .lock()
            .unwrap()
            .insert((call_id.clone(), *digest));
        Ok(if fresh {
            RegisterOutcome::Created
        } else {
            RegisterOutcome::AlreadyRegistered
        })
    }
    async fn contract_owner(&self) -> Result<String, ApiError> {
        Ok(String::new())
    }
    async fn contract_address(&self) -> Result<String, ApiError> {
        Ok(String::new())
    }
    async fn authorize(&self, _: &str) -> Result<AuthorizeOutcome, ApiError> {
        Ok(AuthorizeOutcome::Authorized)
    }
}

enum ChainBehavior {
    Succeed,
    Reject,
    Revert,
    Fail,
}

struct FakeChain {
    behavior: ChainBehavior,
    submitted: Mutex<Vec<([u8; 32], ContentDigest)>>,
}

impl FakeChain {
    fn new(behavior: ChainBehavior) -> Self {
        Self {
            behavior,
            submitted: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl ProposalChain for FakeChain {
    async fn register_proposal(
        &self,
        call_id: [u8; 32],
        digest: &ContentDigest,
    ) -> Result<String, WalletError> {
        self.submitted.lock().unwrap().push((call_id, *digest));
        match self.behavior {
            ChainBehavior::Succeed => Ok("0xfeed".into()),
            ChainBehavior::Reject => Err(WalletError::UserRejected),
            ChainBehavior::Revert => Err(WalletError::Rpc(RpcError::Reverted {
                tx_hash: "0xdead".into(),
            })),
            ChainBehavior::Fail => Err(WalletError::Rpc(RpcError::Transport(
                "connection reset".into(),
            ))),
        }
    }
}

fn short_call() -> CallId {
    "abc123".parse().unwrap()
}

fn long_call() -> CallId {
    CallId::from_bytes(&[0xab; 32])
}

fn hello() -> ContentDigest {
    HELLO.parse().unwrap()
}

#[test]
fn hashing_reaches_hashed_with_hello_digest() {
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    let digest = flow.hash_bytes(b"hello").unwrap();
    assert_eq!(digest, hello());
    assert_eq!(flow.state(), &FlowState::Hashed { digest: hello() });
}

#[tokio::test]
async fn missing_file_leaves_state_alone() {
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    flow.hash_bytes(b"hello").unwrap();
    let err = flow.hash_file(None).await.unwrap_err();
    assert_eq!(err.code(), "HASH_NO_FILE");
    assert_eq!(flow.state().name(), "hashed");
}

#[tokio::test]
async fn check_then_register_anonymously() {
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    flow.hash_bytes(b"hello").unwrap();
    assert_eq!(flow.check().await.unwrap(), &Presence::Absent);

    let state = flow.register(None).await.unwrap().clone();
    assert_eq!(
        state,
        FlowState::Registered {
            digest: hello(),
            transport: RegistrationTransport::Rest,
            tx_hash: None
        }
    );
    let notices = flow.take_notices();
    assert!(notices.contains(&Notice::Warning(ANONYMOUS_FALLBACK.to_string())));
    assert!(flow.take_notices().is_empty());
}

#[tokio::test]
async fn preregistered_pair_blocks_register() {
    let api = MemoryApi::with(&[(short_call(), hello())]);
    let mut flow = RegistrationFlow::new(api, short_call());
    flow.hash_bytes(b"hello").unwrap();
    assert!(matches!(
        flow.check().await.unwrap(),
        Presence::Registered(data) if data.block_number == 7
    ));
    assert_eq!(
        flow.register(None).await.unwrap_err(),
        FlowError::AlreadyRegistered
    );
    assert_eq!(flow.api.posts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn register_requires_check() {
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    assert_eq!(flow.register(None).await.unwrap_err(), FlowError::NotHashed);
    assert_eq!(flow.check().await.unwrap_err(), FlowError::NotHashed);
    flow.hash_bytes(b"hello").unwrap();
    assert_eq!(flow.register(None).await.unwrap_err(), FlowError::NotChecked);
}

#[tokio::test]
async fn rehash_invalidates_check() {
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    flow.hash_bytes(b"hello").unwrap();
    assert_eq!(flow.state(), &FlowState::Hashed { digest: hello() });
    assert_eq!(flow.register(None).await.unwrap_err(), FlowError::NotChecked);
}

#[tokio::test]
async fn concurrent_duplicate_ends_failed() {
    // Both flows see the pair as absent, only the first submission wins.
    let api = std::sync::Arc::new(MemoryApi::default());
    let mut first = RegistrationFlow::new(api.clone(), short_call());
    let mut second = RegistrationFlow::new(api.clone(), short_call());
    for flow in [&mut first, &mut second] {
        flow.hash_bytes(b"hello").unwrap();
        flow.check().await.unwrap();
    }
    assert_eq!(first.register(None).await.unwrap().name(), "registered");
    assert!(matches!(
        second.register(None).await.unwrap(),
        FlowState::Failed {
            reason: FailureReason::AlreadyRegistered,
            ..
        }
    ));
}

#[tokio::test]
async fn failed_register_requires_new_check() {
    let api = MemoryApi {
        fail_posts: true,
        ..Default::default()
    };
    let mut flow = RegistrationFlow::new(api, short_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    let state = flow.register(None).await.unwrap().clone();
    assert!(matches!(
        state,
        FlowState::Failed { reason: FailureReason::Rejected(ref m), .. } if m.contains("500")
    ));
    assert_eq!(flow.register(None).await.unwrap_err(), FlowError::NotChecked);
    assert_eq!(flow.check().await.unwrap(), &Presence::Absent);
}

#[tokio::test]
async fn check_failure_keeps_state() {
    let api = MemoryApi {
        fail_checks: true,
        ..Default::default()
    };
    let mut flow = RegistrationFlow::new(api, short_call());
    flow.hash_bytes(b"hello").unwrap();
    assert!(matches!(
        flow.check().await.unwrap_err(),
        FlowError::Api(ApiError::Transport(_))
    ));
    assert_eq!(flow.state(), &FlowState::Hashed { digest: hello() });
}

#[tokio::test]
async fn registers_on_chain_when_signer_available() {
    let chain = FakeChain::new(ChainBehavior::Succeed);
    let mut flow = RegistrationFlow::new(MemoryApi::default(), long_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    let state = flow.register(Some(&chain)).await.unwrap().clone();
    assert_eq!(
        state,
        FlowState::Registered {
            digest: hello(),
            transport: RegistrationTransport::Chain,
            tx_hash: Some("0xfeed".into())
        }
    );
    assert_eq!(
        chain.submitted.lock().unwrap().as_slice(),
        &[([0xab; 32], hello())]
    );
    assert_eq!(flow.api.posts.load(Ordering::SeqCst), 0);
    assert!(!flow
        .take_notices()
        .iter()
        .any(|n| matches!(n, Notice::Warning(_))));
}

#[tokio::test]
async fn wallet_rejection_is_cancelled() {
    let chain = FakeChain::new(ChainBehavior::Reject);
    let mut flow = RegistrationFlow::new(MemoryApi::default(), long_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    assert!(matches!(
        flow.register(Some(&chain)).await.unwrap(),
        FlowState::Failed {
            reason: FailureReason::Cancelled,
            ..
        }
    ));
}

#[tokio::test]
async fn revert_with_existing_record_is_duplicate() {
    let chain = FakeChain::new(ChainBehavior::Revert);
    let api = std::sync::Arc::new(MemoryApi::default());
    let mut flow = RegistrationFlow::new(api.clone(), long_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    // Someone else registers between the check and the submission.
    api.registered.lock().unwrap().insert((long_call(), hello()));
    assert!(matches!(
        flow.register(Some(&chain)).await.unwrap(),
        FlowState::Failed {
            reason: FailureReason::AlreadyRegistered,
            ..
        }
    ));
}

#[tokio::test]
async fn revert_without_record_is_rejected() {
    let chain = FakeChain::new(ChainBehavior::Revert);
    let mut flow = RegistrationFlow::new(MemoryApi::default(), long_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    assert!(matches!(
        flow.register(Some(&chain)).await.unwrap(),
        FlowState::Failed {
            reason: FailureReason::Rejected(_),
            ..
        }
    ));
}

#[tokio::test]
async fn chain_transport_failure_is_rejected() {
    let chain = FakeChain::new(ChainBehavior::Fail);
    let mut flow = RegistrationFlow::new(MemoryApi::default(), long_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    assert!(matches!(
        flow.register(Some(&chain)).await.unwrap(),
        FlowState::Failed { reason: FailureReason::Rejected(m), .. } if m.contains("connection reset")
    ));
}

#[tokio::test]
async fn chain_path_needs_bytes32_call_id() {
    let chain = FakeChain::new(ChainBehavior::Succeed);
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.check().await.unwrap();
    assert_eq!(
        flow.register(Some(&chain)).await.unwrap_err().code(),
        "FORMAT_NOT_BYTES32"
    );
    assert_eq!(flow.state().name(), "checked");
}

#[tokio::test]
async fn reset_returns_to_idle() {
    let mut flow = RegistrationFlow::new(MemoryApi::default(), short_call());
    flow.hash_bytes(b"hello").unwrap();
    flow.reset();
    assert_eq!(flow.state(), &FlowState::Idle);
    assert!(flow.state().digest().is_none());
}
