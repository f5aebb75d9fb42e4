// Path: crates/client/tests/registration.rs
//! End-to-end registration against an in-process registry backend.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cfp_client::flow::{FailureReason, Notice, Presence, ANONYMOUS_FALLBACK};
use cfp_client::{FlowState, RegistrationFlow, RegistryGateway};
use cfp_types::app::{CallId, RegistrationTransport};
use cfp_types::config::HttpConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

const HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[derive(Default)]
struct Backend {
    // (callId, hash) -> blockNumber
    proposals: Mutex<HashMap<(String, String), u64>>,
}

type Shared = Arc<Backend>;

async fn proposal_data(
    State(backend): State<Shared>,
    Path((call_id, hash)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let proposals = backend.proposals.lock().unwrap();
    match proposals.get(&(call_id, hash)) {
        Some(block) => (
            StatusCode::OK,
            Json(json!({
                "timestamp": "2024-03-01T10:00:00Z",
                "sender": "0x00000000000000000000000000000000000000aa",
                "blockNumber": block
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Proposal not found" })),
        ),
    }
}

async fn register_proposal(
    State(backend): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = (
        body["callId"].as_str().unwrap().to_string(),
        body["proposal"].as_str().unwrap().to_string(),
    );
    let mut proposals = backend.proposals.lock().unwrap();
    if proposals.contains_key(&key) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Proposal already registered" })),
        );
    }
    let block = proposals.len() as u64 + 1;
    proposals.insert(key, block);
    (StatusCode::CREATED, Json(json!({ "message": "ok" })))
}

async fn spawn_backend() -> (Shared, RegistryGateway) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/proposal-data/:call_id/:hash", get(proposal_data))
        .route("/register-proposal", post(register_proposal))
        .with_state(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let http = HttpConfig {
        base_backoff_ms: 1,
        max_backoff_ms: 5,
        ..HttpConfig::default()
    };
    let gateway = RegistryGateway::new(&format!("http://{addr}/"), http).unwrap();
    (backend, gateway)
}

fn call() -> CallId {
    "abc123".parse().unwrap()
}

#[tokio::test]
async fn upload_check_register_then_detect_duplicate() {
    let (backend, gateway) = spawn_backend().await;
    let gateway = Arc::new(gateway);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"hello").unwrap();

    let mut flow = RegistrationFlow::new(gateway.clone(), call());
    let digest = flow.hash_file(Some(file.path())).await.unwrap();
    assert_eq!(digest.to_string(), HELLO);

    assert_eq!(flow.check().await.unwrap(), &Presence::Absent);
    let state = flow.register(None).await.unwrap().clone();
    assert_eq!(
        state,
        FlowState::Registered {
            digest,
            transport: RegistrationTransport::Rest,
            tx_hash: None
        }
    );
    assert!(flow
        .take_notices()
        .contains(&Notice::Warning(ANONYMOUS_FALLBACK.to_string())));
    assert_eq!(
        backend
            .proposals
            .lock()
            .unwrap()
            .get(&("0xabc123".to_string(), format!("0x{HELLO}"))),
        Some(&1)
    );

    // A second session sees the pair as registered and refuses to submit.
    let mut again = RegistrationFlow::new(gateway, call());
    again.hash_bytes(b"hello").unwrap();
    assert!(matches!(
        again.check().await.unwrap(),
        Presence::Registered(data) if data.block_number == 1
    ));
    assert!(again.register(None).await.is_err());
}

#[tokio::test]
async fn race_between_check_and_register_fails_as_duplicate() {
    let (_backend, gateway) = spawn_backend().await;
    let gateway = Arc::new(gateway);

    let mut slow = RegistrationFlow::new(gateway.clone(), call());
    let mut fast = RegistrationFlow::new(gateway, call());
    slow.hash_bytes(b"hello").unwrap();
    fast.hash_bytes(b"hello").unwrap();
    slow.check().await.unwrap();
    fast.check().await.unwrap();

    assert_eq!(fast.register(None).await.unwrap().name(), "registered");
    assert!(matches!(
        slow.register(None).await.unwrap(),
        FlowState::Failed {
            reason: FailureReason::AlreadyRegistered,
            transport: RegistrationTransport::Rest,
            ..
        }
    ));
}

#[tokio::test]
async fn different_call_is_independent() {
    let (_backend, gateway) = spawn_backend().await;
    let gateway = Arc::new(gateway);

    let mut first = RegistrationFlow::new(gateway.clone(), call());
    first.hash_bytes(b"hello").unwrap();
    first.check().await.unwrap();
    first.register(None).await.unwrap();

    let mut other = RegistrationFlow::new(gateway, "def456".parse().unwrap());
    other.hash_bytes(b"hello").unwrap();
    assert_eq!(other.check().await.unwrap(), &Presence::Absent);
}
