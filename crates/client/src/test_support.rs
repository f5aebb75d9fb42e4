// Path: crates/client/src/test_support.rs
//! An in-process stand-in for an Ethereum node, served over JSON-RPC.

use alloy_primitives::{Address, B256};
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct NodeState {
    /// Returned by `eth_accounts`.
    pub accounts: Vec<Address>,
    /// Returned by `eth_requestAccounts`; `None` makes the user reject.
    pub approve: Option<Vec<Address>>,
    /// `eth_call` results keyed by 4-byte selector.
    pub call_results: HashMap<[u8; 4], Vec<u8>>,
    /// Transactions whose selector is listed here get a reverted receipt.
    pub revert_selectors: HashSet<[u8; 4]>,
    /// Makes `eth_sendTransaction` fail with the user-rejection code.
    pub reject_sends: bool,
    /// `(from, to, data)` of every submitted transaction.
    pub sent: Vec<(Address, Address, Vec<u8>)>,
    pub receipts: HashMap<B256, &'static str>,
}

pub struct MockNode {
    pub state: Arc<Mutex<NodeState>>,
    pub url: String,
}

impl MockNode {
    pub fn sent(&self) -> Vec<(Address, Address, Vec<u8>)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state.lock().unwrap().accounts = accounts;
    }
}

pub async fn spawn_node(state: NodeState) -> MockNode {
    let state = Arc::new(Mutex::new(state));
    let app = Router::new()
        .route("/", post(handle))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockNode {
        state,
        url: format!("http://{addr}/"),
    }
}

fn selector(data: &str) -> [u8; 4] {
    let bytes = hex::decode(data.trim_start_matches("0x")).unwrap();
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&bytes[..4]);
    sel
}

async fn handle(
    State(state): State<Arc<Mutex<NodeState>>>,
    Json(req): Json<Value>,
) -> Json<Value> {
    let id = req["id"].clone();
    let params = &req["params"];
    let mut node = state.lock().unwrap();
    let outcome: Result<Value, (i64, &str)> = match req["method"].as_str().unwrap() {
        "eth_accounts" => Ok(json!(node.accounts)),
        "eth_requestAccounts" => match &node.approve {
            Some(accounts) => Ok(json!(accounts)),
            None => Err((4001, "User rejected the request.")),
        },
        "eth_call" => {
            let sel = selector(params[0]["data"].as_str().unwrap());
            let out = node.call_results.get(&sel).cloned().unwrap_or_default();
            Ok(json!(format!("0x{}", hex::encode(out))))
        }
        "eth_sendTransaction" => {
            if node.reject_sends {
                Err((4001, "User denied transaction signature."))
            } else {
                let tx = &params[0];
                let data = tx["data"].as_str().unwrap();
                let from: Address = tx["from"].as_str().unwrap().parse().unwrap();
                let to: Address = tx["to"].as_str().unwrap().parse().unwrap();
                let sel = selector(data);
                node.sent.push((
                    from,
                    to,
                    hex::decode(data.trim_start_matches("0x")).unwrap(),
                ));
                let hash = B256::with_last_byte(node.sent.len() as u8);
                let status = if node.revert_selectors.contains(&sel) {
                    "0x0"
                } else {
                    "0x1"
                };
                node.receipts.insert(hash, status);
                Ok(json!(hash))
            }
        }
        "eth_getTransactionReceipt" => {
            let hash: B256 = params[0].as_str().unwrap().parse().unwrap();
            Ok(match node.receipts.get(&hash) {
                Some(status) => json!({
                    "transactionHash": hash,
                    "status": status,
                    "blockNumber": "0x1"
                }),
                None => Value::Null,
            })
        }
        _ => Err((-32601, "method not found")),
    };
    Json(match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => {
            json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
        }
    })
}

/// ABI encoding of a single `string` return value.
pub fn abi_string(s: &str) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[31] = 0x20;
    let mut len = [0u8; 32];
    len[24..].copy_from_slice(&(s.len() as u64).to_be_bytes());
    out.extend_from_slice(&len);
    let mut data = s.as_bytes().to_vec();
    data.resize(s.len().div_ceil(32).max(1) * 32, 0);
    if s.is_empty() {
        data.clear();
    }
    out.extend_from_slice(&data);
    out
}

/// ABI encoding of a single `address` return value.
pub fn abi_address(a: Address) -> Vec<u8> {
    let mut out = vec![0u8; 12];
    out.extend_from_slice(a.as_slice());
    out
}
