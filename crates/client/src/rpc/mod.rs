// Path: crates/client/src/rpc/mod.rs
//! A minimal Ethereum JSON-RPC client covering what the registry needs:
//! account discovery, read-only calls, transaction submission and receipts.

use alloy_primitives::{Address, Bytes, B256};
use cfp_telemetry::client_metrics;
use cfp_telemetry::time::{Measured, Timer};
use cfp_types::error::{ErrorCode, RpcError};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{sleep, Duration, Instant};

/// A JSON-RPC endpoint, typically a local node or a wallet bridge.
#[derive(Debug)]
pub struct JsonRpcClient {
    url: String,
    client: Client,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct Request<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<NodeError>,
}

#[derive(Deserialize)]
struct NodeError {
    code: i64,
    message: String,
}

/// The fields of a transaction receipt the client looks at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// The transaction hash.
    pub transaction_hash: B256,
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<String>,
    /// The block that included the transaction, as a hex quantity.
    #[serde(default)]
    pub block_number: Option<String>,
}

impl TxReceipt {
    /// Whether the receipt reports a reverted execution.
    pub fn reverted(&self) -> bool {
        matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}

#[derive(Serialize)]
struct TxRequest {
    from: Address,
    to: Address,
    data: Bytes,
}

#[derive(Serialize)]
struct CallRequest {
    to: Address,
    data: Bytes,
}

impl JsonRpcClient {
    /// Creates a client for the endpoint at `url`.
    pub fn new(url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one request and decodes its `result`.
    pub async fn request<P: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = Request {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| record(RpcError::Transport(format!("{method}: {e}"))))?;
        let resp: Response = resp
            .json()
            .await
            .map_err(|e| record(RpcError::Decode(format!("{method}: {e}"))))?;
        if let Some(err) = resp.error {
            tracing::debug!(target: "rpc", method, code = err.code, message = %err.message, "node error");
            return Err(record(RpcError::Node {
                code: err.code,
                message: err.message,
            }));
        }
        let result = resp.result.unwrap_or(Value::Null);
        serde_json::from_value(result)
            .map_err(|e| record(RpcError::Decode(format!("{method}: {e}"))))
    }

    /// `eth_accounts`: accounts already approved for this client, without prompting.
    pub async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        self.request("eth_accounts", json!([])).await
    }

    /// `eth_requestAccounts`: asks the wallet to approve access.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, RpcError> {
        self.request("eth_requestAccounts", json!([])).await
    }

    /// `eth_call` against the latest block.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        self.request("eth_call", (CallRequest { to, data }, "latest"))
            .await
    }

    /// `eth_sendTransaction` from an unlocked account. Returns the transaction hash.
    pub async fn send_transaction(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
    ) -> Result<B256, RpcError> {
        self.request("eth_sendTransaction", [TxRequest { from, to, data }])
            .await
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    pub async fn transaction_receipt(&self, hash: B256) -> Result<Option<TxReceipt>, RpcError> {
        self.request("eth_getTransactionReceipt", [hash]).await
    }

    /// Polls for the receipt of `hash` until it appears or `timeout` elapses.
    /// A reverted receipt is an error.
    pub async fn wait_for_receipt(
        &self,
        hash: B256,
        poll: Duration,
        timeout: Duration,
    ) -> Result<TxReceipt, RpcError> {
        let _timer = Timer::new(client_metrics(), Measured::TxConfirmation);
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                if receipt.reverted() {
                    return Err(record(RpcError::Reverted {
                        tx_hash: hash.to_string(),
                    }));
                }
                tracing::debug!(
                    target: "rpc",
                    tx = %hash,
                    block = receipt.block_number.as_deref().unwrap_or("?"),
                    "transaction confirmed"
                );
                return Ok(receipt);
            }
            if started.elapsed() >= timeout {
                return Err(record(RpcError::ReceiptTimeout {
                    tx_hash: hash.to_string(),
                    waited_secs: timeout.as_secs(),
                }));
            }
            sleep(poll).await;
        }
    }
}

fn record(e: RpcError) -> RpcError {
    client_metrics().inc_error(e.code());
    e
}
