// Path: crates/client/src/wallet/mod.rs
//! The wallet session: which account, if any, is connected, and a way to
//! sign transactions with it.

use crate::rpc::{JsonRpcClient, TxReceipt};
use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use cfp_types::config::WalletConfig;
use cfp_types::error::WalletError;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// A snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Whether a wallet account is available.
    pub connected: bool,
    /// The active account.
    pub account: Option<Address>,
}

impl SessionState {
    fn from_accounts(accounts: &[Address]) -> Self {
        match accounts.first() {
            Some(a) => Self {
                connected: true,
                account: Some(*a),
            },
            None => Self::default(),
        }
    }
}

/// Tracks the connected wallet account and publishes changes.
///
/// Once connected, a background task polls `eth_accounts` and updates the
/// published state when the wallet switches or drops the account. The task
/// stops when the session is dropped.
#[derive(Debug)]
pub struct WalletSession {
    rpc: Arc<JsonRpcClient>,
    config: WalletConfig,
    state: Arc<watch::Sender<SessionState>>,
    watcher: Option<JoinHandle<()>>,
}

impl WalletSession {
    /// A disconnected session over `rpc`.
    pub fn new(rpc: Arc<JsonRpcClient>, config: WalletConfig) -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self {
            rpc,
            config,
            state: Arc::new(tx),
            watcher: None,
        }
    }

    /// Asks the wallet for access and connects the first account it returns.
    pub async fn connect(&mut self) -> Result<Address, WalletError> {
        let accounts = self.rpc.request_accounts().await?;
        let account = *accounts.first().ok_or(WalletError::NotConnected)?;
        self.publish(&accounts);
        self.spawn_watcher();
        tracing::info!(target: "wallet", %account, "wallet connected");
        Ok(account)
    }

    /// Connects silently if the wallet already approved an account.
    pub async fn reconnect_if_approved(&mut self) -> Result<Option<Address>, WalletError> {
        let accounts = self.rpc.accounts().await?;
        self.publish(&accounts);
        let account = accounts.first().copied();
        if let Some(a) = account {
            self.spawn_watcher();
            tracing::info!(target: "wallet", account = %a, "reconnected approved account");
        }
        Ok(account)
    }

    /// Forgets the account and stops watching.
    pub fn disconnect(&mut self) {
        if let Some(w) = self.watcher.take() {
            w.abort();
        }
        self.state.send_replace(SessionState::default());
    }

    /// The current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// A signer for the connected account, or `None` when disconnected.
    pub fn signer(&self) -> Option<Signer> {
        let state = self.state.borrow();
        match (state.connected, state.account) {
            (true, Some(account)) => Some(Signer {
                rpc: self.rpc.clone(),
                account,
                receipt_poll: Duration::from_millis(self.config.receipt_poll_ms),
                receipt_timeout: Duration::from_secs(self.config.receipt_timeout_secs),
            }),
            _ => None,
        }
    }

    /// Like [`Self::signer`] but fails with `NotConnected`.
    pub fn require_signer(&self) -> Result<Signer, WalletError> {
        self.signer().ok_or(WalletError::NotConnected)
    }

    fn publish(&self, accounts: &[Address]) {
        apply(&self.state, accounts);
    }

    fn spawn_watcher(&mut self) {
        if self.watcher.as_ref().is_some_and(|w| !w.is_finished()) {
            return;
        }
        let rpc = self.rpc.clone();
        let state = self.state.clone();
        let period = Duration::from_millis(self.config.account_poll_ms.max(1));
        self.watcher = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match rpc.accounts().await {
                    Ok(accounts) => apply(&state, &accounts),
                    Err(e) => {
                        tracing::debug!(target: "wallet", error = %e, "account poll failed")
                    }
                }
            }
        }));
    }
}

impl Drop for WalletSession {
    fn drop(&mut self) {
        if let Some(w) = self.watcher.take() {
            w.abort();
        }
    }
}

fn apply(state: &watch::Sender<SessionState>, accounts: &[Address]) {
    let next = SessionState::from_accounts(accounts);
    state.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        match next.account {
            Some(a) => tracing::info!(target: "wallet", account = %a, "active account changed"),
            None => tracing::info!(target: "wallet", "wallet disconnected"),
        }
        *current = next;
        true
    });
}

/// Signs and submits transactions from one account.
#[derive(Debug, Clone)]
pub struct Signer {
    rpc: Arc<JsonRpcClient>,
    account: Address,
    receipt_poll: Duration,
    receipt_timeout: Duration,
}

impl Signer {
    /// The signing account.
    pub fn account(&self) -> Address {
        self.account
    }

    /// The node the signer submits to.
    pub fn rpc(&self) -> &JsonRpcClient {
        &self.rpc
    }

    /// Sends `call` to `to` and waits for a successful receipt.
    pub async fn send<C: SolCall + Sync>(
        &self,
        to: Address,
        call: &C,
    ) -> Result<TxReceipt, WalletError> {
        let hash = self
            .rpc
            .send_transaction(self.account, to, call.abi_encode().into())
            .await?;
        tracing::debug!(target: "wallet", tx = %hash, %to, "transaction submitted");
        let receipt = self
            .rpc
            .wait_for_receipt(hash, self.receipt_poll, self.receipt_timeout)
            .await?;
        Ok(receipt)
    }
}
