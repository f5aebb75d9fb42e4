// Path: crates/cli/src/app.rs
//! Opening the client session a command runs in.

use anyhow::{Context, Result};
use cfp_client::ClientContext;
use cfp_types::config::ClientConfig;

/// How a command wants the wallet handled before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletMode {
    /// The command never signs; the wallet is not contacted.
    Skip,
    /// Pick up an already approved account, carrying on without one.
    Silent,
    /// Ask the wallet for an account; failing to get one is an error.
    Request,
}

/// Builds the client context and connects the wallet according to `mode`.
pub async fn open(config: ClientConfig, mode: WalletMode) -> Result<ClientContext> {
    let mut ctx = ClientContext::from_config(config).context("Failed to set up the client")?;
    match mode {
        WalletMode::Skip => {}
        WalletMode::Silent => match ctx.wallet_mut().reconnect_if_approved().await {
            Ok(Some(account)) => {
                tracing::info!(target: "wallet", %account, "using approved wallet account")
            }
            Ok(None) => tracing::debug!(target: "wallet", "no approved wallet account"),
            Err(e) => {
                tracing::warn!(target: "wallet", error = %e, "wallet unavailable; continuing without it")
            }
        },
        WalletMode::Request => {
            let account = ctx
                .wallet_mut()
                .connect()
                .await
                .context("Failed to connect the wallet")?;
            tracing::info!(target: "wallet", %account, "wallet connected");
        }
    }
    Ok(ctx)
}
