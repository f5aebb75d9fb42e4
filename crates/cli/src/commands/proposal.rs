// Path: crates/cli/src/commands/proposal.rs

use anyhow::{bail, Context, Result};
use cfp_cli::{view, WalletMode};
use cfp_client::flow::Presence;
use cfp_client::{ClientContext, FlowState, ProposalChain};
use cfp_types::app::CallId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ProposalArgs {
    #[clap(subcommand)]
    pub command: ProposalCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProposalCommands {
    /// Print the SHA-256 digest of a file.
    Hash {
        /// The proposal file.
        file: PathBuf,
    },
    /// Check whether a file is already registered for a call.
    Check {
        /// The call id.
        call_id: CallId,
        /// The proposal file.
        file: PathBuf,
    },
    /// Register a file's digest for a call.
    ///
    /// Signs a transaction with the wallet account when one is connected and
    /// falls back to an anonymous submission through the backend otherwise.
    Register {
        /// The call id.
        call_id: CallId,
        /// The proposal file.
        file: PathBuf,
        /// Submit through the backend even if a wallet is available.
        #[clap(long)]
        anonymous: bool,
    },
}

impl ProposalArgs {
    pub fn wallet_mode(&self) -> WalletMode {
        match self.command {
            ProposalCommands::Register {
                anonymous: false, ..
            } => WalletMode::Silent,
            _ => WalletMode::Skip,
        }
    }
}

pub async fn run(args: ProposalArgs, ctx: &ClientContext) -> Result<()> {
    match args.command {
        ProposalCommands::Hash { file } => {
            let digest = cfp_crypto::digest_file(Some(file.as_path())).await?;
            println!("{}", digest.prefixed());
        }
        ProposalCommands::Check { call_id, file } => {
            let mut flow = ctx.flow(call_id.clone());
            let digest = flow.hash_file(Some(file.as_path())).await?;
            let presence = flow
                .check()
                .await
                .context("Failed to check the proposal")?
                .clone();
            println!(
                "{}",
                view::presence_line(&call_id, &digest, &with_sender_name(ctx, presence).await)
            );
        }
        ProposalCommands::Register {
            call_id,
            file,
            anonymous,
        } => {
            let mut flow = ctx.flow(call_id.clone());
            let digest = flow.hash_file(Some(file.as_path())).await?;
            let presence = flow
                .check()
                .await
                .context("Failed to check the proposal")?
                .clone();
            if matches!(presence, Presence::Registered(_)) {
                println!(
                    "{}",
                    view::presence_line(&call_id, &digest, &with_sender_name(ctx, presence).await)
                );
            }

            let factory = if anonymous { None } else { ctx.factory()? };
            let chain = factory.as_ref().map(|f| f as &dyn ProposalChain);
            let state = flow
                .register(chain)
                .await
                .context("Cannot register the proposal")?
                .clone();
            for notice in flow.take_notices() {
                eprintln!("{}", view::notice_line(&notice));
            }
            let banner = view::flow_banner(&call_id, &state);
            if matches!(state, FlowState::Failed { .. }) {
                bail!("{banner}");
            }
            println!("{banner}");
        }
    }
    Ok(())
}

async fn with_sender_name(ctx: &ClientContext, presence: Presence) -> Presence {
    match presence {
        Presence::Registered(mut data) => {
            data.sender = ctx.names().display_name(&data.sender).await;
            Presence::Registered(data)
        }
        absent => absent,
    }
}
