// Path: crates/cli/src/commands/creator.rs

use anyhow::{Context, Result};
use cfp_cli::{view, WalletMode};
use cfp_client::admin;
use cfp_client::ClientContext;
use cfp_types::app::CreatorStatus;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct CreatorArgs {
    #[clap(subcommand)]
    pub command: CreatorCommands,
}

#[derive(Subcommand, Debug)]
pub enum CreatorCommands {
    /// Show whether an account may create calls.
    Status {
        /// The account; defaults to the wallet account.
        address: Option<String>,
    },
    /// Ask the factory owner to authorize the wallet account as a creator.
    Request,
}

impl CreatorArgs {
    pub fn wallet_mode(&self) -> WalletMode {
        match self.command {
            CreatorCommands::Status { address: Some(_) } => WalletMode::Skip,
            _ => WalletMode::Silent,
        }
    }
}

pub async fn run(args: CreatorArgs, ctx: &ClientContext) -> Result<()> {
    let api = ctx.api().as_ref();
    match args.command {
        CreatorCommands::Status { address } => {
            let address = match address {
                Some(a) => a,
                None => ctx.wallet().require_signer()?.account().to_string(),
            };
            let status = admin::creator_status(api, &address)
                .await
                .context("Failed to look up creator status")?;
            println!("{}", view::creator_line(&address, &status));
        }
        CreatorCommands::Request => {
            let factory = ctx.require_factory()?;
            let account = factory.account().to_string();
            let status = admin::creator_status(api, &account)
                .await
                .context("Failed to look up creator status")?;
            if status != CreatorStatus::Unregistered {
                println!("{}", view::creator_line(&account, &status));
                return Ok(());
            }
            let receipt = admin::request_authorization(&factory)
                .await
                .context("Failed to request authorization")?;
            println!(
                "Authorization for {account} requested in transaction {}.",
                receipt.transaction_hash
            );
        }
    }
    Ok(())
}
