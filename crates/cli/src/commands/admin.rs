// Path: crates/cli/src/commands/admin.rs

use anyhow::{Context, Result};
use cfp_cli::{view, WalletMode};
use cfp_client::admin;
use cfp_client::{AuthorizeOutcome, ClientContext, RegistryApi};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[clap(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Show the factory contract and its owner as reported by the backend.
    Info,
    /// List accounts waiting for authorization.
    Pending,
    /// Authorize an account to create calls. Only the factory owner may do this.
    Authorize {
        /// The account to authorize.
        address: String,
    },
}

impl AdminArgs {
    pub fn wallet_mode(&self) -> WalletMode {
        match self.command {
            AdminCommands::Info | AdminCommands::Pending => WalletMode::Skip,
            AdminCommands::Authorize { .. } => WalletMode::Silent,
        }
    }
}

pub async fn run(args: AdminArgs, ctx: &ClientContext) -> Result<()> {
    let api = ctx.api().as_ref();
    match args.command {
        AdminCommands::Info => {
            let contract = api
                .contract_address()
                .await
                .context("Failed to look up the contract address")?;
            let owner = api
                .contract_owner()
                .await
                .context("Failed to look up the contract owner")?;
            println!("Contract: {contract}");
            println!("Owner:    {owner}");
        }
        AdminCommands::Pending => {
            let pending = admin::pending_requests(api)
                .await
                .context("Failed to list pending requests")?;
            let names = ctx.names();
            let mut shown = Vec::with_capacity(pending.len());
            for address in &pending {
                shown.push(names.display_name(address).await);
            }
            print!("{}", view::list("pending requests", &shown));
        }
        AdminCommands::Authorize { address } => {
            let factory = ctx.factory()?;
            if factory.is_none() {
                eprintln!("warning: no wallet is connected; the backend will authorize with its own account");
            }
            let outcome = admin::authorize(api, factory.as_ref(), &address)
                .await
                .with_context(|| format!("Failed to authorize {address}"))?;
            match outcome {
                AuthorizeOutcome::Authorized => println!("{address} is now authorized."),
                AuthorizeOutcome::AlreadyAuthorized => {
                    println!("{address} was already authorized.")
                }
            }
        }
    }
    Ok(())
}
