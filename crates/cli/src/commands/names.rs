// Path: crates/cli/src/commands/names.rs

use anyhow::{Context, Result};
use cfp_cli::WalletMode;
use cfp_client::ClientContext;
use cfp_types::app::parse_address;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct NameArgs {
    #[clap(subcommand)]
    pub command: NameCommands,
}

#[derive(Subcommand, Debug)]
pub enum NameCommands {
    /// Show the reverse name recorded for an address.
    Resolve {
        /// The address.
        address: String,
    },
    /// Register `<label>.users.eth` for the wallet account.
    Register {
        /// The label, without the `.users.eth` suffix.
        label: String,
    },
}

impl NameArgs {
    pub fn wallet_mode(&self) -> WalletMode {
        match self.command {
            NameCommands::Resolve { .. } => WalletMode::Skip,
            NameCommands::Register { .. } => WalletMode::Silent,
        }
    }
}

pub async fn run(args: NameArgs, ctx: &ClientContext) -> Result<()> {
    match args.command {
        NameCommands::Resolve { address } => {
            let parsed = parse_address(&address)?;
            ctx.config().contracts.public_resolver()?;
            tracing::debug!(
                target: "names",
                reverse = %cfp_crypto::ens::reverse_name(parsed.as_slice()),
                "resolving"
            );
            match ctx.names().lookup(&parsed).await {
                Some(name) => println!("{name}"),
                None => println!("{address} has no name"),
            }
        }
        NameCommands::Register { label } => {
            let account = ctx.wallet().require_signer()?.account();
            let registrar = ctx.name_registrar()?;
            let name = registrar
                .register(&label)
                .await
                .with_context(|| format!("Failed to register {label:?}"))?;
            println!("Registered {name} for {account}.");
        }
    }
    Ok(())
}
