// Path: crates/cli/src/commands/wallet.rs

use anyhow::Result;
use cfp_cli::{view, WalletMode};
use cfp_client::ClientContext;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct WalletArgs {
    #[clap(subcommand)]
    pub command: WalletCommands,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Show the connected account.
    Status,
    /// Connect and print every account change until interrupted.
    Watch,
}

impl WalletArgs {
    pub fn wallet_mode(&self) -> WalletMode {
        match self.command {
            WalletCommands::Status => WalletMode::Silent,
            WalletCommands::Watch => WalletMode::Request,
        }
    }
}

pub async fn run(args: WalletArgs, ctx: &ClientContext) -> Result<()> {
    match args.command {
        WalletCommands::Status => println!("{}", view::session_line(&ctx.wallet().state())),
        WalletCommands::Watch => {
            let mut changes = ctx.wallet().subscribe();
            println!("{}", view::session_line(&changes.borrow_and_update()));
            loop {
                tokio::select! {
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        println!("{}", view::session_line(&changes.borrow_and_update()));
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }
    Ok(())
}
