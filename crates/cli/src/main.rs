// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # CFP Registry CLI
//!
//! Browse calls for proposals, register proposal digests and manage creators
//! from the terminal.

use anyhow::Result;
use cfp_cli::{settings, view, WalletMode};
use cfp_telemetry::init::init_tracing;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

// Import command modules
mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "cfp",
    version,
    about = "Client for the CFP registry.",
    long_about = "Browse calls for proposals, register proposal file digests against a call, and manage call creators. Signing goes through a wallet JSON-RPC endpoint; without one, proposals are registered anonymously through the registry backend."
)]
struct Cli {
    /// TOML configuration file. CFP_API_URL and CFP_RPC_URL override its URLs.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Ask the wallet for an account instead of only using one it already approved.
    #[clap(long, global = true)]
    connect: bool,

    /// Print client metrics to stderr before exiting.
    #[clap(long, global = true)]
    metrics: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse and create calls.
    Calls(calls::CallsArgs),

    /// List authorized creators.
    Creators,

    /// Hash, check and register proposals.
    Proposal(proposal::ProposalArgs),

    /// Creator status and authorization requests.
    Creator(creator::CreatorArgs),

    /// Owner tools: pending requests and authorization.
    Admin(admin::AdminArgs),

    /// Reverse names under users.eth.
    Name(names::NameArgs),

    /// The wallet session.
    Wallet(wallet::WalletArgs),
}

impl Commands {
    fn wallet_mode(&self) -> WalletMode {
        match self {
            Commands::Calls(args) => args.wallet_mode(),
            Commands::Creators => WalletMode::Skip,
            Commands::Proposal(args) => args.wallet_mode(),
            Commands::Creator(args) => args.wallet_mode(),
            Commands::Admin(args) => args.wallet_mode(),
            Commands::Name(args) => args.wallet_mode(),
            Commands::Wallet(args) => args.wallet_mode(),
        }
    }

    fn precheck(&self) -> Result<()> {
        match self {
            Commands::Calls(args) => args.precheck(Utc::now()),
            _ => Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", view::error_banner(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = settings::load(cli.config.as_deref())?;
    init_tracing(config.logging.format, "info")?;

    let sink = cfp_telemetry::prometheus::install()?;

    cli.command.precheck()?;
    let mode = match cli.command.wallet_mode() {
        WalletMode::Silent if cli.connect => WalletMode::Request,
        mode => mode,
    };
    let ctx = cfp_cli::open(config, mode).await?;

    let result = match cli.command {
        Commands::Calls(args) => calls::run(args, &ctx).await,
        Commands::Creators => creators::run(&ctx).await,
        Commands::Proposal(args) => proposal::run(args, &ctx).await,
        Commands::Creator(args) => creator::run(args, &ctx).await,
        Commands::Admin(args) => admin::run(args, &ctx).await,
        Commands::Name(args) => names::run(args, &ctx).await,
        Commands::Wallet(args) => wallet::run(args, &ctx).await,
    };

    if cli.metrics {
        eprint!("{}", sink.render()?);
    }
    result
}
