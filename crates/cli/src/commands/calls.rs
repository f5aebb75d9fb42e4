// Path: crates/cli/src/commands/calls.rs

use anyhow::{anyhow, Context, Result};
use cfp_cli::{view, WalletMode};
use cfp_client::calls::{self, SortKey, SortOrder};
use cfp_client::{ClientContext, RegistryApi};
use cfp_types::app::CallId;
use cfp_types::error::RegistryError;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
pub struct CallsArgs {
    #[clap(subcommand)]
    pub command: CallsCommands,
}

#[derive(Subcommand, Debug)]
pub enum CallsCommands {
    /// List calls with contract and creator names resolved.
    List {
        /// Include calls whose closing time has passed.
        #[clap(long)]
        show_expired: bool,
        /// Sort by this column.
        #[clap(long, value_enum)]
        sort: Option<SortColumn>,
        /// Sort largest first.
        #[clap(long, requires = "sort")]
        desc: bool,
    },
    /// Show one call.
    Show {
        /// The call id, hex with or without `0x`.
        call_id: CallId,
    },
    /// List the calls created by an account.
    CreatedBy {
        /// The creator's address.
        creator: String,
    },
    /// Create a call under a fresh random id. Needs an authorized wallet account.
    Create {
        /// When the call closes, as RFC 3339 (e.g. 2030-01-01T00:00:00Z).
        #[clap(long, value_parser = parse_closing_time)]
        closes: DateTime<FixedOffset>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Cfp,
    Creator,
    ClosingTime,
}

impl From<SortColumn> for SortKey {
    fn from(c: SortColumn) -> Self {
        match c {
            SortColumn::Id => SortKey::Id,
            SortColumn::Cfp => SortKey::Cfp,
            SortColumn::Creator => SortKey::Creator,
            SortColumn::ClosingTime => SortKey::ClosingTime,
        }
    }
}

fn parse_closing_time(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected an RFC 3339 time: {e}"))
}

impl CallsArgs {
    pub fn wallet_mode(&self) -> WalletMode {
        match self.command {
            CallsCommands::Create { .. } => WalletMode::Silent,
            _ => WalletMode::Skip,
        }
    }

    /// Checks that need no network, run before the session is opened.
    pub fn precheck(&self, now: DateTime<Utc>) -> Result<()> {
        if let CallsCommands::Create { closes } = &self.command {
            if *closes <= now {
                return Err(RegistryError::ClosingTimeInPast(closes.to_rfc3339()).into());
            }
        }
        Ok(())
    }
}

pub async fn run(args: CallsArgs, ctx: &ClientContext) -> Result<()> {
    let api = ctx.api().as_ref();
    match args.command {
        CallsCommands::List {
            show_expired,
            sort,
            desc,
        } => {
            let names = ctx.names();
            let views = calls::list_calls(api, &names, Utc::now())
                .await
                .context("Failed to list calls")?;
            let order = if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            let views = calls::arrange(views, show_expired, sort.map(|s| (s.into(), order)));
            print!("{}", view::calls_table(&views));
        }
        CallsCommands::Show { call_id } => {
            let record = api
                .call(&call_id)
                .await
                .context("Failed to look up the call")?
                .ok_or_else(|| anyhow!("Call {} not found", call_id.prefixed()))?;
            let closes = api
                .closing_time(&call_id)
                .await
                .context("Failed to look up the closing time")?;
            let names = ctx.names();
            println!("Call:     {}", call_id.prefixed());
            println!("CFP:      {}", names.display_name(&record.cfp).await);
            println!("Creator:  {}", names.display_name(&record.creator).await);
            match closes {
                Some(t) => {
                    let status = if t < Utc::now() { "closed" } else { "open" };
                    println!("Closes:   {} ({status})", view::when(&t));
                }
                None => println!("Closes:   unknown"),
            }
        }
        CallsCommands::CreatedBy { creator } => {
            let created = calls::calls_created_by(api, &creator)
                .await
                .with_context(|| format!("Failed to list calls created by {creator}"))?;
            print!("{}", view::created_table(&created, Utc::now()));
        }
        CallsCommands::Create { closes } => {
            let factory = ctx.require_factory()?;
            let (call_id, receipt) =
                calls::create_call(&factory, closes.with_timezone(&Utc), Utc::now())
                    .await
                    .context("Failed to create the call")?;
            println!(
                "Created call {} closing {} in transaction {}.",
                call_id.prefixed(),
                view::when(&closes),
                receipt.transaction_hash
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn past_closing_time_is_rejected_before_any_request() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let args = CallsArgs {
            command: CallsCommands::Create {
                closes: parse_closing_time("2029-12-31T23:59:59Z").unwrap(),
            },
        };
        let err = args.precheck(now).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RegistryError>(),
            Some(RegistryError::ClosingTimeInPast(_))
        ));

        let args = CallsArgs {
            command: CallsCommands::Create {
                closes: parse_closing_time("2030-01-01T01:00:00+00:00").unwrap(),
            },
        };
        assert!(args.precheck(now).is_ok());
        assert_eq!(args.wallet_mode(), WalletMode::Silent);
    }

    #[test]
    fn closing_time_must_be_rfc3339() {
        assert!(parse_closing_time("tomorrow").is_err());
        assert!(parse_closing_time("2030-01-01").is_err());
    }
}
