// Path: crates/cli/src/view.rs
//! Terminal rendering: tables, result banners and one-line error reports.

use cfp_client::calls::{CallView, CreatedCall};
use cfp_client::flow::{FailureReason, FlowState, Notice, Presence};
use cfp_client::wallet::SessionState;
use cfp_types::app::{CallId, ContentDigest, CreatorStatus, RegistrationTransport};
use cfp_types::error::{
    ApiError, ConfigError, ErrorCode, FlowError, FormatError, HashError, RegistryError, RpcError,
    WalletError,
};
use chrono::{DateTime, FixedOffset, Utc};
use std::error::Error as StdError;
use std::fmt::Write as _;

/// Formats a closing time in UTC.
pub fn when(t: &DateTime<FixedOffset>) -> String {
    t.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string()
}

fn status(expired: bool) -> &'static str {
    if expired {
        "closed"
    } else {
        "open"
    }
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        let _ = write!(line, "{:<w$}  ", cell, w = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// The call listing.
pub fn calls_table(views: &[CallView]) -> String {
    if views.is_empty() {
        return "No calls.\n".to_string();
    }
    let rows: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            vec![
                v.call.call_id.prefixed(),
                v.cfp_name.clone(),
                v.creator_name.clone(),
                when(&v.call.closing_time),
                status(v.expired).to_string(),
            ]
        })
        .collect();
    table(&["CALL ID", "CFP", "CREATOR", "CLOSES", "STATUS"], &rows)
}

/// The calls of one creator.
pub fn created_table(calls: &[CreatedCall], now: DateTime<Utc>) -> String {
    if calls.is_empty() {
        return "No calls.\n".to_string();
    }
    let rows: Vec<Vec<String>> = calls
        .iter()
        .map(|c| {
            vec![
                c.call_id.prefixed(),
                c.record.cfp.clone(),
                c.closing_time.as_ref().map(when).unwrap_or_else(|| "-".into()),
                status(c.is_expired_at(now)).to_string(),
            ]
        })
        .collect();
    table(&["CALL ID", "CFP", "CLOSES", "STATUS"], &rows)
}

/// One item per line, or `No <what>.` for an empty list.
pub fn list(what: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("No {what}.\n");
    }
    items.iter().map(|i| format!("{i}\n")).collect()
}

/// The result of a registration pre-check.
pub fn presence_line(call_id: &CallId, digest: &ContentDigest, presence: &Presence) -> String {
    match presence {
        Presence::Absent => format!(
            "Proposal {} is not registered for call {}.",
            digest.prefixed(),
            call_id.prefixed()
        ),
        Presence::Registered(data) => format!(
            "Proposal {} was registered for call {} at {} by {} (block {}).",
            digest.prefixed(),
            call_id.prefixed(),
            data.timestamp,
            data.sender,
            data.block_number
        ),
    }
}

/// The banner printed once a flow settles.
pub fn flow_banner(call_id: &CallId, state: &FlowState) -> String {
    match state {
        FlowState::Registered {
            digest,
            transport: RegistrationTransport::Chain,
            tx_hash,
        } => format!(
            "Proposal {} registered for call {} in transaction {}.",
            digest.prefixed(),
            call_id.prefixed(),
            tx_hash.as_deref().unwrap_or("(unknown)")
        ),
        FlowState::Registered { digest, .. } => format!(
            "Proposal {} registered anonymously for call {}.",
            digest.prefixed(),
            call_id.prefixed()
        ),
        FlowState::Failed { digest, reason, .. } => match reason {
            FailureReason::AlreadyRegistered => format!(
                "Proposal {} is already registered for call {}.",
                digest.prefixed(),
                call_id.prefixed()
            ),
            FailureReason::Cancelled => format!(
                "Registration of {} was cancelled in the wallet.",
                digest.prefixed()
            ),
            FailureReason::Rejected(message) => {
                format!("Registration of {} failed: {message}", digest.prefixed())
            }
        },
        other => format!("Proposal is {}.", other.name()),
    }
}

/// A flow notice, prefixed by its severity.
pub fn notice_line(notice: &Notice) -> String {
    match notice {
        Notice::Info(message) => message.clone(),
        Notice::Warning(message) => format!("warning: {message}"),
    }
}

/// An account's creator status.
pub fn creator_line(address: &str, status: &CreatorStatus) -> String {
    format!("{address}: {status}")
}

/// The wallet session.
pub fn session_line(state: &SessionState) -> String {
    match state.account {
        Some(account) if state.connected => format!("Connected as {account}"),
        _ => "Not connected".to_string(),
    }
}

fn code_of(cause: &(dyn StdError + 'static)) -> Option<&'static str> {
    if let Some(e) = cause.downcast_ref::<RegistryError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<FlowError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<ApiError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<WalletError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<RpcError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<ConfigError>() {
        return Some(e.code());
    }
    if let Some(e) = cause.downcast_ref::<HashError>() {
        return Some(e.code());
    }
    cause.downcast_ref::<FormatError>().map(ErrorCode::code)
}

/// The stable code of the first typed error in the chain.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(code_of)
}

/// A single-line report of `err` and its causes.
pub fn error_banner(err: &anyhow::Error) -> String {
    let message = format!("{err:#}").replace('\n', " ");
    match error_code(err) {
        Some(code) => format!("error[{code}]: {message}"),
        None => format!("error: {message}"),
    }
}
