// Path: crates/client/src/calls.rs
//! Browsing and creating calls.

use crate::api::RegistryApi;
use crate::contracts::CfpFactory;
use crate::names::{NameResolver, ReverseLookup};
use crate::rpc::TxReceipt;
use cfp_types::app::{Call, CallId, CallRecord};
use cfp_types::error::{ApiError, RegistryError};
use chrono::{DateTime, FixedOffset, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A call prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CallView {
    /// The call as listed by the backend.
    pub call: Call,
    /// The contract's reverse name, or its address.
    pub cfp_name: String,
    /// The creator's reverse name, or its address.
    pub creator_name: String,
    /// Whether the call was closed when the view was built.
    pub expired: bool,
}

/// A call created by one creator, joined from `createdBy` and point lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCall {
    /// The call id.
    pub call_id: CallId,
    /// Creator and contract.
    pub record: CallRecord,
    /// The closing time, when the call also appears in the full listing.
    pub closing_time: Option<DateTime<FixedOffset>>,
}

impl CreatedCall {
    /// Whether the call was closed at `now`. Unknown closing times count as open.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.closing_time.is_some_and(|t| t < now)
    }
}

/// The column a listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// The call id.
    Id,
    /// The displayed contract name.
    Cfp,
    /// The displayed creator name.
    Creator,
    /// The closing time.
    ClosingTime,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Generates a fresh random 32-byte call id.
pub fn new_call_id() -> CallId {
    CallId::from_bytes(&rand::random::<[u8; 32]>())
}

/// Creates a call closing at `closing_time` under a fresh id.
pub async fn create_call(
    factory: &CfpFactory,
    closing_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(CallId, TxReceipt), RegistryError> {
    if closing_time <= now {
        return Err(RegistryError::ClosingTimeInPast(closing_time.to_rfc3339()));
    }
    let seconds = u64::try_from(closing_time.timestamp())
        .map_err(|_| RegistryError::ClosingTimeInPast(closing_time.to_rfc3339()))?;
    let call_id = new_call_id();
    let receipt = factory.create(call_id.to_bytes32()?, seconds).await?;
    tracing::info!(
        target: "calls",
        call_id = %call_id,
        creator = %factory.account(),
        closes = %closing_time.to_rfc3339(),
        "call created"
    );
    Ok((call_id, receipt))
}

/// Lists every call with resolved names.
pub async fn list_calls<A, L>(
    api: &A,
    names: &NameResolver<L>,
    now: DateTime<Utc>,
) -> Result<Vec<CallView>, ApiError>
where
    A: RegistryApi + ?Sized,
    L: ReverseLookup,
{
    let calls = api.calls().await?;
    let mut views = Vec::with_capacity(calls.len());
    for call in calls {
        let cfp_name = names.display_name(&call.cfp).await;
        let creator_name = names.display_name(&call.creator).await;
        let expired = call.is_expired_at(&now);
        views.push(CallView {
            call,
            cfp_name,
            creator_name,
            expired,
        });
    }
    Ok(views)
}

/// Hides expired calls unless asked not to, then sorts.
pub fn arrange(
    mut views: Vec<CallView>,
    show_expired: bool,
    sort: Option<(SortKey, SortOrder)>,
) -> Vec<CallView> {
    if !show_expired {
        views.retain(|v| !v.expired);
    }
    if let Some((key, order)) = sort {
        views.sort_by(|a, b| {
            let ord = compare(a, b, key);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }
    views
}

fn compare(a: &CallView, b: &CallView, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.call.call_id.cmp(&b.call.call_id),
        SortKey::Cfp => a.cfp_name.cmp(&b.cfp_name),
        SortKey::Creator => a.creator_name.cmp(&b.creator_name),
        SortKey::ClosingTime => a.call.closing_time.cmp(&b.call.closing_time),
    }
}

/// The calls created by `creator`.
///
/// Ids whose point lookup fails are skipped; only a failure of the id listing
/// itself is an error.
pub async fn calls_created_by<A: RegistryApi + ?Sized>(
    api: &A,
    creator: &str,
) -> Result<Vec<CreatedCall>, ApiError> {
    let ids = api.created_by(creator).await?;
    let closing: HashMap<CallId, DateTime<FixedOffset>> = match api.calls().await {
        Ok(all) => all
            .into_iter()
            .map(|c| (c.call_id, c.closing_time))
            .collect(),
        Err(e) => {
            tracing::debug!(target: "calls", error = %e, "full listing unavailable; closing times unknown");
            HashMap::new()
        }
    };
    let mut out = Vec::with_capacity(ids.len());
    for call_id in ids {
        match api.call(&call_id).await {
            Ok(Some(record)) => {
                let closing_time = closing.get(&call_id).copied();
                out.push(CreatedCall {
                    call_id,
                    record,
                    closing_time,
                });
            }
            Ok(None) => {
                tracing::debug!(target: "calls", %call_id, "listed call not found; skipping")
            }
            Err(e) => {
                tracing::warn!(target: "calls", %call_id, error = %e, "call lookup failed; skipping")
            }
        }
    }
    Ok(out)
}
