// Path: crates/client/src/admin.rs
//! Creator authorization: status, requests and owner approval.

use crate::api::{AuthorizeOutcome, RegistryApi};
use crate::contracts::CfpFactory;
use crate::rpc::TxReceipt;
use cfp_types::app::{parse_address, same_address, CreatorStatus};
use cfp_types::error::{ApiError, RegistryError, WalletError};

/// Where `address` stands as a creator.
pub async fn creator_status<A: RegistryApi + ?Sized>(
    api: &A,
    address: &str,
) -> Result<CreatorStatus, ApiError> {
    let authorized = api.is_authorized(address).await?;
    let registered = if authorized {
        true
    } else {
        api.is_registered(address).await?
    };
    Ok(CreatorStatus::from_flags(authorized, registered))
}

/// Asks the factory to make the signing account a creator.
pub async fn request_authorization(factory: &CfpFactory) -> Result<TxReceipt, WalletError> {
    let receipt = factory.register().await?;
    tracing::info!(target: "admin", account = %factory.account(), "creator authorization requested");
    Ok(receipt)
}

/// Accounts waiting for authorization.
pub async fn pending_requests<A: RegistryApi + ?Sized>(api: &A) -> Result<Vec<String>, ApiError> {
    api.pending().await
}

/// Authorizes `creator`.
///
/// With a factory binding, the signing account must be the owner reported by
/// the backend and the authorization is sent on-chain. Without one, the
/// backend authorizes with its own account.
pub async fn authorize<A: RegistryApi + ?Sized>(
    api: &A,
    factory: Option<&CfpFactory>,
    creator: &str,
) -> Result<AuthorizeOutcome, RegistryError> {
    let Some(factory) = factory else {
        let outcome = api.authorize(creator).await?;
        tracing::info!(target: "admin", %creator, ?outcome, "authorized through backend");
        return Ok(outcome);
    };

    let creator_addr = parse_address(creator)?;
    let owner = api.contract_owner().await?;
    let account = factory.account();
    if !same_address(&owner, &account.to_string()) {
        return Err(WalletError::NotOwner {
            account: account.to_string(),
            owner,
        }
        .into());
    }
    if api.is_authorized(creator).await? {
        return Ok(AuthorizeOutcome::AlreadyAuthorized);
    }
    factory.authorize(creator_addr).await?;
    tracing::info!(target: "admin", %creator, "authorized on-chain");
    Ok(AuthorizeOutcome::Authorized)
}
