// Path: crates/client/src/api.rs
//! The seams between the registration logic and the systems it talks to.

use async_trait::async_trait;
use cfp_types::app::{Call, CallId, CallRecord, ContentDigest, ProposalData, RegisterOutcome};
use cfp_types::error::{ApiError, WalletError};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

/// Result of asking the backend to authorize a creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// The account is now authorized.
    Authorized,
    /// The account was authorized before.
    AlreadyAuthorized,
}

/// Read and write access to the registry REST backend.
///
/// Point lookups return `None` on 404. Duplicate submissions are reported
/// through the outcome types rather than as errors.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Every call known to the backend.
    async fn calls(&self) -> Result<Vec<Call>, ApiError>;

    /// The creator and contract of one call.
    async fn call(&self, call_id: &CallId) -> Result<Option<CallRecord>, ApiError>;

    /// The closing time of one call.
    async fn closing_time(
        &self,
        call_id: &CallId,
    ) -> Result<Option<DateTime<FixedOffset>>, ApiError>;

    /// The addresses of all authorized creators.
    async fn creators(&self) -> Result<Vec<String>, ApiError>;

    /// The ids of the calls created by `creator`.
    async fn created_by(&self, creator: &str) -> Result<Vec<CallId>, ApiError>;

    /// Accounts that asked to become creators and await authorization.
    async fn pending(&self) -> Result<Vec<String>, ApiError>;

    /// Whether `address` may create calls.
    async fn is_authorized(&self, address: &str) -> Result<bool, ApiError>;

    /// Whether `address` asked to become a creator.
    async fn is_registered(&self, address: &str) -> Result<bool, ApiError>;

    /// Registration data of the pair, or `None` when it was never registered.
    async fn proposal_data(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<Option<ProposalData>, ApiError>;

    /// Registers the pair anonymously.
    async fn register_proposal(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<RegisterOutcome, ApiError>;

    /// The owner of the factory contract.
    async fn contract_owner(&self) -> Result<String, ApiError>;

    /// The address of the factory contract.
    async fn contract_address(&self) -> Result<String, ApiError>;

    /// Authorizes `address` as a creator through the backend's own account.
    async fn authorize(&self, address: &str) -> Result<AuthorizeOutcome, ApiError>;
}

#[async_trait]
impl<T: RegistryApi + ?Sized> RegistryApi for Arc<T> {
    async fn calls(&self) -> Result<Vec<Call>, ApiError> {
        (**self).calls().await
    }

    async fn call(&self, call_id: &CallId) -> Result<Option<CallRecord>, ApiError> {
        (**self).call(call_id).await
    }

    async fn closing_time(
        &self,
        call_id: &CallId,
    ) -> Result<Option<DateTime<FixedOffset>>, ApiError> {
        (**self).closing_time(call_id).await
    }

    async fn creators(&self) -> Result<Vec<String>, ApiError> {
        (**self).creators().await
    }

    async fn created_by(&self, creator: &str) -> Result<Vec<CallId>, ApiError> {
        (**self).created_by(creator).await
    }

    async fn pending(&self) -> Result<Vec<String>, ApiError> {
        (**self).pending().await
    }

    async fn is_authorized(&self, address: &str) -> Result<bool, ApiError> {
        (**self).is_authorized(address).await
    }

    async fn is_registered(&self, address: &str) -> Result<bool, ApiError> {
        (**self).is_registered(address).await
    }

    async fn proposal_data(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<Option<ProposalData>, ApiError> {
        (**self).proposal_data(call_id, digest).await
    }

    async fn register_proposal(
        &self,
        call_id: &CallId,
        digest: &ContentDigest,
    ) -> Result<RegisterOutcome, ApiError> {
        (**self).register_proposal(call_id, digest).await
    }

    async fn contract_owner(&self) -> Result<String, ApiError> {
        (**self).contract_owner().await
    }

    async fn contract_address(&self) -> Result<String, ApiError> {
        (**self).contract_address().await
    }

    async fn authorize(&self, address: &str) -> Result<AuthorizeOutcome, ApiError> {
        (**self).authorize(address).await
    }
}

/// A signed, on-chain path for registering proposals.
#[async_trait]
pub trait ProposalChain: Send + Sync {
    /// Submits `registerProposal(callId, digest)` and waits for the receipt.
    /// Returns the transaction hash.
    async fn register_proposal(
        &self,
        call_id: [u8; 32],
        digest: &ContentDigest,
    ) -> Result<String, WalletError>;
}
