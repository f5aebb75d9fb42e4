// Path: crates/client/src/flow/mod.rs
//! The proposal registration flow.
//!
//! A proposal moves through `Idle → Hashed → Checked → Registering →
//! Registered | Failed`. Uploading a file (again) always lands in `Hashed`,
//! so registration can only follow a check of the current digest.
//!
//! Registration goes on-chain when a wallet signer is available and falls back
//! to the anonymous REST submission otherwise. In both cases the registry is
//! the authority on duplicates: the pre-check is advisory and a duplicate
//! detected at submission time ends in `Failed(AlreadyRegistered)`.

use crate::api::{ProposalChain, RegistryApi};
use cfp_crypto::{digest_bytes, digest_file};
use cfp_telemetry::client_metrics;
use cfp_types::app::{
    CallId, ContentDigest, ProposalData, RegisterOutcome, RegistrationTransport,
};
use cfp_types::error::{ErrorCode, FlowError, WalletError};
use std::path::Path;

/// The message shown when registration falls back to the REST path.
pub const ANONYMOUS_FALLBACK: &str =
    "No wallet is connected. The proposal will be registered anonymously.";

/// What the pre-check found.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// The pair is not registered yet.
    Absent,
    /// The pair is registered; the backend's record is attached.
    Registered(ProposalData),
}

/// Why a registration ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The registry already held the pair.
    AlreadyRegistered,
    /// The user declined the transaction in the wallet.
    Cancelled,
    /// Any other failure, with the raw error text.
    Rejected(String),
}

impl FailureReason {
    fn metric_label(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "duplicate",
            Self::Cancelled => "cancelled",
            Self::Rejected(_) => "failed",
        }
    }
}

/// Where the flow stands.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// No file hashed yet.
    Idle,
    /// A digest is known but was not checked.
    Hashed {
        /// The digest of the uploaded file.
        digest: ContentDigest,
    },
    /// The digest was checked against the registry.
    Checked {
        /// The checked digest.
        digest: ContentDigest,
        /// What the check found.
        presence: Presence,
    },
    /// A registration is in flight.
    Registering {
        /// The digest being registered.
        digest: ContentDigest,
        /// The path taken.
        transport: RegistrationTransport,
    },
    /// The registry recorded the pair.
    Registered {
        /// The registered digest.
        digest: ContentDigest,
        /// The path taken.
        transport: RegistrationTransport,
        /// The transaction hash when registered on-chain.
        tx_hash: Option<String>,
    },
    /// The registration did not go through.
    Failed {
        /// The digest that failed to register.
        digest: ContentDigest,
        /// The path taken.
        transport: RegistrationTransport,
        /// Why it failed.
        reason: FailureReason,
    },
}

impl FlowState {
    /// A short name for messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hashed { .. } => "hashed",
            Self::Checked { .. } => "checked",
            Self::Registering { .. } => "registering",
            Self::Registered { .. } => "registered",
            Self::Failed { .. } => "failed",
        }
    }

    /// The current digest, if a file was hashed.
    pub fn digest(&self) -> Option<&ContentDigest> {
        match self {
            Self::Idle => None,
            Self::Hashed { digest }
            | Self::Checked { digest, .. }
            | Self::Registering { digest, .. }
            | Self::Registered { digest, .. }
            | Self::Failed { digest, .. } => Some(digest),
        }
    }
}

/// A message for the user, produced as the flow advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Progress or success.
    Info(String),
    /// Something the user should know before trusting the result.
    Warning(String),
}

/// Drives one proposal for one call through hashing, checking and registration.
#[derive(Debug)]
pub struct RegistrationFlow<A> {
    api: A,
    call_id: CallId,
    state: FlowState,
    notices: Vec<Notice>,
}

impl<A: RegistryApi> RegistrationFlow<A> {
    /// A fresh flow for proposals under `call_id`.
    pub fn new(api: A, call_id: CallId) -> Self {
        Self {
            api,
            call_id,
            state: FlowState::Idle,
            notices: Vec::new(),
        }
    }

    /// The call this flow registers under.
    pub fn call_id(&self) -> &CallId {
        &self.call_id
    }

    /// The current state.
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Returns and clears the notices produced so far.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Back to `Idle`.
    pub fn reset(&mut self) {
        self.state = FlowState::Idle;
    }

    /// Hashes in-memory content and moves to `Hashed`.
    pub fn hash_bytes(&mut self, bytes: &[u8]) -> Result<ContentDigest, FlowError> {
        self.ensure_idle_for("upload")?;
        let digest = digest_bytes(bytes)?;
        self.set_hashed(digest);
        Ok(digest)
    }

    /// Hashes the file at `path` and moves to `Hashed`. `None` means no file
    /// was picked; the state is left untouched.
    pub async fn hash_file(&mut self, path: Option<&Path>) -> Result<ContentDigest, FlowError> {
        self.ensure_idle_for("upload")?;
        let digest = digest_file(path).await?;
        self.set_hashed(digest);
        Ok(digest)
    }

    /// Asks the registry whether the current digest is registered under the call.
    ///
    /// A backend failure leaves the state unchanged.
    pub async fn check(&mut self) -> Result<&Presence, FlowError> {
        let digest = match &self.state {
            FlowState::Idle => return Err(FlowError::NotHashed),
            FlowState::Registering { .. } => return Err(self.invalid("check")),
            other => *other.digest().ok_or(FlowError::NotHashed)?,
        };
        let presence = match self.api.proposal_data(&self.call_id, &digest).await {
            Ok(Some(data)) => Presence::Registered(data),
            Ok(None) => Presence::Absent,
            Err(e) => {
                client_metrics().inc_error(e.code());
                tracing::warn!(target: "flow", call_id = %self.call_id, %digest, error = %e, "check failed");
                return Err(e.into());
            }
        };
        match &presence {
            Presence::Registered(data) => {
                tracing::info!(target: "flow", call_id = %self.call_id, %digest, sender = %data.sender, "proposal already registered");
                self.notices
                    .push(Notice::Info("The proposal is already registered".into()));
            }
            Presence::Absent => {
                tracing::info!(target: "flow", call_id = %self.call_id, %digest, "proposal not registered yet");
                self.notices
                    .push(Notice::Info("The proposal is not registered yet".into()));
            }
        }
        self.state = FlowState::Checked { digest, presence };
        match &self.state {
            FlowState::Checked { presence, .. } => Ok(presence),
            _ => Err(self.invalid("check")),
        }
    }

    /// Registers the checked digest, on-chain through `chain` when given and
    /// through the REST backend otherwise.
    ///
    /// Only precondition violations are errors. Any outcome of the submission
    /// itself ends in `Registered` or `Failed`, which is returned.
    pub async fn register(
        &mut self,
        chain: Option<&dyn ProposalChain>,
    ) -> Result<&FlowState, FlowError> {
        let digest = match &self.state {
            FlowState::Idle => return Err(FlowError::NotHashed),
            FlowState::Hashed { .. } | FlowState::Failed { .. } => {
                return Err(FlowError::NotChecked)
            }
            FlowState::Checked {
                presence: Presence::Registered(_),
                ..
            }
            | FlowState::Registered { .. } => return Err(FlowError::AlreadyRegistered),
            FlowState::Registering { .. } => return Err(self.invalid("register")),
            FlowState::Checked {
                digest,
                presence: Presence::Absent,
            } => *digest,
        };

        let (transport, result) = match chain {
            Some(chain) => {
                let call_id = self.call_id.to_bytes32()?;
                self.state = FlowState::Registering {
                    digest,
                    transport: RegistrationTransport::Chain,
                };
                tracing::info!(target: "flow", call_id = %self.call_id, %digest, "registering on-chain");
                let result = self.submit_chain(chain, call_id, &digest).await;
                (RegistrationTransport::Chain, result)
            }
            None => {
                self.notices
                    .push(Notice::Warning(ANONYMOUS_FALLBACK.to_string()));
                tracing::warn!(target: "flow", call_id = %self.call_id, %digest, "no wallet; registering through the backend");
                self.state = FlowState::Registering {
                    digest,
                    transport: RegistrationTransport::Rest,
                };
                let result = self.submit_rest(&digest).await;
                (RegistrationTransport::Rest, result)
            }
        };

        let sink = client_metrics();
        self.state = match result {
            Ok(tx_hash) => {
                sink.inc_registrations(transport.as_str(), "created");
                tracing::info!(target: "flow", call_id = %self.call_id, %digest, transport = transport.as_str(), "proposal registered");
                self.notices
                    .push(Notice::Info("The proposal was registered successfully".into()));
                FlowState::Registered {
                    digest,
                    transport,
                    tx_hash,
                }
            }
            Err(reason) => {
                sink.inc_registrations(transport.as_str(), reason.metric_label());
                tracing::warn!(target: "flow", call_id = %self.call_id, %digest, transport = transport.as_str(), ?reason, "registration failed");
                FlowState::Failed {
                    digest,
                    transport,
                    reason,
                }
            }
        };
        Ok(&self.state)
    }

    async fn submit_chain(
        &self,
        chain: &dyn ProposalChain,
        call_id: [u8; 32],
        digest: &ContentDigest,
    ) -> Result<Option<String>, FailureReason> {
        match chain.register_proposal(call_id, digest).await {
            Ok(tx) => Ok(Some(tx)),
            Err(WalletError::UserRejected) => Err(FailureReason::Cancelled),
            Err(WalletError::Rpc(e)) if e.is_revert() => {
                // A revert after a clean check is most likely a concurrent duplicate.
                match self.api.proposal_data(&self.call_id, digest).await {
                    Ok(Some(_)) => Err(FailureReason::AlreadyRegistered),
                    _ => Err(FailureReason::Rejected(e.to_string())),
                }
            }
            Err(e) => Err(FailureReason::Rejected(e.to_string())),
        }
    }

    async fn submit_rest(&self, digest: &ContentDigest) -> Result<Option<String>, FailureReason> {
        match self.api.register_proposal(&self.call_id, digest).await {
            Ok(RegisterOutcome::Created) => Ok(None),
            Ok(RegisterOutcome::AlreadyRegistered) => Err(FailureReason::AlreadyRegistered),
            Err(e) => Err(FailureReason::Rejected(e.to_string())),
        }
    }

    fn set_hashed(&mut self, digest: ContentDigest) {
        tracing::debug!(target: "flow", call_id = %self.call_id, %digest, from = self.state.name(), "digest computed");
        self.state = FlowState::Hashed { digest };
    }

    fn ensure_idle_for(&self, action: &'static str) -> Result<(), FlowError> {
        match self.state {
            FlowState::Registering { .. } => Err(self.invalid(action)),
            _ => Ok(()),
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }
}

#[cfg(test)]
mod tests;
