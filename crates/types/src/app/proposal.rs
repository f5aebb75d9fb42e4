// Path: crates/types/src/app/proposal.rs

use super::{strip_hex_prefix, CallId};
use crate::error::FormatError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The SHA-256 digest of a proposal file's exact byte content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The wire form used by the REST API: `0x` followed by 64 hex digits.
    pub fn prefixed(&self) -> String {
        format!("0x{}", self)
    }
}

impl From<[u8; 32]> for ContentDigest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ContentDigest {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(strip_hex_prefix(s.trim()), &mut out)
            .map_err(|_| FormatError::InvalidDigest(s.to_string()))?;
        Ok(Self(out))
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.prefixed())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The body of `POST /register-proposal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRegistration {
    /// The call the proposal is registered under.
    pub call_id: CallId,
    /// The content digest of the proposal file.
    pub proposal: ContentDigest,
}

/// What the backend knows about an already-registered proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalData {
    /// When the proposal was registered, as reported by the backend.
    pub timestamp: String,
    /// The account that registered the proposal.
    pub sender: String,
    /// The block that included the registration.
    #[serde(rename = "blockNumber")]
    pub block_number: u64,
}

/// The semantic outcome of submitting a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The pair was recorded.
    Created,
    /// The pair already existed; the backend or contract rejected the duplicate.
    AlreadyRegistered,
}

/// The path a registration takes to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationTransport {
    /// A transaction signed by the connected wallet account.
    Chain,
    /// An anonymous submission through the REST backend.
    Rest,
}

impl RegistrationTransport {
    /// A stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Rest => "rest",
        }
    }
}
