// Path: crates/types/src/app/call.rs

use super::strip_hex_prefix;
use crate::error::FormatError;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The identifier of a call, kept as lowercase hex digits without a prefix.
///
/// Calls created by this client always use 32-byte ids, but the backend accepts
/// and returns whatever it stored, so any non-empty even-length hex string parses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(String);

impl CallId {
    /// Builds a call id from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// The bare lowercase hex digits.
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// The wire form used by the REST API: `0x` followed by the hex digits.
    pub fn prefixed(&self) -> String {
        format!("0x{}", self.0)
    }

    /// Converts the id to the `bytes32` expected by the factory contract.
    pub fn to_bytes32(&self) -> Result<[u8; 32], FormatError> {
        let mut out = [0u8; 32];
        if self.0.len() != 64 {
            return Err(FormatError::NotBytes32(self.prefixed()));
        }
        hex::decode_to_slice(&self.0, &mut out)
            .map_err(|_| FormatError::NotBytes32(self.prefixed()))?;
        Ok(out)
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CallId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim());
        if digits.is_empty()
            || digits.len() % 2 != 0
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(FormatError::InvalidCallId(s.to_string()));
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }
}

impl Serialize for CallId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.prefixed())
    }
}

impl<'de> Deserialize<'de> for CallId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A call for proposals as listed by the registry backend.
///
/// Addresses are kept exactly as the backend returned them so that views can
/// show them unmodified when no name resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// The identifier under which proposals are registered.
    pub call_id: CallId,
    /// The address of the deployed CFP contract for this call.
    pub cfp: String,
    /// The address of the account that created the call.
    pub creator: String,
    /// The moment after which no more proposals are accepted.
    #[serde(with = "closing_time")]
    pub closing_time: DateTime<FixedOffset>,
}

impl Call {
    /// Whether the call was already closed at `now`.
    pub fn is_expired_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.closing_time < *now
    }

    /// Whether the call is closed right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Utc::now())
    }
}

/// The point lookup answer of `GET /calls/{callId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// The address of the account that created the call.
    pub creator: String,
    /// The address of the deployed CFP contract.
    pub cfp: String,
}

/// Serde helpers for closing times, which the backend emits either as
/// RFC 3339 strings or as unix seconds.
pub mod closing_time {
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Seconds(i64),
    }

    /// Serializes as an RFC 3339 string.
    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Accepts an RFC 3339 string or an integer number of unix seconds.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => DateTime::parse_from_rfc3339(&s).map_err(serde::de::Error::custom),
            Raw::Seconds(secs) => Utc
                .timestamp_opt(secs, 0)
                .single()
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| serde::de::Error::custom(format!("timestamp {secs} out of range"))),
        }
    }
}
