// Path: crates/types/src/app/creator.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an account stands in the creator authorization lifecycle.
///
/// An account moves `Unregistered → Pending` by calling `register()` on the
/// factory, and `Pending → Authorized` only when the factory owner authorizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatorStatus {
    /// The account never asked to become a creator.
    Unregistered,
    /// The account asked and is waiting for the owner.
    Pending,
    /// The account may create calls.
    Authorized,
}

impl CreatorStatus {
    /// Combines the backend's `authorized` and `registered` flags.
    pub fn from_flags(authorized: bool, registered: bool) -> Self {
        match (authorized, registered) {
            (true, _) => Self::Authorized,
            (false, true) => Self::Pending,
            (false, false) => Self::Unregistered,
        }
    }
}

impl fmt::Display for CreatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unregistered => "unregistered",
            Self::Pending => "pending approval",
            Self::Authorized => "authorized",
        };
        f.write_str(s)
    }
}
