// Path: crates/types/src/prelude.rs

//! Types and traits most modules of the workspace reach for.

pub use crate::app::{Call, CallId, ContentDigest, CreatorStatus, RegisterOutcome};
pub use crate::error::ErrorCode;

/// Turns a missing value into a typed error.
pub trait OptionExt<T> {
    /// `Ok` with the value, or `Err(err)` when there is none.
    fn required<E>(self, err: E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, err: E) -> Result<T, E> {
        self.ok_or(err)
    }
}
