#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # CFP Registry Types
//!
//! This crate is the foundational library for the CFP registry client, containing
//! the data model exchanged with the registry backend and the contracts, the
//! client configuration, and every error type used across the workspace.
//!
//! ## Architectural Role
//!
//! As the base crate, `cfp-types` has minimal dependencies and is a dependency
//! of every other crate in the workspace. Shared types like `Call`, `CallId`,
//! `ContentDigest` and the error enums live here so that the hashing, telemetry,
//! client and CLI crates agree on a single definition.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::FlowError> = std::result::Result<T, E>;

/// Application-level data structures such as `Call`, `CallId` and `ContentDigest`.
pub mod app;
/// Client configuration loaded from TOML.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Commonly used types and the `OptionExt` extension trait.
pub mod prelude;
