// Path: crates/cli/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # CFP Registry CLI Library
//!
//! The pieces of the `cfp` binary that do not depend on argument parsing:
//! loading configuration, opening a client session with the right wallet
//! behaviour, and rendering results for the terminal.
//!
//! Like any other consumer, this crate only uses the public API of
//! `cfp-client` and `cfp-types`.

pub mod app;
pub mod settings;
pub mod view;

pub use app::{open, WalletMode};
