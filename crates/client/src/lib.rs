// Path: crates/client/src/lib.rs
//! # CFP Registry Client Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
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

//! # CFP Registry Client
//!
//! Client-side logic for the CFP registry: the REST gateway, the JSON-RPC
//! wallet session and contract bindings, reverse name resolution, and the
//! proposal registration flow that ties them together.

pub mod admin;
pub mod api;
pub mod calls;
pub mod context;
pub mod contracts;
pub mod flow;
pub mod gateway;
pub mod names;
pub mod rpc;
pub mod wallet;

#[cfg(test)]
mod test_support;

// Re-export for convenience
pub use api::{AuthorizeOutcome, ProposalChain, RegistryApi};
pub use context::ClientContext;
pub use flow::{FlowState, RegistrationFlow};
pub use gateway::RegistryGateway;
pub use wallet::{Signer, WalletSession};
