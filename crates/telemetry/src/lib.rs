// Path: crates/telemetry/src/lib.rs
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

//! # CFP Registry Telemetry
//!
//! This crate provides the observability infrastructure for the CFP registry
//! client: structured logging initialization and an abstract metrics sink that
//! decouples instrumentation in the client from the backend recording it.

/// The initialization routine for global structured logging.
pub mod init;
/// A Prometheus backend for the metrics sink, rendered on demand.
pub mod prometheus;
/// The abstract trait (`ClientMetricsSink`) that defines the contract for metrics reporting.
pub mod sinks;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

// Re-export the public helper functions for easy access to the global sink.
pub use sinks::client_metrics;
