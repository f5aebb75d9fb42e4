// Path: crates/telemetry/src/sinks.rs
//! Defines an abstract trait for metrics reporting, decoupling client logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `ClientMetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn ClientMetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn client_metrics() -> &'static dyn ClientMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Installs the global sink. Returns `false` if one was already installed.
pub fn install(sink: &'static dyn ClientMetricsSink) -> bool {
    SINK.set(sink).is_ok()
}

// --- Trait Definition ---

/// A sink for everything the client measures: backend requests, registrations,
/// transaction confirmations and errors.
pub trait ClientMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for completed requests, labeled by endpoint and status code.
    fn inc_requests_total(&self, endpoint: &str, status_code: u16);
    /// Increments a counter for requests retried after a transient failure.
    fn inc_retries_total(&self, endpoint: &str);
    /// Observes the latency of a request, labeled by endpoint.
    fn observe_request_duration(&self, endpoint: &str, duration_secs: f64);
    /// Increments a counter for registration attempts, labeled by transport and outcome.
    fn inc_registrations(&self, transport: &'static str, outcome: &'static str);
    /// Observes how long a transaction took from submission to receipt.
    fn observe_tx_confirmation(&self, duration_secs: f64);
    /// Increments a counter for a specific error, categorized by its stable code.
    fn inc_error(&self, code: &'static str);
}

impl ClientMetricsSink for NopSink {
    fn inc_requests_total(&self, _endpoint: &str, _status_code: u16) {}
    fn inc_retries_total(&self, _endpoint: &str) {}
    fn observe_request_duration(&self, _endpoint: &str, _duration_secs: f64) {}
    fn inc_registrations(&self, _transport: &'static str, _outcome: &'static str) {}
    fn observe_tx_confirmation(&self, _duration_secs: f64) {}
    fn inc_error(&self, _code: &'static str) {}
}
