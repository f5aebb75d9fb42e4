// Path: crates/telemetry/src/prometheus.rs
//! A Prometheus implementation of `ClientMetricsSink`.
//!
//! The client is short-lived, so nothing scrapes it. The collectors live in a
//! private `Registry` and `render` encodes them in the text exposition format
//! for `--metrics`.

use crate::sinks::ClientMetricsSink;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts,
    Registry, TextEncoder,
};

static SINK: OnceCell<PrometheusSink> = OnceCell::new();

/// Metric collectors for the registry client.
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    requests_total: IntCounterVec,
    retries_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    registrations_total: IntCounterVec,
    tx_confirmation_seconds: Histogram,
    errors_total: IntCounterVec,
}

impl PrometheusSink {
    /// Builds the collectors and registers them in a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("cfp_http_requests_total", "Completed backend requests."),
            &["endpoint", "status"],
        )?;
        let retries_total = IntCounterVec::new(
            Opts::new(
                "cfp_http_retries_total",
                "Backend requests retried after a transient failure.",
            ),
            &["endpoint"],
        )?;
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "cfp_http_request_duration_seconds",
                "Latency of backend requests.",
            )
            .buckets(exponential_buckets(0.005, 2.0, 12)?),
            &["endpoint"],
        )?;
        let registrations_total = IntCounterVec::new(
            Opts::new(
                "cfp_registrations_total",
                "Proposal registration attempts by transport and outcome.",
            ),
            &["transport", "outcome"],
        )?;
        let tx_confirmation_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "cfp_tx_confirmation_seconds",
                "Time from transaction submission to receipt.",
            )
            .buckets(exponential_buckets(0.5, 2.0, 10)?),
        )?;
        let errors_total = IntCounterVec::new(
            Opts::new("cfp_errors_total", "Errors by stable error code."),
            &["code"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(retries_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(tx_confirmation_seconds.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            retries_total,
            request_duration_seconds,
            registrations_total,
            tx_confirmation_seconds,
            errors_total,
        })
    }

    /// Renders every collector in the Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for PrometheusSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusSink").finish_non_exhaustive()
    }
}

impl ClientMetricsSink for PrometheusSink {
    fn inc_requests_total(&self, endpoint: &str, status_code: u16) {
        tracing::trace!(target: "metrics", endpoint, status_code, "request completed");
        self.requests_total
            .with_label_values(&[endpoint, &status_code.to_string()])
            .inc();
    }

    fn inc_retries_total(&self, endpoint: &str) {
        tracing::trace!(target: "metrics", endpoint, "request retried");
        self.retries_total.with_label_values(&[endpoint]).inc();
    }

    fn observe_request_duration(&self, endpoint: &str, duration_secs: f64) {
        self.request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }

    fn inc_registrations(&self, transport: &'static str, outcome: &'static str) {
        tracing::trace!(target: "metrics", transport, outcome, "registration attempt");
        self.registrations_total
            .with_label_values(&[transport, outcome])
            .inc();
    }

    fn observe_tx_confirmation(&self, duration_secs: f64) {
        self.tx_confirmation_seconds.observe(duration_secs);
    }

    fn inc_error(&self, code: &'static str) {
        tracing::trace!(target: "metrics", code, "error recorded");
        self.errors_total.with_label_values(&[code]).inc();
    }
}

/// Builds the Prometheus sink and makes it the global `ClientMetricsSink`.
/// Calling it again returns the sink installed the first time.
pub fn install() -> Result<&'static PrometheusSink, prometheus::Error> {
    let sink = SINK.get_or_try_init(PrometheusSink::new)?;
    crate::sinks::install(sink);
    Ok(sink)
}
