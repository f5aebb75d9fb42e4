// Path: crates/telemetry/src/time.rs
use crate::sinks::ClientMetricsSink;
use std::time::Instant;

/// What a [`Timer`] reports when it is dropped.
#[derive(Debug, Clone, Copy)]
pub enum Measured<'e> {
    /// The latency of a request to the named endpoint.
    Request(&'e str),
    /// The time from transaction submission to receipt.
    TxConfirmation,
}

pub struct Timer<'a> {
    sink: &'a dyn ClientMetricsSink,
    what: Measured<'a>,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn ClientMetricsSink, what: Measured<'a>) -> Self {
        Self {
            sink,
            what,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        let secs = self.start.elapsed().as_secs_f64();
        match self.what {
            Measured::Request(endpoint) => self.sink.observe_request_duration(endpoint, secs),
            Measured::TxConfirmation => self.sink.observe_tx_confirmation(secs),
        }
    }
}
