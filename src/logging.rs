//! Per-request log sinks.
//!
//! Per-request traces go to a [`LogSink`] the caller injects through the
//! request options; without one they are discarded.

use std::fmt;
use std::sync::Arc;

/// Destination for per-request debug traces.
pub trait LogSink: Send + Sync {
    /// Records a debug-level message.
    fn debug(&self, message: &str);
}

/// Sink that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn debug(&self, _message: &str) {}
}

/// Sink that forwards to the `log` facade under the crate's target.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn debug(&self, message: &str) {
        log::debug!(target: "proxyfetch", "{message}");
    }
}

/// Shared handle to a sink, as stored in request options.
#[derive(Clone)]
pub struct Logger(Arc<dyn LogSink>);

impl Logger {
    /// Wraps any sink.
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self(Arc::new(sink))
    }

    /// Wraps a sink that is already shared.
    pub fn from_shared(sink: Arc<dyn LogSink>) -> Self {
        Self(sink)
    }

    /// Logger that forwards to the `log` facade.
    pub fn facade() -> Self {
        Self::new(FacadeSink)
    }

    /// Records a debug-level message.
    pub fn debug(&self, message: &str) {
        self.0.debug(message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(NoopSink)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger")
    }
}
