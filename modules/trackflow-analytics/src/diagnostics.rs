//! DiagnosticSink implementations.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::error;

/// Emitted, followed by the offending value, for every event that fails the
/// standard action shape.
pub const UNTRACKED_EVENT_MESSAGE: &str =
    "The following event wasn't tracked because it isn't a standard action shape";

/// Where reports about untracked events go.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, message: &str, event: &Value);
}

// ---------------------------------------------------------------------------
// TracingSink (default)
// ---------------------------------------------------------------------------

/// Reports through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str, event: &Value) {
        error!(event = %event, "{message}");
    }
}

// ---------------------------------------------------------------------------
// StderrSink
// ---------------------------------------------------------------------------

/// Writes `<message> <event>` straight to stderr, bypassing any subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, message: &str, event: &Value) {
        eprintln!("{message} {event}");
    }
}

// ---------------------------------------------------------------------------
// MemorySink (tests: observe diagnostics without capturing stderr)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub message: String,
    pub event: Value,
    pub reported_at: DateTime<Utc>,
}

/// In-memory sink for testing. Thread-safe.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<Report>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read all reports (for test assertions).
    pub fn reports(&self) -> Vec<Report> {
        self.lock().clone()
    }

    /// Just the offending events, in report order.
    pub fn events(&self) -> Vec<Value> {
        self.lock().iter().map(|r| r.event.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, message: &str, event: &Value) {
        self.lock().push(Report {
            message: message.to_string(),
            event: event.clone(),
            reported_at: Utc::now(),
        });
    }
}

// ---------------------------------------------------------------------------
// Arc<D> blanket: lets tests share the sink for assertions
// ---------------------------------------------------------------------------

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for Arc<D> {
    fn report(&self, message: &str, event: &Value) {
        (**self).report(message, event)
    }
}
