//! Analytics tracking middleware for `trackflow-store`.
//!
//! Every dispatched action is forwarded down the chain first, so reducers run
//! before anything is tracked. Afterwards a `Selector` pulls zero or more
//! analytics events out of the action (by default `meta.analytics`), each
//! event is checked against the standard action shape, and conformant events
//! are handed to the `Tracker` together with the post-dispatch state.
//! Malformed events are reported to a `DiagnosticSink` and dropped.

pub mod action;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod middleware;
pub mod selection;
pub mod shape;
pub mod spawn;
pub mod tracker;

pub use action::{is_truthy, Action, ActionLike};
pub use config::{DiagnosticChannel, TrackingConfig};
pub use diagnostics::{
    DiagnosticSink, MemorySink, Report, StderrSink, TracingSink, UNTRACKED_EVENT_MESSAGE,
};
pub use error::ShapeError;
pub use middleware::TrackingMiddleware;
pub use selection::{MetaKeySelector, Selection, Selector};
pub use shape::{is_error_action, is_standard_action, validate};
pub use spawn::{AsyncTracker, SpawnTracker};
pub use tracker::Tracker;
