//! Async trackers behind the synchronous `Tracker` contract.
//!
//! Dispatch never waits for an async tracker: each event is handed to a
//! spawned task and `track` returns immediately. Failures can no longer reach
//! the dispatch caller, so they are logged instead.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::error;

use crate::tracker::Tracker;

/// A tracker that does I/O (HTTP beacons, queues, ...).
#[async_trait]
pub trait AsyncTracker<S: Send + 'static>: Send + Sync + 'static {
    async fn track(&self, event: Value, state: S) -> Result<()>;
}

/// Runs an `AsyncTracker` as a fire-and-forget task on a tokio runtime.
pub struct SpawnTracker<T> {
    inner: Arc<T>,
    handle: Handle,
}

impl<T> SpawnTracker<T> {
    pub fn new(inner: T, handle: Handle) -> Self {
        Self {
            inner: Arc::new(inner),
            handle,
        }
    }

    /// Spawn onto the runtime the caller is currently running in.
    pub fn current(inner: T) -> Result<Self> {
        Ok(Self::new(inner, Handle::try_current()?))
    }
}

impl<S, T> Tracker<S> for SpawnTracker<T>
where
    S: Clone + Send + 'static,
    T: AsyncTracker<S>,
{
    fn track(&self, event: &Value, state: &S) -> Result<()> {
        let inner = self.inner.clone();
        let event = event.clone();
        let state = state.clone();
        self.handle.spawn(async move {
            let event_type = event
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if let Err(e) = inner.track(event, state).await {
                error!(event_type = %event_type, error = %e, "Async tracker failed");
            }
        });
        Ok(())
    }
}
