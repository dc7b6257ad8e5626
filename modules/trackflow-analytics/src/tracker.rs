//! The tracking sink.

use anyhow::Result;
use serde_json::Value;

/// Records a validated event together with the state it was dispatched into.
///
/// Called synchronously from inside `dispatch`. Nothing is retried and
/// errors are not caught: they surface to whoever dispatched the action.
pub trait Tracker<S>: Send + Sync {
    fn track(&self, event: &Value, state: &S) -> Result<()>;
}

impl<S, F> Tracker<S> for F
where
    F: Fn(&Value, &S) -> Result<()> + Send + Sync,
{
    fn track(&self, event: &Value, state: &S) -> Result<()> {
        self(event, state)
    }
}
