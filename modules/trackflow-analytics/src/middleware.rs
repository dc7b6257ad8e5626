//! The tracking middleware.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};
use trackflow_store::{Middleware, MiddlewareApi, Next};

use crate::action::{is_truthy, ActionLike};
use crate::config::TrackingConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink, UNTRACKED_EVENT_MESSAGE};
use crate::selection::{MetaKeySelector, Selector};
use crate::shape::validate;
use crate::tracker::Tracker;

type Validator = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Forwards every action, then tracks the analytics events it carries.
///
/// Per action: `next` → guard on `meta` → select → validate each candidate
/// → track conformant ones with the post-dispatch state, report the rest.
/// The value returned by `next` is passed back up unchanged. Holds no state
/// between dispatches.
pub struct TrackingMiddleware<A, S> {
    tracker: Box<dyn Tracker<S>>,
    selector: Box<dyn Selector<A>>,
    validator: Option<Validator>,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl<A, S> TrackingMiddleware<A, S>
where
    A: ActionLike + 'static,
    S: 'static,
{
    /// Track events found under `meta.analytics`.
    pub fn new(tracker: impl Tracker<S> + 'static) -> Self {
        Self {
            tracker: Box::new(tracker),
            selector: Box::new(MetaKeySelector::default()),
            validator: None,
            diagnostics: Box::new(TracingSink),
        }
    }

    pub fn from_config(tracker: impl Tracker<S> + 'static, config: &TrackingConfig) -> Self {
        Self {
            tracker: Box::new(tracker),
            selector: Box::new(MetaKeySelector::new(config.analytics_key.clone())),
            validator: None,
            diagnostics: config.diagnostics.sink(),
        }
    }

    /// Replace the default `meta.analytics` projection.
    pub fn with_selector(mut self, selector: impl Selector<A> + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Replace the built-in standard action shape check.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }
}

impl<A, S> TrackingMiddleware<A, S>
where
    A: ActionLike,
{
    /// Everything that happens after the action has been forwarded.
    fn track_action(&self, action: &A, api: &dyn MiddlewareApi<A, S>) -> Result<()> {
        if !action.meta().is_some_and(is_truthy) {
            return Ok(());
        }

        let candidates = self.selector.select(action)?.into_candidates();
        if candidates.is_empty() {
            debug!(
                action_type = action.action_type().unwrap_or_default(),
                "Nothing to track"
            );
            return Ok(());
        }

        let mut first_failure = None;
        for event in candidates {
            if !self.conforms(&event) {
                self.diagnostics.report(UNTRACKED_EVENT_MESSAGE, &event);
                continue;
            }

            let state = api.get_state();
            let event_type = event.get("type").and_then(Value::as_str).unwrap_or_default();
            match self.tracker.track(&event, &state) {
                Ok(()) => debug!(event_type, "Tracked event"),
                Err(e) if first_failure.is_none() => first_failure = Some(e),
                Err(e) => {
                    warn!(event_type, error = %e, "Tracker failed again in the same dispatch")
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn conforms(&self, event: &Value) -> bool {
        match &self.validator {
            Some(validator) => validator(event),
            None => match validate(event) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(%reason, "Event is not a standard action");
                    false
                }
            },
        }
    }
}

impl<A, S> Middleware<A, S> for TrackingMiddleware<A, S>
where
    A: ActionLike + Clone,
    S: Clone,
{
    fn handle(
        &self,
        action: &A,
        api: &dyn MiddlewareApi<A, S>,
        next: Next<'_, A, S>,
    ) -> Result<A> {
        // Reducers must run before the state snapshot is taken.
        let returned = next.run(action)?;
        self.track_action(action, api)?;
        Ok(returned)
    }
}
