//! Core traits for the store.

use std::sync::Arc;

use anyhow::Result;

use crate::store::Next;

/// Pure state updates. No I/O, no side effects.
///
/// Called once per dispatched action, after the action has passed through
/// every middleware.
pub trait Reducer<A, S>: Send + Sync {
    fn reduce(&self, state: &mut S, action: &A);
}

impl<A, S, F> Reducer<A, S> for F
where
    F: Fn(&mut S, &A) + Send + Sync,
{
    fn reduce(&self, state: &mut S, action: &A) {
        self(state, action)
    }
}

/// What a middleware can see of the store while it handles an action.
pub trait MiddlewareApi<A, S> {
    /// Snapshot of the current state.
    fn get_state(&self) -> S;

    /// Dispatch a fresh action through the whole chain, from the top.
    fn dispatch(&self, action: &A) -> Result<A>;
}

/// Intercepts actions on their way to the reducer.
///
/// A middleware decides when (and whether) to call `next`. Whatever it
/// returns becomes the return value of the middleware above it, and
/// ultimately of `Store::dispatch`.
pub trait Middleware<A, S>: Send + Sync {
    fn handle(&self, action: &A, api: &dyn MiddlewareApi<A, S>, next: Next<'_, A, S>)
        -> Result<A>;
}

// ---------------------------------------------------------------------------
// Arc<M> blanket: lets tests keep a handle on an installed middleware
// ---------------------------------------------------------------------------

impl<A, S, M: Middleware<A, S> + ?Sized> Middleware<A, S> for Arc<M> {
    fn handle(
        &self,
        action: &A,
        api: &dyn MiddlewareApi<A, S>,
        next: Next<'_, A, S>,
    ) -> Result<A> {
        (**self).handle(action, api, next)
    }
}
