//! The dispatch chain.

use std::sync::{PoisonError, RwLock};

use anyhow::Result;
use tracing::trace;

use crate::traits::{Middleware, MiddlewareApi, Reducer};

/// In-process state container.
///
/// Middleware → ... → reduce. The first middleware installed is the
/// outermost: it sees the action first and returns last.
pub struct Store<A, S> {
    state: RwLock<S>,
    reducer: Box<dyn Reducer<A, S>>,
    middleware: Vec<Box<dyn Middleware<A, S>>>,
}

impl<A, S> Store<A, S>
where
    A: Clone,
    S: Clone,
{
    pub fn new(reducer: impl Reducer<A, S> + 'static, initial_state: S) -> Self {
        Self {
            state: RwLock::new(initial_state),
            reducer: Box::new(reducer),
            middleware: Vec::new(),
        }
    }

    /// Append a middleware to the end of the chain.
    pub fn with_middleware(mut self, middleware: impl Middleware<A, S> + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Dispatch an action through every middleware and into the reducer.
    ///
    /// Returns whatever the outermost middleware returned; with no middleware
    /// that is a copy of the action itself.
    pub fn dispatch(&self, action: &A) -> Result<A> {
        self.next_from(0).run(action)
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.read(S::clone)
    }

    /// Borrow the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Number of installed middleware.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    fn next_from(&self, index: usize) -> Next<'_, A, S> {
        Next { store: self, index }
    }

    fn reduce(&self, action: &A) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.reducer.reduce(&mut state, action);
    }
}

impl<A, S> MiddlewareApi<A, S> for Store<A, S>
where
    A: Clone,
    S: Clone,
{
    fn get_state(&self) -> S {
        Store::get_state(self)
    }

    fn dispatch(&self, action: &A) -> Result<A> {
        Store::dispatch(self, action)
    }
}

/// The remainder of the chain below the current middleware.
///
/// Consumed by `run`, so a middleware forwards an action at most once per
/// continuation it was handed.
pub struct Next<'a, A, S> {
    store: &'a Store<A, S>,
    index: usize,
}

impl<A, S> Next<'_, A, S>
where
    A: Clone,
    S: Clone,
{
    /// Forward the action to the next middleware, or to the reducer when no
    /// middleware is left.
    pub fn run(self, action: &A) -> Result<A> {
        match self.store.middleware.get(self.index) {
            Some(middleware) => {
                let next = self.store.next_from(self.index + 1);
                middleware.handle(action, self.store, next)
            }
            None => {
                trace!("chain exhausted, reducing");
                self.store.reduce(action);
                Ok(action.clone())
            }
        }
    }

    /// Whether `run` will reach the reducer directly.
    pub fn is_terminal(&self) -> bool {
        self.index >= self.store.middleware.len()
    }
}
