//! Synchronous unidirectional-data-flow store.
//!
//! Provides the dispatch chain: middleware → ... → reduce. Every dispatched
//! action walks the middleware list in insertion order; the terminal step
//! applies the reducer to the state held by the store.
//!
//! Consumers define their domain by implementing `Reducer` (pure state
//! updates) and `Middleware` (interception with access to the store and the
//! rest of the chain).

pub mod store;
pub mod traits;

pub use store::{Next, Store};
pub use traits::{Middleware, MiddlewareApi, Reducer};
