//! Pulling analytics events out of actions.

use anyhow::Result;
use serde_json::Value;

use crate::action::{is_truthy, ActionLike};

/// What a selector found on an action: nothing, one event, or several.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    One(Value),
    Many(Vec<Value>),
}

impl Selection {
    /// Flatten into an ordered list of candidates, dropping false-y entries.
    pub fn into_candidates(self) -> Vec<Value> {
        let all = match self {
            Selection::None => Vec::new(),
            Selection::One(value) => vec![value],
            Selection::Many(values) => values,
        };
        all.into_iter().filter(is_truthy).collect()
    }
}

/// `null` selects nothing and an array selects each of its elements.
impl From<Value> for Selection {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Selection::None,
            Value::Array(values) => Selection::Many(values),
            other => Selection::One(other),
        }
    }
}

impl From<Option<Value>> for Selection {
    fn from(value: Option<Value>) -> Self {
        value.map(Selection::from).unwrap_or_default()
    }
}

impl From<Option<&Value>> for Selection {
    fn from(value: Option<&Value>) -> Self {
        value.cloned().into()
    }
}

impl From<Vec<Value>> for Selection {
    fn from(values: Vec<Value>) -> Self {
        Selection::Many(values)
    }
}

/// Extracts analytics events from an action.
///
/// Errors propagate out of `dispatch` untouched; a failing selector is a
/// programming error, not something to recover from.
pub trait Selector<A>: Send + Sync {
    fn select(&self, action: &A) -> Result<Selection>;
}

impl<A, F, R> Selector<A> for F
where
    F: Fn(&A) -> Result<R> + Send + Sync,
    R: Into<Selection>,
{
    fn select(&self, action: &A) -> Result<Selection> {
        self(action).map(Into::into)
    }
}

/// Projects `meta.<key>`. The default selector reads `meta.analytics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaKeySelector {
    key: String,
}

impl MetaKeySelector {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for MetaKeySelector {
    fn default() -> Self {
        Self::new("analytics")
    }
}

impl<A: ActionLike> Selector<A> for MetaKeySelector {
    fn select(&self, action: &A) -> Result<Selection> {
        Ok(action.meta().and_then(|meta| meta.get(&self.key)).into())
    }
}
