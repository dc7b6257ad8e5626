//! Read access to dispatched actions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything the tracking middleware can look inside.
///
/// Only two things matter: the discriminant and the optional `meta` mapping
/// where analytics payloads live.
pub trait ActionLike {
    fn action_type(&self) -> Option<&str>;

    fn meta(&self) -> Option<&Value>;
}

/// Untyped actions. Anything other than a JSON object is a malformed action
/// without meta.
impl ActionLike for Value {
    fn action_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    fn meta(&self) -> Option<&Value> {
        self.as_object().and_then(|map| map.get("meta"))
    }
}

/// An absent action has neither type nor meta.
impl<T: ActionLike> ActionLike for Option<T> {
    fn action_type(&self) -> Option<&str> {
        self.as_ref().and_then(|action| action.action_type())
    }

    fn meta(&self) -> Option<&Value> {
        self.as_ref().and_then(|action| action.meta())
    }
}

impl<T: ActionLike + ?Sized> ActionLike for &T {
    fn action_type(&self) -> Option<&str> {
        (**self).action_type()
    }

    fn meta(&self) -> Option<&Value> {
        (**self).meta()
    }
}

/// Typed standard-shape action: `{ type, payload?, error?, meta? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
            error: None,
            meta: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Attach an analytics event under `meta.analytics`, keeping any other
    /// meta keys. A non-object meta is replaced.
    pub fn with_analytics(mut self, event: Value) -> Self {
        let mut meta = match self.meta.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        meta.insert("analytics".to_string(), event);
        self.meta = Some(Value::Object(meta));
        self
    }
}

impl ActionLike for Action {
    fn action_type(&self) -> Option<&str> {
        Some(&self.kind)
    }

    fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }
}

/// JavaScript truthiness over JSON values.
///
/// `null`, `false`, `0` and `""` are false-y. Empty objects and arrays are
/// truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_meta_requires_an_object() {
        assert_eq!(json!({ "type": "X", "meta": 1 }).meta(), Some(&json!(1)));
        assert_eq!(json!("X").meta(), None);
        assert_eq!(Value::Null.meta(), None);
    }

    #[test]
    fn absent_action_has_no_meta() {
        let action: Option<Value> = None;
        assert_eq!(action.meta(), None);
        assert_eq!(action.action_type(), None);
    }

    #[test]
    fn with_analytics_merges_into_existing_meta() {
        let action = Action::new("FOO")
            .with_meta(json!({ "source": "nav" }))
            .with_analytics(json!({ "type": "click" }));

        assert_eq!(
            action.meta,
            Some(json!({ "source": "nav", "analytics": { "type": "click" } }))
        );
    }

    #[test]
    fn typed_action_serializes_in_standard_shape() {
        let action = Action::new("FOO").with_payload(json!(42));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "type": "FOO", "payload": 42 })
        );
    }

    #[test]
    fn truthiness_matches_javascript_for_json() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be false-y");
        }
        for truthy in [json!(true), json!(1), json!("0"), json!({}), json!([])] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
