//! Opaque-value helpers.
//!
//! States, action payloads, and surfaced errors are all represented as
//! [`serde_json::Value`], keeping the middleware agnostic to the caller's
//! state shape.

use std::sync::Arc;

use serde_json::Value;

/// Transformer applied to state snapshots before they are recorded.
pub type StateTransformer = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Returns the identity state transformer (the configured default).
#[must_use]
pub fn identity_state_transformer() -> StateTransformer {
    Arc::new(Clone::clone)
}

/// Returns true if a value is truthy.
///
/// `Null`, `false`, numeric zero, NaN, and the empty string are falsy;
/// everything else (including empty arrays and objects) is truthy. This is
/// the gate used by the poster's default passthrough level functions.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
