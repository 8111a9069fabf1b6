//! The dispatched action.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved action type for the store's internal initialization marker.
///
/// Transitions carrying this type are never emitted on either sink,
/// regardless of filter configuration.
pub const INIT_ACTION: &str = "@store/init";

/// Transformer applied to actions before they are displayed or posted.
pub type ActionTransformer = Arc<dyn Fn(&Action) -> Action + Send + Sync>;

/// Returns the identity action transformer (the configured default).
#[must_use]
pub fn identity_action_transformer() -> ActionTransformer {
    Arc::new(Clone::clone)
}

/// A dispatched action: a type tag plus an opaque payload.
///
/// The type tag (`kind`) drives filtering and the init-marker check; the
/// payload is carried through untouched for display and posting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The action type, e.g. `"INC"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Opaque payload attached to the action.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl Action {
    /// Creates an action with no payload.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
        }
    }

    /// Creates an action with a payload.
    #[must_use]
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Returns true if this is the reserved initialization marker.
    #[must_use]
    pub fn is_init(&self) -> bool {
        self.kind == INIT_ACTION
    }

    /// Renders this action as an opaque value, as seen by level functions
    /// and the poster payload.
    #[must_use]
    pub fn as_value(&self) -> Value {
        // Serialization of a type tag and a JSON payload cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_value())
    }
}
