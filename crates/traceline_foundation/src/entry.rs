//! The per-transition trace record.

use std::time::Instant;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::action::Action;

/// Sentinel rendered for the prior-state facet of the very first transition.
pub const EMPTY_STATE: &str = "(Empty)";

/// One captured record of a single reducer invocation.
///
/// Entries are immutable once built and held only transiently: each is
/// flushed to the sinks and retained solely to seed the next transition's
/// prior-state snapshot.
#[derive(Clone, Debug)]
pub struct TraceEntry {
    /// Monotonic timestamp captured before invoking the reducer.
    pub started: Instant,
    /// Wall-clock timestamp, for display only.
    pub started_time: DateTime<Local>,
    /// The dispatched action (transformers apply at the sinks).
    pub action: Action,
    /// Transformed state snapshot before the transition. `None` on the very
    /// first transition of a middleware instance.
    pub prev_state: Option<Value>,
    /// Duration of the reducer call in milliseconds.
    pub took_ms: f64,
    /// Transformed state snapshot after the transition.
    pub next_state: Value,
    /// Error surfaced by the caller for this transition, if any. The
    /// default wrapper never sets this, but sinks honor it.
    pub error: Option<Value>,
}

impl TraceEntry {
    /// Returns the prior-state facet value, substituting the [`EMPTY_STATE`]
    /// sentinel on the first transition.
    #[must_use]
    pub fn prev_state_or_empty(&self) -> Value {
        self.prev_state
            .clone()
            .unwrap_or_else(|| Value::String(EMPTY_STATE.to_string()))
    }
}
