//! The machine-facing remote poster adapter.
//!
//! Builds one sparse structured object per trace entry — the title plus
//! whichever facets pass the poster's own level specification — and forwards
//! each to the caller-supplied [`LogPoster`] capability. No batching, retry,
//! or backpressure; delivery failures propagate to the dispatch caller.

use serde::Serialize;
use serde_json::Value;

use traceline_foundation::clock::entry_title;
use traceline_foundation::{
    ActionTransformer, Facet, LevelSpec, Result, TraceEntry, identity_action_transformer,
};

// =============================================================================
// Post Payload
// =============================================================================

/// The sparse structured object forwarded per entry.
///
/// Facets absent from the payload are omitted from serialization entirely.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PostPayload {
    /// The display title (same shape as the printer's group title).
    pub title: String,
    /// The prior-state facet, when its level resolves.
    #[serde(rename = "prevState", skip_serializing_if = "Option::is_none")]
    pub prev_state: Option<Value>,
    /// The action facet, when its level resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
    /// The error facet, when present and its level resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// The next-state facet, when its level resolves.
    #[serde(rename = "nextState", skip_serializing_if = "Option::is_none")]
    pub next_state: Option<Value>,
}

// =============================================================================
// Poster Capability
// =============================================================================

/// The caller-supplied remote sink: a single forwarding operation.
///
/// Return values are ignored by the adapter beyond error propagation;
/// failures are not caught by this system and surface to the dispatch
/// caller synchronously.
pub trait LogPoster {
    /// Forwards one payload to the remote side.
    ///
    /// # Errors
    ///
    /// Any error returned here aborts the dispatch call that triggered it.
    fn post_log(&mut self, payload: &PostPayload) -> Result<()>;
}

// =============================================================================
// Poster Configuration
// =============================================================================

/// Configuration for the poster adapter.
#[derive(Clone)]
pub struct PosterConfig {
    /// Severity specification consulted per facet. The default passthrough
    /// includes each facet when its value is truthy, which makes errors
    /// visible exactly when present.
    pub level: LevelSpec,
    /// Whether the title carries the wall-clock timestamp.
    pub timestamp: bool,
    /// Whether the title carries the reducer duration.
    pub duration: bool,
    /// Transformer applied to actions before posting.
    pub action_transformer: ActionTransformer,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            level: LevelSpec::passthrough(),
            timestamp: true,
            duration: true,
            action_transformer: identity_action_transformer(),
        }
    }
}

impl PosterConfig {
    /// Creates the default poster configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the level specification.
    #[must_use]
    pub fn with_level(mut self, level: LevelSpec) -> Self {
        self.level = level;
        self
    }

    /// Builder method to toggle the timestamp segment.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method to toggle the duration segment.
    #[must_use]
    pub fn with_duration(mut self, duration: bool) -> Self {
        self.duration = duration;
        self
    }

    /// Builder method to set the action transformer.
    #[must_use]
    pub fn with_action_transformer(mut self, transformer: ActionTransformer) -> Self {
        self.action_transformer = transformer;
        self
    }
}

// =============================================================================
// Poster Adapter
// =============================================================================

/// The remote poster sink.
pub struct Poster {
    sink: Box<dyn LogPoster>,
    config: PosterConfig,
}

impl Poster {
    /// Creates a poster adapter over a caller-supplied sink.
    #[must_use]
    pub fn new(config: PosterConfig, sink: Box<dyn LogPoster>) -> Self {
        Self { sink, config }
    }

    /// Flushes a buffer of trace entries, one forwarding call per entry,
    /// then clears the buffer. Mirrors the printer's flush semantics,
    /// including the one-position lookahead for batched buffers.
    ///
    /// # Errors
    ///
    /// Propagates the first delivery failure immediately; entries after the
    /// failing one are not forwarded and the buffer is left unflushed.
    pub fn flush(&mut self, buffer: &mut Vec<TraceEntry>) -> Result<()> {
        for i in 0..buffer.len() {
            let entry = &buffer[i];
            let mut took_ms = entry.took_ms;
            let mut next_state = entry.next_state.clone();
            if let Some(successor) = buffer.get(i + 1) {
                next_state = successor.prev_state.clone().unwrap_or(next_state);
                took_ms = successor
                    .started
                    .duration_since(entry.started)
                    .as_secs_f64()
                    * 1000.0;
            }

            let formatted = (self.config.action_transformer)(&entry.action);
            let prev_state = entry.prev_state_or_empty();
            let level = &self.config.level;

            let mut payload = PostPayload {
                title: entry_title(
                    &formatted,
                    &entry.started_time,
                    took_ms,
                    self.config.timestamp,
                    self.config.duration,
                ),
                ..PostPayload::default()
            };

            let args = [prev_state.clone()];
            if level.resolve(&formatted, &args, Facet::PrevState).is_some() {
                payload.prev_state = Some(prev_state.clone());
            }

            let action_value = formatted.as_value();
            let args = [action_value.clone()];
            if level.resolve(&formatted, &args, Facet::Action).is_some() {
                payload.action = Some(action_value);
            }

            if let Some(error) = &entry.error {
                let args = [error.clone(), prev_state];
                if level.resolve(&formatted, &args, Facet::Error).is_some() {
                    payload.error = Some(error.clone());
                }
            }

            let args = [next_state.clone()];
            if level.resolve(&formatted, &args, Facet::NextState).is_some() {
                payload.next_state = Some(next_state);
            }

            self.sink.post_log(&payload)?;
        }
        buffer.clear();
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
