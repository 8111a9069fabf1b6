//! The human-facing structured printer.
//!
//! Renders each trace entry as a grouped, optionally colorized block on the
//! diagnostic channel: a title line, then the prior-state, action, error
//! (when present), and next-state facets, each gated by the level resolver.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use traceline_foundation::clock::entry_title;
use traceline_foundation::{
    Action, ActionTransformer, Facet, LevelSpec, TraceEntry, identity_action_transformer,
};

use crate::console::{ColorScheme, Console, StderrConsole};

// =============================================================================
// Collapse
// =============================================================================

/// Predicate deciding collapse per entry, given the next state and the
/// transformed action.
pub type CollapsePredicate = Arc<dyn Fn(&Value, &Action) -> bool + Send + Sync>;

/// Whether printed groups start collapsed.
#[derive(Clone)]
pub enum Collapse {
    /// Always collapsed or always expanded.
    Fixed(bool),
    /// Decided per entry.
    When(CollapsePredicate),
}

impl Default for Collapse {
    fn default() -> Self {
        Self::Fixed(false)
    }
}

impl Collapse {
    fn decide(&self, next_state: &Value, action: &Action) -> bool {
        match self {
            Self::Fixed(collapsed) => *collapsed,
            Self::When(predicate) => predicate(next_state, action),
        }
    }
}

impl fmt::Debug for Collapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(collapsed) => f.debug_tuple("Fixed").field(collapsed).finish(),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

// =============================================================================
// Printer Configuration
// =============================================================================

/// Configuration for the structured printer.
#[derive(Clone)]
pub struct PrinterConfig {
    /// Severity specification consulted per facet.
    pub level: LevelSpec,
    /// Whether groups start collapsed.
    pub collapsed: Collapse,
    /// Whether the title carries the reducer duration.
    pub duration: bool,
    /// Whether the title carries the wall-clock timestamp.
    pub timestamp: bool,
    /// Per-facet color hints.
    pub colors: ColorScheme,
    /// Transformer applied to actions before display.
    pub action_transformer: ActionTransformer,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            level: LevelSpec::default(),
            collapsed: Collapse::default(),
            duration: true,
            timestamp: true,
            colors: ColorScheme::standard(),
            action_transformer: identity_action_transformer(),
        }
    }
}

impl PrinterConfig {
    /// Creates the default printer configuration.
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

    /// Builder method to set the collapse behavior.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: Collapse) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Builder method to toggle the duration segment.
    #[must_use]
    pub fn with_duration(mut self, duration: bool) -> Self {
        self.duration = duration;
        self
    }

    /// Builder method to toggle the timestamp segment.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method to set the color scheme.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
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
// Printer
// =============================================================================

/// The structured printer sink.
pub struct Printer {
    channel: Box<dyn Console>,
    config: PrinterConfig,
}

impl Printer {
    /// Creates a printer over an arbitrary diagnostic channel.
    #[must_use]
    pub fn new(config: PrinterConfig, channel: Box<dyn Console>) -> Self {
        Self { channel, config }
    }

    /// Creates a printer writing to stderr.
    #[must_use]
    pub fn stderr(config: PrinterConfig) -> Self {
        Self::new(config, Box::new(StderrConsole::new()))
    }

    /// Flushes a buffer of trace entries, one grouped block per entry, then
    /// clears the buffer (single-flush semantics — entries are never
    /// re-emitted, and an empty buffer produces no output).
    ///
    /// Each entry looks one position ahead: when a successor exists, the
    /// duration and next-state snapshot are recomputed from it. The shipped
    /// middleware always hands singleton buffers; the lookahead supports
    /// callers that accumulate entries before flushing.
    pub fn flush(&mut self, buffer: &mut Vec<TraceEntry>) {
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
            let title = entry_title(
                &formatted,
                &entry.started_time,
                took_ms,
                self.config.timestamp,
                self.config.duration,
            );

            let collapsed = self.config.collapsed.decide(&next_state, &formatted);
            let title_color = self.config.colors.title.as_ref().map(|f| f(&formatted));
            if self.channel.group(&title, collapsed, title_color).is_err() {
                // Channel lacks grouping support; degrade to a flat title.
                self.channel.line(&title);
            }

            let level = &self.config.level;

            let args = [prev_state.clone()];
            if let Some(severity) = level.resolve(&formatted, &args, Facet::PrevState) {
                let color = self.config.colors.prev_state.as_ref().map(|f| f(&prev_state));
                self.channel
                    .emit(severity, Facet::PrevState.label(), color, &prev_state);
            }

            let action_value = formatted.as_value();
            let args = [action_value.clone()];
            if let Some(severity) = level.resolve(&formatted, &args, Facet::Action) {
                let color = self.config.colors.action.as_ref().map(|f| f(&action_value));
                self.channel
                    .emit(severity, Facet::Action.label(), color, &action_value);
            }

            if let Some(error) = &entry.error {
                let args = [error.clone(), prev_state.clone()];
                if let Some(severity) = level.resolve(&formatted, &args, Facet::Error) {
                    let color = self.config.colors.error.as_ref().map(|f| f(error));
                    self.channel.emit(severity, Facet::Error.label(), color, error);
                }
            }

            let args = [next_state.clone()];
            if let Some(severity) = level.resolve(&formatted, &args, Facet::NextState) {
                let color = self.config.colors.next_state.as_ref().map(|f| f(&next_state));
                self.channel
                    .emit(severity, Facet::NextState.label(), color, &next_state);
            }

            if self.channel.group_end().is_err() {
                self.channel.line("—— log end ——");
            }
        }
        buffer.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
