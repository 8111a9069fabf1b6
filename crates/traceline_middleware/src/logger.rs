//! The middleware wrapper.
//!
//! [`StoreLogger`] composes the trace-entry builder, the filter policy, and
//! the two sinks around a caller-supplied reducer, yielding a drop-in
//! dispatch path that is transparent to the caller's control flow and data.

use std::time::Instant;

use chrono::Local;
use serde_json::Value;

use traceline_foundation::{Action, Result, TraceEntry, clock, is_allowed};
use traceline_sink::{Console, LogPoster, Poster, Printer};

use crate::options::LoggerOptions;

/// The middleware wrapper around a pure reducer.
///
/// Holds the single mutable "last trace" cell that chains each transition's
/// prior-state snapshot to its predecessor's next-state snapshot. One cell
/// exists per instance; instances wrapping different reducers are fully
/// independent. Execution is single-threaded and synchronous: the reducer,
/// both sinks, and the caller share one call stack per dispatch.
pub struct StoreLogger<R> {
    reducer: R,
    options: LoggerOptions,
    printer: Printer,
    poster: Option<Poster>,
    last: Option<TraceEntry>,
}

impl<R> StoreLogger<R>
where
    R: FnMut(&Value, &Action) -> Result<Value>,
{
    /// Wraps a reducer with the default options, printing to stderr.
    #[must_use]
    pub fn new(reducer: R) -> Self {
        Self::with_options(reducer, LoggerOptions::default())
    }

    /// Wraps a reducer with the given options, printing to stderr.
    #[must_use]
    pub fn with_options(reducer: R, options: LoggerOptions) -> Self {
        let printer = Printer::stderr(options.printer_config());
        Self {
            reducer,
            options,
            printer,
            poster: None,
            last: None,
        }
    }

    /// Wraps a reducer with the given options over an injected diagnostic
    /// channel.
    #[must_use]
    pub fn with_console(reducer: R, options: LoggerOptions, console: Box<dyn Console>) -> Self {
        let printer = Printer::new(options.printer_config(), console);
        Self {
            reducer,
            options,
            printer,
            poster: None,
            last: None,
        }
    }

    /// Attaches a remote poster capability, configured from the options'
    /// poster criteria.
    #[must_use]
    pub fn with_poster(mut self, sink: Box<dyn LogPoster>) -> Self {
        self.poster = Some(Poster::new(self.options.poster_config(), sink));
        self
    }

    /// Dispatches one transition through the wrapped reducer, recording and
    /// emitting a trace entry around it.
    ///
    /// Returns the reducer's result unchanged. The initialization marker
    /// action skips all emission; every other action is gated per sink by
    /// its filter spec.
    ///
    /// # Errors
    ///
    /// A reducer failure propagates immediately: no trace is emitted for
    /// the failing transition and the last-trace cell keeps its pre-call
    /// value. A poster delivery failure propagates after the entry has been
    /// recorded and printed.
    pub fn dispatch(&mut self, state: &Value, action: &Action) -> Result<Value> {
        let prev_state = self.last.as_ref().map(|e| e.next_state.clone());
        let started = Instant::now();
        let started_time = Local::now();

        let next_state = (self.reducer)(state, action)?;

        let entry = TraceEntry {
            started,
            started_time,
            action: action.clone(),
            prev_state,
            took_ms: clock::elapsed_ms(started),
            next_state: (self.options.state_transformer)(&next_state),
            error: None,
        };
        self.last = Some(entry.clone());

        if !action.is_init() {
            if is_allowed(action, Some(&self.options.filter)) {
                let mut buffer = vec![entry.clone()];
                self.printer.flush(&mut buffer);
            }
            if let Some(poster) = &mut self.poster {
                if is_allowed(action, Some(&self.options.poster_options.filter)) {
                    let mut buffer = vec![entry];
                    poster.flush(&mut buffer)?;
                }
            }
        }

        Ok(next_state)
    }

    /// Returns the most recent trace entry, if any transition has been
    /// mediated yet.
    #[must_use]
    pub fn last_entry(&self) -> Option<&TraceEntry> {
        self.last.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================
