//! The diagnostic output channel.
//!
//! The printer talks to an abstract [`Console`] capability offering grouped,
//! leveled print operations. Channels may lack grouping support; the printer
//! recovers from [`ChannelError`] with a flat fallback, so no channel
//! failure ever reaches the dispatch caller.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use traceline_foundation::{Action, Severity};

// =============================================================================
// Channel Error
// =============================================================================

/// Failure surfaced by a diagnostic channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel does not support grouped output.
    #[error("grouping is not supported by this channel")]
    GroupingUnsupported,
    /// The channel failed to write.
    #[error("channel write failed: {0}")]
    Io(#[from] io::Error),
}

// =============================================================================
// Color
// =============================================================================

/// A color hint for channel output, mapped to ANSI 256-color codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Grey, the default prior-state hue.
    Grey,
    /// Blue, the default action hue.
    Blue,
    /// Green, the default next-state hue.
    Green,
    /// Red, the default error hue.
    Red,
    /// An explicit ANSI 256-color code.
    Fixed(u8),
}

impl Color {
    /// Returns the ANSI 256-color code for this color.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Grey => 245,
            Self::Blue => 39,
            Self::Green => 71,
            Self::Red => 160,
            Self::Fixed(code) => code,
        }
    }

    /// Wraps text in this color.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[38;5;{}m{text}\x1b[0m", self.code())
    }

    /// Wraps text in this color with bold weight (used for facet labels).
    #[must_use]
    pub fn paint_bold(self, text: &str) -> String {
        format!("\x1b[1;38;5;{}m{text}\x1b[0m", self.code())
    }
}

/// Function computing a title color from the transformed action.
pub type TitleColorFn = Arc<dyn Fn(&Action) -> Color + Send + Sync>;

/// Function computing a facet color from the facet's value.
pub type ValueColorFn = Arc<dyn Fn(&Value) -> Color + Send + Sync>;

/// Optional per-facet color functions.
///
/// An absent entry prints that part plain. The whole scheme is decided at
/// construction time; there is no runtime environment sniffing.
#[derive(Clone, Default)]
pub struct ColorScheme {
    /// Color for the group title.
    pub title: Option<TitleColorFn>,
    /// Color for the prior-state facet.
    pub prev_state: Option<ValueColorFn>,
    /// Color for the action facet.
    pub action: Option<ValueColorFn>,
    /// Color for the error facet.
    pub error: Option<ValueColorFn>,
    /// Color for the next-state facet.
    pub next_state: Option<ValueColorFn>,
}

impl ColorScheme {
    /// The standard scheme: uncolored title, grey prior state, blue action,
    /// green next state, red error.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            title: None,
            prev_state: Some(Arc::new(|_| Color::Grey)),
            action: Some(Arc::new(|_| Color::Blue)),
            error: Some(Arc::new(|_| Color::Red)),
            next_state: Some(Arc::new(|_| Color::Green)),
        }
    }

    /// A scheme with every color disabled (plain output).
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }
}

// =============================================================================
// Console Capability
// =============================================================================

/// Grouped, leveled print operations offered by the runtime environment.
///
/// `group`/`group_end` are fallible so that channels without grouping
/// support can degrade; `emit` and `line` must not fail observably.
pub trait Console {
    /// Opens a group labeled with `title`, collapsed or expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the channel cannot open a group; the
    /// printer then falls back to a flat title line.
    fn group(&mut self, title: &str, collapsed: bool, color: Option<Color>)
    -> Result<(), ChannelError>;

    /// Closes the innermost open group.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the channel cannot close a group; the
    /// printer then prints a textual separator instead.
    fn group_end(&mut self) -> Result<(), ChannelError>;

    /// Emits one facet at the given severity, with an optional color hint.
    fn emit(&mut self, severity: Severity, label: &str, color: Option<Color>, value: &Value);

    /// Prints a flat line (the degraded fallback path).
    fn line(&mut self, text: &str);
}

// =============================================================================
// Stderr Console
// =============================================================================

/// A [`Console`] writing grouped, indented output to stderr.
#[derive(Debug, Default)]
pub struct StderrConsole {
    depth: usize,
}

impl StderrConsole {
    /// Creates a new stderr console.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }

    fn write(&self, text: &str) {
        let _ = writeln!(io::stderr(), "{}{text}", self.indent());
    }
}

impl Console for StderrConsole {
    fn group(
        &mut self,
        title: &str,
        collapsed: bool,
        color: Option<Color>,
    ) -> Result<(), ChannelError> {
        let marker = if collapsed { "▸" } else { "▾" };
        let styled = color.map_or_else(|| title.to_string(), |c| c.paint(title));
        self.write(&format!("{marker} {styled}"));
        self.depth += 1;
        Ok(())
    }

    fn group_end(&mut self) -> Result<(), ChannelError> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn emit(&mut self, severity: Severity, label: &str, color: Option<Color>, value: &Value) {
        let styled = color.map_or_else(|| label.to_string(), |c| c.paint_bold(label));
        self.write(&format!("[{severity}] {styled} {value}"));
    }

    fn line(&mut self, text: &str) {
        self.write(text);
    }
}

// =============================================================================
// Memory Console
// =============================================================================

/// One recorded call on a [`MemoryConsole`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleEvent {
    /// A group was opened.
    Group {
        /// The group title.
        title: String,
        /// Whether the group was requested collapsed.
        collapsed: bool,
    },
    /// A group was closed.
    GroupEnd,
    /// A facet was emitted.
    Emit {
        /// The resolved severity.
        severity: Severity,
        /// The facet label.
        label: String,
        /// The facet value.
        value: Value,
    },
    /// A flat line was printed (the degraded path).
    Line(String),
}

/// A capturing [`Console`] for tests and embedding.
///
/// Clones share the same event log, so a caller can hand one clone to the
/// printer and inspect the other. Optionally refuses grouping to exercise
/// the printer's degraded path.
#[derive(Clone, Debug, Default)]
pub struct MemoryConsole {
    events: Rc<RefCell<Vec<ConsoleEvent>>>,
    fail_grouping: bool,
}

impl MemoryConsole {
    /// Creates a capturing console with grouping support.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capturing console that rejects all grouping calls.
    #[must_use]
    pub fn without_grouping() -> Self {
        Self {
            events: Rc::default(),
            fail_grouping: true,
        }
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.events.borrow().clone()
    }

    /// Returns the recorded events matching a predicate.
    pub fn events_where<F>(&self, predicate: F) -> Vec<ConsoleEvent>
    where
        F: Fn(&ConsoleEvent) -> bool,
    {
        self.events
            .borrow()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Console for MemoryConsole {
    fn group(
        &mut self,
        title: &str,
        collapsed: bool,
        _color: Option<Color>,
    ) -> Result<(), ChannelError> {
        if self.fail_grouping {
            return Err(ChannelError::GroupingUnsupported);
        }
        self.events.borrow_mut().push(ConsoleEvent::Group {
            title: title.to_string(),
            collapsed,
        });
        Ok(())
    }

    fn group_end(&mut self) -> Result<(), ChannelError> {
        if self.fail_grouping {
            return Err(ChannelError::GroupingUnsupported);
        }
        self.events.borrow_mut().push(ConsoleEvent::GroupEnd);
        Ok(())
    }

    fn emit(&mut self, severity: Severity, label: &str, _color: Option<Color>, value: &Value) {
        self.events.borrow_mut().push(ConsoleEvent::Emit {
            severity,
            label: label.to_string(),
            value: value.clone(),
        });
    }

    fn line(&mut self, text: &str) {
        self.events
            .borrow_mut()
            .push(ConsoleEvent::Line(text.to_string()));
    }
}

// =============================================================================
// Tests
// =============================================================================
