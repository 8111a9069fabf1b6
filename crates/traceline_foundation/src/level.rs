//! Polymorphic severity-level specification and resolution.
//!
//! A level specification decides, per trace facet, whether and at what
//! severity that facet is emitted. Three configuration shapes are supported
//! as a closed tagged variant: a fixed severity, a uniform per-action
//! function, and a per-facet mapping whose entries are either fixed or
//! computed from the facet's values.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::action::Action;
use crate::severity::Severity;
use crate::value::is_truthy;

// =============================================================================
// Facet
// =============================================================================

/// One of the four inspectable parts of a trace entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facet {
    /// The state snapshot before the transition.
    PrevState,
    /// The dispatched action.
    Action,
    /// The error surfaced for the transition, if any.
    Error,
    /// The state snapshot after the transition.
    NextState,
}

impl Facet {
    /// Returns the human-facing label the printer uses for this facet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrevState => "prev state",
            Self::Action => "action",
            Self::Error => "error",
            Self::NextState => "next state",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Level Specification
// =============================================================================

/// Function computing a severity from the transformed action.
pub type ActionLevelFn = Arc<dyn Fn(&Action) -> Option<Severity> + Send + Sync>;

/// Function computing a severity from a facet's value arguments.
pub type ValueLevelFn = Arc<dyn Fn(&[Value]) -> Option<Severity> + Send + Sync>;

/// The polymorphic level specification.
///
/// `None` anywhere in a resolved position means "suppress this facet".
#[derive(Clone)]
pub enum LevelSpec {
    /// One fixed severity for every facet.
    Fixed(Option<Severity>),
    /// A function of the transformed action, applied uniformly to all
    /// facets (facet values and names are ignored).
    PerAction(ActionLevelFn),
    /// An independent entry per facet.
    PerFacet(FacetLevels),
}

/// A single facet's entry inside a per-facet mapping.
#[derive(Clone)]
pub enum FacetLevel {
    /// A fixed severity (or `None` to suppress).
    Fixed(Option<Severity>),
    /// A function of the facet's ordered value arguments.
    PerValue(ValueLevelFn),
}

/// Per-facet mapping from facet to level entry.
///
/// An absent entry resolves to `None`, i.e. the facet is not emitted.
#[derive(Clone, Default)]
pub struct FacetLevels {
    /// Entry for the prior-state facet.
    pub prev_state: Option<FacetLevel>,
    /// Entry for the action facet.
    pub action: Option<FacetLevel>,
    /// Entry for the error facet.
    pub error: Option<FacetLevel>,
    /// Entry for the next-state facet.
    pub next_state: Option<FacetLevel>,
}

impl FacetLevels {
    /// Creates an empty mapping (every facet suppressed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the prior-state entry.
    #[must_use]
    pub fn with_prev_state(mut self, level: FacetLevel) -> Self {
        self.prev_state = Some(level);
        self
    }

    /// Builder method to set the action entry.
    #[must_use]
    pub fn with_action(mut self, level: FacetLevel) -> Self {
        self.action = Some(level);
        self
    }

    /// Builder method to set the error entry.
    #[must_use]
    pub fn with_error(mut self, level: FacetLevel) -> Self {
        self.error = Some(level);
        self
    }

    /// Builder method to set the next-state entry.
    #[must_use]
    pub fn with_next_state(mut self, level: FacetLevel) -> Self {
        self.next_state = Some(level);
        self
    }

    /// Returns the entry for a facet, if any.
    #[must_use]
    pub fn get(&self, facet: Facet) -> Option<&FacetLevel> {
        match facet {
            Facet::PrevState => self.prev_state.as_ref(),
            Facet::Action => self.action.as_ref(),
            Facet::Error => self.error.as_ref(),
            Facet::NextState => self.next_state.as_ref(),
        }
    }
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self::Fixed(Some(Severity::Log))
    }
}

impl LevelSpec {
    /// Creates a specification that emits every facet at one severity.
    #[must_use]
    pub fn uniform(severity: Severity) -> Self {
        Self::Fixed(Some(severity))
    }

    /// Creates a specification that suppresses every facet.
    #[must_use]
    pub fn suppressed() -> Self {
        Self::Fixed(None)
    }

    /// Creates the poster's default passthrough specification: every facet
    /// is emitted at `log` exactly when its first value argument is truthy.
    ///
    /// Because the error facet's first argument is the error itself (or
    /// null when absent), this makes errors visible exactly when present
    /// while the other facets pass through unchanged.
    #[must_use]
    pub fn passthrough() -> Self {
        let truthy: ValueLevelFn = Arc::new(|args: &[Value]| {
            args.first()
                .is_some_and(is_truthy)
                .then_some(Severity::Log)
        });
        Self::PerFacet(
            FacetLevels::new()
                .with_prev_state(FacetLevel::PerValue(Arc::clone(&truthy)))
                .with_action(FacetLevel::PerValue(Arc::clone(&truthy)))
                .with_error(FacetLevel::PerValue(Arc::clone(&truthy)))
                .with_next_state(FacetLevel::PerValue(truthy)),
        )
    }

    /// Resolves the severity for one facet of one transition.
    ///
    /// `action` is the transformed action, `args` the facet's ordered value
    /// arguments (error receives `[error-or-null, prev-state]`, the others
    /// their own value). Returns `None` to suppress the facet; unknown or
    /// absent mapping entries never raise an error.
    #[must_use]
    pub fn resolve(&self, action: &Action, args: &[Value], facet: Facet) -> Option<Severity> {
        match self {
            Self::Fixed(severity) => *severity,
            Self::PerAction(f) => f(action),
            Self::PerFacet(levels) => match levels.get(facet) {
                Some(FacetLevel::Fixed(severity)) => *severity,
                Some(FacetLevel::PerValue(f)) => f(args),
                None => None,
            },
        }
    }
}

impl fmt::Debug for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(severity) => f.debug_tuple("Fixed").field(severity).finish(),
            Self::PerAction(_) => f.write_str("PerAction(..)"),
            Self::PerFacet(_) => f.write_str("PerFacet(..)"),
        }
    }
}

impl fmt::Debug for FacetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(severity) => f.debug_tuple("Fixed").field(severity).finish(),
            Self::PerValue(_) => f.write_str("PerValue(..)"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
