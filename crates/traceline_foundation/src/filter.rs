//! Allow/deny filtering of actions per sink.

use crate::action::Action;

/// Whitelist/blacklist pair gating whether an action reaches a sink.
///
/// A non-empty whitelist takes absolute priority: membership is then both
/// necessary and sufficient, and the blacklist is ignored entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Only actions with these types are eligible (when non-empty).
    pub whitelist: Vec<String>,
    /// Actions with these types are excluded (when the whitelist is empty).
    pub blacklist: Vec<String>,
}

impl FilterSpec {
    /// Creates an empty filter (everything allowed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the whitelist.
    #[must_use]
    pub fn with_whitelist(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.whitelist = types.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the blacklist.
    #[must_use]
    pub fn with_blacklist(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.blacklist = types.into_iter().map(Into::into).collect();
        self
    }
}

/// Returns whether an action is eligible for a sink under a filter.
///
/// No filter means always allowed. Evaluated independently for the printer
/// and poster sinks with their own specs, so an action may be visible to one
/// and suppressed from the other.
#[must_use]
pub fn is_allowed(action: &Action, filter: Option<&FilterSpec>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    if !filter.whitelist.is_empty() {
        return filter.whitelist.iter().any(|t| *t == action.kind);
    }
    !filter.blacklist.iter().any(|t| *t == action.kind)
}
