//! Error types for the Traceline system.
//!
//! Uses `thiserror` for ergonomic error definition.

use thiserror::Error as ThisError;

/// Boxed source error carried by the failure variants.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenient result alias for Traceline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Traceline operations.
///
/// Reducer and delivery failures propagate synchronously to the dispatch
/// caller; nothing in this crate catches them.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The wrapped reducer failed. No trace is emitted for the failing
    /// transition and the last-trace cell is left untouched.
    #[error("reducer failed: {0}")]
    Reducer(#[source] BoxedError),

    /// The injected remote poster failed to deliver a payload.
    #[error("log delivery failed: {0}")]
    Delivery(#[source] BoxedError),

    /// A severity name did not match any known level.
    #[error("unknown severity: {0:?}")]
    UnknownSeverity(String),
}

impl Error {
    /// Creates a reducer failure from any error value.
    #[must_use]
    pub fn reducer(source: impl Into<BoxedError>) -> Self {
        Self::Reducer(source.into())
    }

    /// Creates a delivery failure from any error value.
    #[must_use]
    pub fn delivery(source: impl Into<BoxedError>) -> Self {
        Self::Delivery(source.into())
    }

    /// Creates an unknown-severity error.
    #[must_use]
    pub fn unknown_severity(name: impl Into<String>) -> Self {
        Self::UnknownSeverity(name.into())
    }
}
