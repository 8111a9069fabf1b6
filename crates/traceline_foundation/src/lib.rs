//! Core types, level resolution, and filtering for Traceline.
//!
//! This crate provides:
//! - [`Severity`] - Named log levels keying diagnostic-channel emission
//! - [`Action`] - The dispatched action (type tag plus opaque payload)
//! - [`TraceEntry`] - One captured record of a single reducer invocation
//! - [`LevelSpec`] - The polymorphic per-facet severity specification
//! - [`FilterSpec`] - Whitelist/blacklist gating per sink
//! - [`Error`] - Rich error types with helper constructors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod clock;
pub mod entry;
pub mod error;
pub mod filter;
pub mod level;
pub mod severity;
pub mod value;

pub use action::{Action, ActionTransformer, INIT_ACTION, identity_action_transformer};
pub use entry::{EMPTY_STATE, TraceEntry};
pub use error::{BoxedError, Error, Result};
pub use filter::{FilterSpec, is_allowed};
pub use level::{Facet, FacetLevel, FacetLevels, LevelSpec};
pub use severity::Severity;
pub use value::{StateTransformer, identity_state_transformer, is_truthy};
