//! Traceline - Reducer instrumentation middleware
//!
//! This crate re-exports all layers of the Traceline system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: traceline_middleware — LoggerOptions, StoreLogger wrapper
//! Layer 1: traceline_sink       — Console channel, Printer, Poster
//! Layer 0: traceline_foundation — Severity, Action, TraceEntry, levels, filters
//! ```

pub use traceline_foundation as foundation;
pub use traceline_middleware as middleware;
pub use traceline_sink as sink;
