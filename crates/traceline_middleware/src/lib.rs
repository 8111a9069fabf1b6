//! Reducer-wrapping middleware for Traceline.
//!
//! This crate provides:
//! - [`LoggerOptions`] - The full configuration surface, merged over
//!   defaults
//! - [`StoreLogger`] - The middleware wrapper: an observably-identical
//!   dispatch path that records, formats, and forwards a structured trace
//!   of every transition it mediates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logger;
pub mod options;

pub use logger::StoreLogger;
pub use options::{LoggerOptions, PosterOptions};
