//! Structured printer and remote poster sinks for Traceline.
//!
//! This crate provides:
//! - [`Console`] - The diagnostic-channel capability with graceful
//!   degradation, plus stderr and in-memory implementations
//! - [`Printer`] - The human-facing grouped, colorized sink
//! - [`Poster`] - The machine-facing adapter forwarding sparse payloads to a
//!   caller-supplied [`LogPoster`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod console;
pub mod poster;
pub mod printer;

pub use console::{
    ChannelError, Color, ColorScheme, Console, ConsoleEvent, MemoryConsole, StderrConsole,
};
pub use poster::{LogPoster, PostPayload, Poster, PosterConfig};
pub use printer::{Collapse, Printer, PrinterConfig};
