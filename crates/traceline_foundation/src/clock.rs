//! Time formatting and title assembly utilities.

use std::time::Instant;

use chrono::{DateTime, Local, Timelike};

use crate::action::Action;

/// Formats a wall-clock timestamp as `@ HH:MM:SS.mmm`.
#[must_use]
pub fn format_time(time: &DateTime<Local>) -> String {
    format!(
        "@ {:02}:{:02}:{:02}.{:03}",
        time.hour(),
        time.minute(),
        time.second(),
        time.timestamp_subsec_millis()
    )
}

/// Returns the elapsed time since `started` in milliseconds.
#[must_use]
pub fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Assembles the display title shared by both sinks.
///
/// Shape: `action {formatted-time} {type} (in {took} ms)`, with the
/// timestamp and duration segments emptied when disabled.
#[must_use]
pub fn entry_title(
    action: &Action,
    started_time: &DateTime<Local>,
    took_ms: f64,
    timestamp: bool,
    duration: bool,
) -> String {
    let time_part = if timestamp {
        format_time(started_time)
    } else {
        String::new()
    };
    let took_part = if duration {
        format!("(in {took_ms:.2} ms)")
    } else {
        String::new()
    };
    format!("action {time_part} {} {took_part}", action.kind)
}
