//! Integration tests for trace entries and title assembly.

use std::time::Instant;

use chrono::{Local, TimeZone, Timelike};
use serde_json::json;
use traceline_foundation::clock::{entry_title, format_time};
use traceline_foundation::{Action, EMPTY_STATE, TraceEntry};

#[test]
fn prev_state_sentinel_on_first_transition() {
    let entry = TraceEntry {
        started: Instant::now(),
        started_time: Local::now(),
        action: Action::new("INC"),
        prev_state: None,
        took_ms: 1.0,
        next_state: json!(1),
        error: None,
    };

    assert_eq!(entry.prev_state_or_empty(), json!(EMPTY_STATE));
}

#[test]
fn formatted_time_is_padded_to_millis() {
    let time = Local
        .with_ymd_and_hms(2024, 11, 2, 0, 0, 7)
        .unwrap()
        .with_nanosecond(5_000_000)
        .unwrap();

    assert_eq!(format_time(&time), "@ 00:00:07.005");
}

#[test]
fn title_carries_type_time_and_duration() {
    let time = Local
        .with_ymd_and_hms(2024, 11, 2, 14, 30, 0)
        .unwrap()
        .with_nanosecond(0)
        .unwrap();
    let title = entry_title(&Action::new("ADD_TODO"), &time, 12.5, true, true);

    assert_eq!(title, "action @ 14:30:00.000 ADD_TODO (in 12.50 ms)");
}

#[test]
fn title_without_timestamp_keeps_duration() {
    let time = Local::now();
    let title = entry_title(&Action::new("INC"), &time, 0.5, false, true);

    assert_eq!(title, "action  INC (in 0.50 ms)");
}
