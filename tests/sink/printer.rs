//! Integration tests for the structured printer.

use std::sync::Arc;

use serde_json::{Value, json};
use traceline_foundation::{Action, FacetLevel, FacetLevels, LevelSpec, Severity};
use traceline_sink::{Collapse, ConsoleEvent, MemoryConsole, Printer, PrinterConfig};

use crate::entry;

fn printer(config: PrinterConfig) -> (Printer, MemoryConsole) {
    let console = MemoryConsole::new();
    (Printer::new(config, Box::new(console.clone())), console)
}

// =============================================================================
// Flush Semantics
// =============================================================================

#[test]
fn flush_is_single_shot() {
    let (mut printer, console) = printer(PrinterConfig::new());
    let mut buffer = vec![entry("INC", None, json!(1), None)];

    printer.flush(&mut buffer);
    assert!(buffer.is_empty());
    let emitted = console.events().len();

    // Re-flushing the now-empty buffer produces no further output.
    printer.flush(&mut buffer);
    assert_eq!(console.events().len(), emitted);
}

#[test]
fn batched_buffer_produces_one_block_per_entry() {
    let (mut printer, console) = printer(PrinterConfig::new());
    let mut buffer = vec![
        entry("INC", None, json!(1), None),
        entry("DEC", Some(json!(1)), json!(0), None),
    ];

    printer.flush(&mut buffer);

    let groups = console.events_where(|e| matches!(e, ConsoleEvent::Group { .. }));
    let ends = console.events_where(|e| matches!(e, ConsoleEvent::GroupEnd));
    assert_eq!(groups.len(), 2);
    assert_eq!(ends.len(), 2);
}

#[test]
fn lookahead_takes_next_state_from_successor() {
    let (mut printer, console) = printer(PrinterConfig::new());
    // The successor's prior snapshot deliberately disagrees with the first
    // entry's own next state; the lookahead must prefer the successor.
    let mut buffer = vec![
        entry("INC", None, json!(1), None),
        entry("DEC", Some(json!(41)), json!(40), None),
    ];

    printer.flush(&mut buffer);

    let next_states = console.events_where(|e| {
        matches!(e, ConsoleEvent::Emit { label, .. } if label == "next state")
    });
    assert!(matches!(
        &next_states[0],
        ConsoleEvent::Emit { value, .. } if *value == json!(41)
    ));
    assert!(matches!(
        &next_states[1],
        ConsoleEvent::Emit { value, .. } if *value == json!(40)
    ));
}

// =============================================================================
// Facet Emission
// =============================================================================

#[test]
fn facets_emit_in_order() {
    let (mut printer, console) = printer(PrinterConfig::new());
    let mut buffer = vec![entry(
        "INC",
        Some(json!(0)),
        json!(1),
        Some(json!("boom")),
    )];

    printer.flush(&mut buffer);

    let labels: Vec<String> = console
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ConsoleEvent::Emit { label, .. } => Some(label),
            _ => None,
        })
        .collect();
    assert_eq!(labels, ["prev state", "action", "error", "next state"]);
}

#[test]
fn error_facet_absent_without_error() {
    // Computed error level, fixed log elsewhere.
    let level = LevelSpec::PerFacet(
        FacetLevels::new()
            .with_prev_state(FacetLevel::Fixed(Some(Severity::Log)))
            .with_action(FacetLevel::Fixed(Some(Severity::Log)))
            .with_error(FacetLevel::PerValue(Arc::new(|_: &[Value]| {
                Some(Severity::Error)
            })))
            .with_next_state(FacetLevel::Fixed(Some(Severity::Log))),
    );

    let (mut printer, console) = printer(PrinterConfig::new().with_level(level.clone()));
    let mut buffer = vec![entry("INC", Some(json!(0)), json!(1), None)];
    printer.flush(&mut buffer);

    let errors = console
        .events_where(|e| matches!(e, ConsoleEvent::Emit { label, .. } if label == "error"));
    assert!(errors.is_empty());

    // With an error attached, the facet emits at severity `error`.
    let (mut printer, console) = self::printer(PrinterConfig::new().with_level(level));
    let mut buffer = vec![entry("INC", Some(json!(0)), json!(1), Some(json!("boom")))];
    printer.flush(&mut buffer);

    let errors = console
        .events_where(|e| matches!(e, ConsoleEvent::Emit { label, .. } if label == "error"));
    assert_eq!(
        errors,
        vec![ConsoleEvent::Emit {
            severity: Severity::Error,
            label: "error".into(),
            value: json!("boom"),
        }]
    );
}

#[test]
fn per_action_level_silences_whole_entries() {
    let level = LevelSpec::PerAction(Arc::new(|action: &Action| {
        (action.kind != "NOISY").then_some(Severity::Log)
    }));
    let (mut printer, console) = printer(PrinterConfig::new().with_level(level));

    let mut buffer = vec![entry("NOISY", None, json!(1), None)];
    printer.flush(&mut buffer);

    // The group still opens; every facet is suppressed.
    let emits = console.events_where(|e| matches!(e, ConsoleEvent::Emit { .. }));
    assert!(emits.is_empty());
    assert_eq!(
        console.events_where(|e| matches!(e, ConsoleEvent::Group { .. })).len(),
        1
    );
}

// =============================================================================
// Collapse and Degradation
// =============================================================================

#[test]
fn collapse_predicate_drives_group_state() {
    let collapsed = Collapse::When(Arc::new(|next: &Value, action: &Action| {
        action.kind == "INC" && *next == json!(1)
    }));
    let (mut printer, console) = printer(PrinterConfig::new().with_collapsed(collapsed));

    let mut buffer = vec![entry("INC", None, json!(1), None)];
    printer.flush(&mut buffer);
    let mut buffer = vec![entry("DEC", Some(json!(1)), json!(0), None)];
    printer.flush(&mut buffer);

    let groups: Vec<bool> = console
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ConsoleEvent::Group { collapsed, .. } => Some(collapsed),
            _ => None,
        })
        .collect();
    assert_eq!(groups, [true, false]);
}

#[test]
fn grouping_failure_never_loses_facets() {
    let console = MemoryConsole::without_grouping();
    let mut printer = Printer::new(PrinterConfig::new(), Box::new(console.clone()));
    let mut buffer = vec![entry("INC", Some(json!(0)), json!(1), None)];

    printer.flush(&mut buffer);

    // Degraded path: flat title line, all three facets, flat separator.
    let lines = console.events_where(|e| matches!(e, ConsoleEvent::Line(_)));
    assert_eq!(lines.len(), 2);
    let emits = console.events_where(|e| matches!(e, ConsoleEvent::Emit { .. }));
    assert_eq!(emits.len(), 3);
    assert!(buffer.is_empty());
}
