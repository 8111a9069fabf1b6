//! Integration tests for per-sink filter gating and poster attachment.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};
use traceline_foundation::{Action, Error, FilterSpec, Result};
use traceline_middleware::{LoggerOptions, PosterOptions, StoreLogger};
use traceline_sink::{ConsoleEvent, LogPoster, MemoryConsole, PostPayload};

fn counter(state: &Value, action: &Action) -> Result<Value> {
    match action.kind.as_str() {
        "INC" => Ok(json!(state.as_i64().unwrap_or(0) + 1)),
        _ => Ok(state.clone()),
    }
}

type Counter = fn(&Value, &Action) -> Result<Value>;

#[derive(Clone, Default)]
struct CollectingPoster {
    posted: Rc<RefCell<Vec<PostPayload>>>,
}

impl CollectingPoster {
    fn count(&self) -> usize {
        self.posted.borrow().len()
    }
}

impl LogPoster for CollectingPoster {
    fn post_log(&mut self, payload: &PostPayload) -> Result<()> {
        self.posted.borrow_mut().push(payload.clone());
        Ok(())
    }
}

struct RefusingPoster;

impl LogPoster for RefusingPoster {
    fn post_log(&mut self, _payload: &PostPayload) -> Result<()> {
        Err(Error::delivery("remote unavailable"))
    }
}

// =============================================================================
// Whitelist Gating of Both Sinks
// =============================================================================

#[test]
fn whitelisted_action_reaches_both_sinks_exactly_once() {
    let filter = FilterSpec::new().with_whitelist(["INC"]);
    let options = LoggerOptions::new()
        .with_filter(filter.clone())
        .with_poster_options(PosterOptions::new().with_filter(filter));
    let console = MemoryConsole::new();
    let sink = CollectingPoster::default();
    let mut logger = StoreLogger::with_console(counter as Counter, options, Box::new(console.clone()))
        .with_poster(Box::new(sink.clone()));

    logger.dispatch(&json!(0), &Action::new("OTHER")).unwrap();
    assert!(console.is_empty());
    assert_eq!(sink.count(), 0);

    logger.dispatch(&json!(0), &Action::new("INC")).unwrap();
    let groups = console.events_where(|e| matches!(e, ConsoleEvent::Group { .. }));
    assert_eq!(groups.len(), 1);
    assert_eq!(sink.count(), 1);
}

#[test]
fn sinks_are_gated_independently() {
    // Printer excludes INC; poster excludes nothing.
    let options = LoggerOptions::new()
        .with_filter(FilterSpec::new().with_blacklist(["INC"]))
        .with_poster_options(PosterOptions::new());
    let console = MemoryConsole::new();
    let sink = CollectingPoster::default();
    let mut logger = StoreLogger::with_console(counter as Counter, options, Box::new(console.clone()))
        .with_poster(Box::new(sink.clone()));

    logger.dispatch(&json!(0), &Action::new("INC")).unwrap();

    assert!(console.is_empty());
    assert_eq!(sink.count(), 1);
}

#[test]
fn without_attached_poster_nothing_is_forwarded() {
    let console = MemoryConsole::new();
    let mut logger = StoreLogger::with_console(
        counter as Counter,
        LoggerOptions::default(),
        Box::new(console.clone()),
    );

    logger.dispatch(&json!(0), &Action::new("INC")).unwrap();

    // The printer still runs; there is simply no poster to call.
    assert!(!console.is_empty());
}

// =============================================================================
// Poster Failure Propagation
// =============================================================================

#[test]
fn poster_failure_surfaces_from_dispatch() {
    let console = MemoryConsole::new();
    let mut logger = StoreLogger::with_console(
        counter as Counter,
        LoggerOptions::default(),
        Box::new(console.clone()),
    )
    .with_poster(Box::new(RefusingPoster));

    let err = logger.dispatch(&json!(0), &Action::new("INC")).unwrap_err();

    assert!(matches!(err, Error::Delivery(_)));
    // The printer had already flushed before the poster failed.
    assert!(!console.is_empty());
    // The transition itself was recorded.
    assert_eq!(logger.last_entry().unwrap().next_state, json!(1));
}

#[test]
fn filtered_out_actions_never_touch_a_failing_poster() {
    let options = LoggerOptions::new()
        .with_poster_options(PosterOptions::new().with_filter(
            FilterSpec::new().with_whitelist(["NEVER"]),
        ));
    let mut logger = StoreLogger::with_options(counter as Counter, options)
        .with_poster(Box::new(RefusingPoster));

    // Would fail if the poster were invoked; the filter spares it.
    assert!(logger.dispatch(&json!(0), &Action::new("INC")).is_ok());
}
