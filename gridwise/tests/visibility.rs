mod common;

use std::time::{Duration, Instant};

use celldom::{Event, Size, TimerQueue};
use gridwise::events::{EventResult, TableEvent};
use gridwise::listeners::{ListenerKind, ListenerTarget};
use gridwise::visibility::{is_overflowing, Debouncer};
use gridwise::{EnhancedTable, TableConfig};

use common::{engine, fruit_table, init_logger};

const DEBOUNCE: Duration = Duration::from_millis(250);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn resize(engine: &mut EnhancedTable, width: u16, now: Instant) -> EventResult {
    engine
        .handle_event(&mut Event::Resize { width, height: 24 }, now)
        .unwrap()
}

fn overflow_checks(events: &[TableEvent]) -> Vec<bool> {
    events
        .iter()
        .filter_map(|event| match event {
            TableEvent::OverflowChecked { overflowing } => Some(*overflowing),
            _ => None,
        })
        .collect()
}

/// A 150-column table behind a 100-column viewport.
fn wide_engine(config: TableConfig) -> EnhancedTable {
    let mut engine = engine(config, fruit_table().width(Size::Fixed(150))).with_viewport(100, 24);
    engine.mount().unwrap();
    engine
}

// ============================================================================
// Debouncer
// ============================================================================

#[test]
fn test_burst_fires_once_from_last_trigger() {
    let start = Instant::now();
    let mut timers = TimerQueue::new();
    let mut debouncer = Debouncer::new(DEBOUNCE);

    let mut ids = Vec::new();
    for offset in [0, 50, 100, 150, 200] {
        ids.push(debouncer.trigger(&mut timers, start + ms(offset), "check"));
    }
    assert_eq!(timers.len(), 1);
    assert_eq!(debouncer.pending(), ids.last().copied());

    assert_eq!(timers.pop_due(start + ms(449)), None);
    let (fired, _) = timers.pop_due(start + ms(450)).unwrap();
    assert!(!debouncer.take_fired(ids[0]));
    assert!(debouncer.take_fired(fired));
    assert_eq!(debouncer.pending(), None);
}

#[test]
fn test_cancel_clears_pending() {
    let start = Instant::now();
    let mut timers = TimerQueue::new();
    let mut debouncer = Debouncer::new(DEBOUNCE);
    debouncer.trigger(&mut timers, start, ());
    debouncer.cancel(&mut timers);

    assert!(timers.is_empty());
    assert_eq!(debouncer.pending(), None);
}

#[test]
fn test_overflow_is_strict() {
    assert!(is_overflowing(150, 100));
    assert!(!is_overflowing(100, 100));
    assert!(!is_overflowing(80, 100));
}

// ============================================================================
// Overflow Gate
// ============================================================================

#[test]
fn test_affordance_follows_wrapper_width() {
    init_logger();
    let start = Instant::now();
    let mut engine = wide_engine(TableConfig::new());

    assert!(engine.open_affordance_visible());
    assert_eq!(overflow_checks(&engine.drain_events()), vec![true]);

    assert_eq!(resize(&mut engine, 200, start), EventResult::Consumed);
    // Not re-evaluated until the quiet period ends.
    engine.tick(start + ms(249));
    assert!(engine.open_affordance_visible());

    engine.tick(start + DEBOUNCE);
    assert!(!engine.open_affordance_visible());
    assert_eq!(overflow_checks(&engine.drain_events()), vec![false]);
}

#[test]
fn test_resize_burst_yields_one_check() {
    let start = Instant::now();
    let mut engine = wide_engine(TableConfig::new());
    engine.drain_events();

    for (i, width) in [120u16, 140, 160, 180, 200].into_iter().enumerate() {
        resize(&mut engine, width, start + ms(i as u64 * 100));
    }
    assert_eq!(engine.pending_timers(), 1);

    // Last resize at 400ms; the check is due at 650ms.
    assert_eq!(engine.tick(start + ms(649)), 0);
    assert_eq!(engine.tick(start + ms(650)), 1);
    assert_eq!(overflow_checks(&engine.drain_events()), vec![false]);
    assert_eq!(engine.viewport().width, 200);
}

#[test]
fn test_narrow_resize_reveals_affordance() {
    let start = Instant::now();
    let mut engine = engine(TableConfig::new(), fruit_table());
    engine.mount().unwrap();
    assert!(!engine.open_affordance_visible());

    resize(&mut engine, 10, start);
    engine.tick(start + DEBOUNCE);
    assert!(engine.open_affordance_visible());
}

#[test]
fn test_custom_debounce() {
    let start = Instant::now();
    let mut engine = wide_engine(TableConfig::new().resize_debounce(ms(50)));
    resize(&mut engine, 200, start);
    engine.tick(start + ms(50));
    assert!(!engine.open_affordance_visible());
}

#[test]
fn test_gate_inactive_without_fullscreen() {
    let start = Instant::now();
    let mut engine = wide_engine(TableConfig::new().fullscreen(false));

    assert!(!engine.open_affordance_visible());
    assert!(!engine
        .listeners()
        .is_listening(ListenerTarget::Window, ListenerKind::Resize));
    assert_eq!(resize(&mut engine, 50, start), EventResult::Ignored);
    assert_eq!(engine.pending_timers(), 0);
}
