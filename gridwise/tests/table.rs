mod common;

use std::time::{Duration, Instant};

use celldom::{Element, Event, Size};
use gridwise::annotate::PROCESSED_CLASS;
use gridwise::document::Document;
use gridwise::events::{EventResult, TableEvent};
use gridwise::fullscreen::DOCUMENT_FULLSCREEN_CLASS;
use gridwise::hover::CellCoord;
use gridwise::markup::OPEN_BUTTON_ID;
use gridwise::sort::SortDirection;
use gridwise::{EnhancedTable, TableConfig, TableError};

use common::{column, engine, fruit_table, init_logger, mounted};

fn sortable(attribute: &str) -> TableConfig {
    TableConfig::new().sortable_attribute(attribute).unwrap()
}

fn send(engine: &mut EnhancedTable, mut event: Event, now: Instant) -> EventResult {
    engine.handle_event(&mut event, now).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_anonymous_host_gets_generated_id() {
    let engine = engine(TableConfig::new(), fruit_table());
    let uid = engine.uid().to_string();

    assert_eq!(uid.len(), 7);
    assert!(uid.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(engine.host().id, format!("table--{uid}"));
    assert_eq!(engine.host().get_data("id"), Some(uid.as_str()));
}

#[test]
fn test_named_host_keeps_its_id() {
    let host = Element::div().id("prices").child(fruit_table());
    let engine = EnhancedTable::new(sortable("2,1"), host, Document::new());
    assert_eq!(engine.host().id, "prices");
    assert_eq!(engine.host().get_data("sortable"), Some("1,2"));
}

#[test]
fn test_mount_without_table_fails() {
    init_logger();
    let mut engine = EnhancedTable::new(TableConfig::new(), EnhancedTable::host_element(), Document::new());
    assert_eq!(engine.mount(), Err(TableError::NoTable));
    assert!(engine.table().is_none());
}

#[test]
fn test_supplied_table_is_managed() {
    let mut engine = EnhancedTable::new(TableConfig::new(), EnhancedTable::host_element(), Document::new())
        .with_table(fruit_table());
    engine.mount().unwrap();

    assert_eq!(engine.table().map(|t| t.id.as_str()), Some("fruit"));
    assert!(engine.host().has_class(PROCESSED_CLASS));
}

#[test]
fn test_supplied_table_replaces_adopted_one() {
    let replacement = Element::table()
        .id("replacement")
        .child(Element::tr().child(Element::th("Only")));
    let engine = engine(TableConfig::new(), fruit_table()).with_table(replacement);

    assert_eq!(engine.table().map(|t| t.id.as_str()), Some("replacement"));
    assert_eq!(engine.host().child_elements().len(), 1);
}

#[test]
fn test_events_before_mount_are_ignored() {
    let mut engine = engine(sortable("1"), fruit_table());
    assert_eq!(send(&mut engine, Event::click("h-fruit"), Instant::now()), EventResult::Ignored);
    assert_eq!(engine.sort_state().last_column(), None);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_header_click_sorts() {
    init_logger();
    let now = Instant::now();
    let mut engine = mounted(sortable("1"), fruit_table());
    engine.drain_events();

    assert_eq!(send(&mut engine, Event::click("h-fruit"), now), EventResult::Consumed);
    assert_eq!(column(engine.table().unwrap(), 1), vec!["Apple", "banana", "cherry"]);
    assert_eq!(
        engine.drain_events(),
        vec![TableEvent::Sorted {
            column: 1,
            direction: SortDirection::Ascending
        }]
    );

    send(&mut engine, Event::click("h-fruit"), now);
    assert_eq!(column(engine.table().unwrap(), 1), vec!["cherry", "banana", "Apple"]);
    assert_eq!(engine.sort_state().direction(), Some(SortDirection::Descending));
}

#[test]
fn test_clicks_outside_sort_buttons_are_ignored() {
    let now = Instant::now();
    let mut engine = mounted(sortable("1"), fruit_table());

    assert_eq!(send(&mut engine, Event::click("h-count"), now), EventResult::Ignored);
    assert_eq!(send(&mut engine, Event::click("Apple-name"), now), EventResult::Ignored);
    assert_eq!(engine.sort_state().last_column(), None);
}

#[test]
fn test_sorting_disabled() {
    let now = Instant::now();
    let mut engine = mounted(TableConfig::new(), fruit_table());

    assert_eq!(send(&mut engine, Event::click("h-fruit"), now), EventResult::Ignored);
    assert_eq!(engine.sort(1), Err(TableError::NotAnnotated));
}

#[test]
fn test_sort_rejects_unlisted_column() {
    let mut engine = mounted(sortable("1"), fruit_table());
    assert_eq!(engine.sort(2), Err(TableError::ColumnNotSortable { column: 2 }));
}

#[test]
fn test_hover_after_sort_uses_original_coordinates() {
    let now = Instant::now();
    let mut engine = mounted(sortable("1"), fruit_table());
    engine.sort(1).unwrap();

    send(&mut engine, Event::pointer_over("Apple-name"), now);
    assert_eq!(engine.highlighted(), Some(CellCoord::new(3, 1)));
}

// ============================================================================
// Positional Events
// ============================================================================

#[test]
fn test_pointer_position_resolves_cell() {
    let now = Instant::now();
    let mut engine = mounted(TableConfig::new(), fruit_table());

    // Column widths are 8 and 7; body rows start one line below the header.
    let moved = Event::PointerMove { target: None, x: 9, y: 2 };
    assert_eq!(send(&mut engine, moved, now), EventResult::Consumed);
    assert_eq!(engine.highlighted(), Some(CellCoord::new(3, 2)));
}

#[test]
fn test_click_position_on_header_sorts() {
    let now = Instant::now();
    let mut engine = mounted(sortable("1"), fruit_table());

    let click = Event::Click { target: None, x: 1, y: 0 };
    assert_eq!(send(&mut engine, click, now), EventResult::Consumed);
    assert_eq!(engine.sort_state().last_column(), Some(1));
}

#[test]
fn test_click_positions_on_markup_buttons() {
    let now = Instant::now();
    let mut engine = engine(TableConfig::new(), fruit_table().width(Size::Fixed(150))).with_viewport(100, 24);
    engine.mount().unwrap();
    assert!(engine.open_affordance_visible());

    let open = Event::Click { target: None, x: 0, y: 0 };
    assert_eq!(send(&mut engine, open, now), EventResult::Consumed);
    assert!(engine.is_fullscreen());

    // Open button on line 0, the four table rows below it, then close.
    let layout = engine.layout();
    assert_eq!(layout[OPEN_BUTTON_ID].y, 0);
    let close = Event::Click { target: None, x: 0, y: 5 };
    assert_eq!(send(&mut engine, close, now), EventResult::Consumed);
    assert!(!engine.is_fullscreen());
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_teardown_releases_everything() {
    init_logger();
    let start = Instant::now();
    let mut engine = mounted(sortable("1"), fruit_table());

    engine.open_fullscreen();
    send(&mut engine, Event::pointer_over("Apple-name"), start);
    send(&mut engine, Event::Resize { width: 90, height: 30 }, start);
    assert_eq!(engine.listeners().len(), 4);
    assert_eq!(engine.pending_timers(), 2);

    engine.teardown();

    assert!(engine.listeners().is_empty());
    assert_eq!(engine.pending_timers(), 0);
    assert_eq!(engine.next_deadline(), None);
    assert!(!engine.is_fullscreen());
    assert!(!engine.document().has_class(DOCUMENT_FULLSCREEN_CLASS));
    assert!(engine.hover_rules().is_empty());
    assert!(!engine.is_mounted());

    // Nothing fires later and events are no longer handled.
    assert_eq!(engine.tick(start + Duration::from_secs(5)), 0);
    assert_eq!(
        send(&mut engine, Event::pointer_over("Apple-name"), start),
        EventResult::Ignored
    );
}
