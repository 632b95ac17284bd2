mod common;

use celldom::element::{find_element, rows};
use celldom::Element;
use gridwise::annotate::{annotate, SizeTier, COL_ATTR, PROCESSED_CLASS, ROW_ATTR, SORT_BUTTON_CLASS};
use gridwise::{SortableColumns, TableConfig};

use common::{fruit_table, init_logger, mounted};

fn coords(table: &Element, id: &str) -> (Option<String>, Option<String>) {
    let cell = find_element(table, id).unwrap();
    (
        cell.get_data(ROW_ATTR).map(str::to_string),
        cell.get_data(COL_ATTR).map(str::to_string),
    )
}

// ============================================================================
// Coordinates
// ============================================================================

#[test]
fn test_cells_get_one_indexed_coordinates() {
    init_logger();
    let annotated = annotate(&fruit_table(), &SortableColumns::none());

    assert_eq!(coords(&annotated.table, "h-fruit"), (Some("1".into()), Some("1".into())));
    assert_eq!(coords(&annotated.table, "Apple-count"), (Some("3".into()), Some("2".into())));
    assert_eq!(coords(&annotated.table, "cherry-name"), (Some("4".into()), Some("1".into())));
}

#[test]
fn test_input_table_is_not_modified() {
    let table = fruit_table();
    let _ = annotate(&table, &"1".parse().unwrap());
    assert_eq!(coords(&table, "h-fruit"), (None, None));
    assert!(!find_element(&table, "h-fruit").unwrap().has_class(SORT_BUTTON_CLASS));
}

#[test]
fn test_reannotation_yields_identical_coordinates() {
    let sortable: SortableColumns = "1,2".parse().unwrap();
    let first = annotate(&fruit_table(), &sortable);
    let second = annotate(&first.table, &sortable);

    for row in rows(&first.table) {
        for cell in celldom::element::cells(row) {
            assert_eq!(coords(&first.table, &cell.id), coords(&second.table, &cell.id));
        }
    }
    assert_eq!(first.sort_index, second.sort_index);
    assert_eq!(second.sort_index.unwrap().records.len(), 3);
}

// ============================================================================
// Size Tiers
// ============================================================================

#[test]
fn test_size_tier_thresholds() {
    assert_eq!(SizeTier::classify(&"a".repeat(30)), SizeTier::Default);
    assert_eq!(SizeTier::classify(&"a".repeat(31)), SizeTier::Medium);
    assert_eq!(SizeTier::classify(&"a".repeat(75)), SizeTier::Medium);
    assert_eq!(SizeTier::classify(&"a".repeat(76)), SizeTier::Long);
    assert_eq!(SizeTier::Long.class(), Some("content--lg"));
    assert_eq!(SizeTier::Medium.class(), Some("content--md"));
    assert_eq!(SizeTier::Default.class(), None);
}

#[test]
fn test_size_classes_applied_and_refreshed() {
    let table = Element::table().child(
        Element::tr()
            .child(Element::td("x".repeat(80)).id("long"))
            .child(Element::td("x".repeat(40)).id("medium"))
            .child(Element::td("short").id("stale").class("content--lg")),
    );
    let annotated = annotate(&table, &SortableColumns::none());
    let class_of = |id: &str| find_element(&annotated.table, id).unwrap().classes.clone();

    assert_eq!(class_of("long"), vec!["content--lg".to_string()]);
    assert_eq!(class_of("medium"), vec!["content--md".to_string()]);
    assert!(class_of("stale").is_empty());
}

// ============================================================================
// Sort Records
// ============================================================================

#[test]
fn test_sorting_disabled_captures_nothing() {
    let annotated = annotate(&fruit_table(), &SortableColumns::none());
    assert!(annotated.sort_index.is_none());
    assert!(!find_element(&annotated.table, "h-fruit").unwrap().has_class(SORT_BUTTON_CLASS));
}

#[test]
fn test_records_cover_every_body_row() {
    let annotated = annotate(&fruit_table(), &"1".parse().unwrap());
    let index = annotated.sort_index.unwrap();

    assert_eq!(index.records.len(), 3);
    assert_eq!(index.lookup.len(), 4);
    assert_eq!(
        index.lookup.get(2),
        Some(&["Apple-name".to_string(), "Apple-count".to_string()][..])
    );

    let apple = &index.records[1];
    assert_eq!(apple.original_row_index, 2);
    assert_eq!(apple.key(1), Some("Apple"));
    // Only sortable columns are captured.
    assert_eq!(apple.key(2), None);
    let entry = &apple.entries[&1];
    assert_eq!((entry.initial_row, entry.initial_col), (2, 0));
}

#[test]
fn test_record_text_is_trimmed() {
    let table = Element::table()
        .child(Element::tr().child(Element::th("Name")))
        .child(Element::tr().child(Element::td("  padded \n")));
    let index = annotate(&table, &"1".parse().unwrap()).sort_index.unwrap();
    assert_eq!(index.records[0].key(1), Some("padded"));
}

#[test]
fn test_sortable_headers_become_buttons() {
    let annotated = annotate(&fruit_table(), &"2".parse().unwrap());
    let count = find_element(&annotated.table, "h-count").unwrap();
    let fruit = find_element(&annotated.table, "h-fruit").unwrap();

    assert!(count.has_class(SORT_BUTTON_CLASS));
    assert!(count.clickable);
    assert!(!fruit.has_class(SORT_BUTTON_CLASS));
    // Body cells in a sortable column are not buttons.
    assert!(!find_element(&annotated.table, "Apple-count").unwrap().has_class(SORT_BUTTON_CLASS));
}

// ============================================================================
// Engine Integration
// ============================================================================

#[test]
fn test_process_is_idempotent() {
    init_logger();
    let config = TableConfig::new().sortable_attribute("1").unwrap();
    let mut engine = mounted(config, fruit_table());

    assert!(engine.host().has_class(PROCESSED_CLASS));
    let before = engine.sort_index().cloned();
    assert!(!engine.process());
    assert_eq!(engine.sort_index().cloned(), before);
    assert_eq!(engine.sort_index().unwrap().records.len(), 3);
}

#[test]
fn test_mount_replaces_host_table_with_annotated_copy() {
    let engine = mounted(TableConfig::new(), fruit_table());
    let table = engine.table().unwrap();
    assert_eq!(table.id, "fruit");
    assert_eq!(coords(table, "banana-name"), (Some("2".into()), Some("1".into())));
}
