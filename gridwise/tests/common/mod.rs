#![allow(dead_code)]

use celldom::element::{cells, rows};
use celldom::Element;
use gridwise::document::Document;
use gridwise::{EnhancedTable, TableConfig};
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn row(name: &str, count: &str) -> Element {
    Element::tr()
        .id(format!("row-{name}"))
        .child(Element::td(name).id(format!("{name}-name")))
        .child(Element::td(count).id(format!("{name}-count")))
}

/// Header row in a `thead`, three body rows: banana/10, Apple/2, cherry/3.
pub fn fruit_table() -> Element {
    Element::table()
        .id("fruit")
        .child(
            Element::thead().id("fruit-head").child(
                Element::tr()
                    .id("header")
                    .child(Element::th("Fruit").id("h-fruit"))
                    .child(Element::th("Count").id("h-count")),
            ),
        )
        .child(
            Element::tbody()
                .id("fruit-body")
                .child(row("banana", "10"))
                .child(row("Apple", "2"))
                .child(row("cherry", "3")),
        )
}

/// Trimmed text of a 1-indexed column, header excluded.
pub fn column(table: &Element, col: usize) -> Vec<String> {
    rows(table)
        .iter()
        .skip(1)
        .filter_map(|r| cells(r).nth(col - 1))
        .map(|c| c.text_content().trim().to_string())
        .collect()
}

pub fn row_ids(table: &Element) -> Vec<String> {
    rows(table).iter().map(|r| r.id.clone()).collect()
}

pub fn engine(config: TableConfig, table: Element) -> EnhancedTable {
    let host = EnhancedTable::host_element().child(table);
    EnhancedTable::new(config, host, Document::new())
}

pub fn mounted(config: TableConfig, table: Element) -> EnhancedTable {
    let mut engine = engine(config, table);
    engine.mount().expect("fixture has a table");
    engine
}

/// Mounted behind a viewport narrower than the fruit table, so the open
/// affordance is showing. Mount events are drained.
pub fn overflowing(config: TableConfig) -> EnhancedTable {
    let mut engine = engine(config, fruit_table()).with_viewport(10, 24);
    engine.mount().expect("fixture has a table");
    engine.drain_events();
    engine
}
