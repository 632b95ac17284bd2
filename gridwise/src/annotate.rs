//! Coordinate annotation.
//!
//! A single pass over a detached copy of the table that stamps every cell
//! with its 1-indexed `row`/`col` data attributes and a content-size class,
//! and, when sorting is enabled, captures the row records and the cell
//! lookup the sort engine rebuilds the body from.

use std::collections::BTreeMap;

use celldom::element::for_each_row_mut;
use celldom::text::char_count;
use celldom::Element;

use crate::config::SortableColumns;

/// Marker class on the host once its table has been annotated.
pub const PROCESSED_CLASS: &str = "table--processed";
/// Header cells that activate sorting.
pub const SORT_BUTTON_CLASS: &str = "sort-button";
pub const ROW_ATTR: &str = "row";
pub const COL_ATTR: &str = "col";

/// Presentational classification of cell content length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    Default,
    /// More than 30 characters.
    Medium,
    /// More than 75 characters.
    Long,
}

impl SizeTier {
    pub fn classify(text: &str) -> Self {
        match char_count(text) {
            n if n > 75 => Self::Long,
            n if n > 30 => Self::Medium,
            _ => Self::Default,
        }
    }

    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Medium => Some("content--md"),
            Self::Long => Some("content--lg"),
        }
    }
}

/// One sortable cell value. Positions are 0-based, as captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub initial_col: usize,
    pub initial_row: usize,
    /// Trimmed text content.
    pub text: String,
}

/// Sortable snapshot of one body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    /// 0-based index of the row in the annotated table; key into `CellLookup`.
    pub original_row_index: usize,
    /// Entries for sortable columns only, keyed by 1-indexed column.
    pub entries: BTreeMap<usize, RecordEntry>,
}

impl RowRecord {
    pub fn key(&self, column: usize) -> Option<&str> {
        self.entries.get(&column).map(|e| e.text.as_str())
    }
}

/// Original row index → ids of that row's cells, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellLookup {
    rows: BTreeMap<usize, Vec<String>>,
}

impl CellLookup {
    pub fn insert(&mut self, row: usize, cell_ids: Vec<String>) {
        self.rows.insert(row, cell_ids);
    }

    pub fn get(&self, row: usize) -> Option<&[String]> {
        self.rows.get(&row).map(Vec::as_slice)
    }

    pub fn remove(&mut self, row: usize) -> Option<Vec<String>> {
        self.rows.remove(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the sort engine needs, produced together so it is never
/// partially updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortIndex {
    pub records: Vec<RowRecord>,
    pub lookup: CellLookup,
}

#[derive(Debug, Clone)]
pub struct AnnotatedTable {
    pub table: Element,
    /// None when sorting is disabled.
    pub sort_index: Option<SortIndex>,
}

/// Annotate a deep copy of `table`. The input is left untouched.
pub fn annotate(table: &Element, sortable: &SortableColumns) -> AnnotatedTable {
    let mut copy = table.clone();
    let sorting = sortable.is_enabled();
    let mut index = SortIndex::default();
    let mut row_count = 0;

    for_each_row_mut(&mut copy, |row_index, row| {
        row_count += 1;
        let mut entries = BTreeMap::new();
        let mut cell_ids = Vec::new();

        let cells = row
            .child_elements_mut()
            .into_iter()
            .flatten()
            .filter(|c| c.tag.is_cell());

        for (col_index, cell) in cells.enumerate() {
            let column = col_index + 1;
            cell.set_data(ROW_ATTR, (row_index + 1).to_string());
            cell.set_data(COL_ATTR, column.to_string());

            let text = cell.text_content();
            for tier in [SizeTier::Medium, SizeTier::Long] {
                if let Some(class) = tier.class() {
                    cell.remove_class(class);
                }
            }
            if let Some(class) = SizeTier::classify(&text).class() {
                cell.add_class(class);
            }

            if !sorting {
                continue;
            }

            cell_ids.push(cell.id.clone());
            if !sortable.contains(column) {
                continue;
            }
            if row_index == 0 {
                cell.add_class(SORT_BUTTON_CLASS);
                cell.clickable = true;
            } else {
                entries.insert(
                    column,
                    RecordEntry {
                        initial_col: col_index,
                        initial_row: row_index,
                        text: text.trim().to_string(),
                    },
                );
            }
        }

        if sorting {
            index.lookup.insert(row_index, cell_ids);
            if row_index != 0 {
                index.records.push(RowRecord {
                    original_row_index: row_index,
                    entries,
                });
            }
        }
    });

    log::debug!(
        "[annotate] table={} rows={} records={}",
        copy.id,
        row_count,
        index.records.len()
    );

    AnnotatedTable {
        table: copy,
        sort_index: sorting.then_some(index),
    }
}
