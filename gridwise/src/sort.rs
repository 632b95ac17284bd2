//! Column sorting.
//!
//! Records are ordered with a stable, case-insensitive-for-words comparator,
//! then the body is rebuilt from the original cell elements (moved, not
//! copied) and swapped into the table in one replacement.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use celldom::element::{cells, find_element, rows};
use celldom::{Content, Element, Tag};
use regex::Regex;

use crate::annotate::{CellLookup, RowRecord, SortIndex};
use crate::config::SortableColumns;
use crate::error::TableError;

static LEADING_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]").expect("leading digit pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// Last sorted column and its direction; both unset until the first sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    last_column: Option<usize>,
    direction: Option<SortDirection>,
}

impl SortState {
    pub fn last_column(&self) -> Option<usize> {
        self.last_column
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Same column after an ascending sort flips to descending; anything
    /// else sorts ascending.
    pub fn next_direction(&self, column: usize) -> SortDirection {
        if self.last_column == Some(column) && self.direction == Some(SortDirection::Ascending) {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    fn record(&mut self, column: usize, direction: SortDirection) {
        self.last_column = Some(column);
        self.direction = Some(direction);
    }
}

/// Values that don't start with a digit are compared case-insensitively.
pub fn is_letters(value: &str) -> bool {
    !LEADING_DIGIT.is_match(value)
}

/// Ascending comparator for two sort keys.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    if is_letters(a) && is_letters(b) {
        a.to_uppercase().cmp(&b.to_uppercase())
    } else {
        a.cmp(b)
    }
}

/// Stable in-place ordering of records by `column`. Missing entries sort as
/// empty strings.
pub fn order_records(records: &mut [RowRecord], column: usize, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = compare_keys(a.key(column).unwrap_or(""), b.key(column).unwrap_or(""));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Toggle direction for `column`, reorder the records and rebuild the body.
/// On error neither the table nor the state is modified.
pub fn sort_table(
    state: &mut SortState,
    table: &mut Element,
    index: &mut SortIndex,
    sortable: &SortableColumns,
    column: usize,
) -> Result<SortDirection, TableError> {
    if !sortable.contains(column) {
        return Err(TableError::ColumnNotSortable { column });
    }

    let direction = state.next_direction(column);
    let mut ordered = index.records.clone();
    order_records(&mut ordered, column, direction);

    rebuild_body(table, &ordered, &index.lookup)?;

    index.records = ordered;
    state.record(column, direction);
    log::debug!("[sort] table={} column={} direction={}", table.id, column, direction);
    Ok(direction)
}

/// Replace the table body with one row per record, in record order.
///
/// The header row (first row of the table) stays first. Rows outside the
/// body section are moved into it. If the table has no `tbody`, one is
/// appended.
pub fn rebuild_body(
    table: &mut Element,
    records: &[RowRecord],
    lookup: &CellLookup,
) -> Result<(), TableError> {
    let header_id = validate(table, records, lookup)?;

    let mut harvested = HashMap::new();
    let mut header_row = None;
    let body_pos = table
        .child_elements()
        .iter()
        .position(|c| c.tag == Tag::TBody);

    let Some(children) = table.child_elements_mut() else {
        // No children means no rows; validation only passes with no records.
        table.push_child(Element::tbody());
        return Ok(());
    };

    let mut extras = Vec::new();
    if let Some(pos) = body_pos {
        let old_body = std::mem::replace(&mut children[pos], Element::tbody());
        if let Content::Children(body_children) = old_body.content {
            for child in body_children {
                if child.tag != Tag::Tr {
                    extras.push(child);
                } else if header_id.as_deref() == Some(child.id.as_str()) {
                    header_row = Some(child);
                } else {
                    harvest_row(child, &mut harvested);
                }
            }
        }
    }

    // Data rows living directly in the table or in other sections.
    let mut index = 0;
    while index < children.len() {
        let child = &mut children[index];
        if Some(index) == body_pos {
            index += 1;
            continue;
        }
        if child.tag == Tag::Tr {
            if header_id.as_deref() == Some(child.id.as_str()) {
                index += 1;
            } else {
                let row = children.remove(index);
                harvest_row(row, &mut harvested);
                continue;
            }
        } else if child.tag.is_section() {
            if let Some(section_rows) = child.child_elements_mut() {
                let (data_rows, kept): (Vec<Element>, Vec<Element>) =
                    std::mem::take(section_rows).into_iter().partition(|r| {
                        r.tag == Tag::Tr && header_id.as_deref() != Some(r.id.as_str())
                    });
                *section_rows = kept;
                for row in data_rows {
                    harvest_row(row, &mut harvested);
                }
            }
            index += 1;
        } else {
            index += 1;
        }
    }

    let mut new_body = Element::tbody();
    if let Some(header) = header_row {
        new_body.push_child(header);
    }
    for record in records {
        let mut row = Element::tr();
        let ids = lookup
            .get(record.original_row_index)
            .ok_or(TableError::MissingLookupEntry {
                row: record.original_row_index,
            })?;
        for id in ids {
            let cell = harvested
                .remove(id)
                .ok_or_else(|| TableError::MissingCell { id: id.clone() })?;
            row.push_child(cell);
        }
        new_body.push_child(row);
    }
    for extra in extras {
        new_body.push_child(extra);
    }

    match body_pos {
        Some(pos) => children[pos] = new_body,
        None => children.push(new_body),
    }
    Ok(())
}

fn harvest_row(row: Element, harvested: &mut HashMap<String, Element>) {
    if let Content::Children(row_children) = row.content {
        for cell in row_children.into_iter().filter(|c| c.tag.is_cell()) {
            harvested.insert(cell.id.clone(), cell);
        }
    }
}

/// Check the index covers the table exactly before anything is moved.
/// Returns the header row id.
fn validate(
    table: &Element,
    records: &[RowRecord],
    lookup: &CellLookup,
) -> Result<Option<String>, TableError> {
    let mut referenced = HashSet::new();
    for record in records {
        let row = record.original_row_index;
        let ids = lookup.get(row).ok_or_else(|| {
            log::error!("[sort] no cell lookup entry for row {row}");
            TableError::MissingLookupEntry { row }
        })?;
        for id in ids {
            if find_element(table, id).is_none() || !referenced.insert(id.as_str()) {
                log::error!("[sort] lookup references missing cell {id}");
                return Err(TableError::MissingCell { id: id.clone() });
            }
        }
    }

    let table_rows = rows(table);
    for row in table_rows.iter().skip(1) {
        if let Some(cell) = cells(row).find(|c| !referenced.contains(c.id.as_str())) {
            log::error!("[sort] cell {} is not covered by the sort index", cell.id);
            return Err(TableError::UnindexedCell {
                id: cell.id.clone(),
            });
        }
    }

    Ok(table_rows.first().map(|r| r.id.clone()))
}
