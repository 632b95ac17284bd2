//! Row/column hover highlighting.
//!
//! Instead of restyling every cell in the hovered row and column, the engine
//! keeps one `style` element per table and swaps three attribute-selector
//! rules (column, row, intersection) in and out. A recurring poll notices
//! when the pointer has left the highlighted cell.

use std::fmt;
use std::time::{Duration, Instant};

use celldom::element::{closest, contains, find_element, find_element_mut};
use celldom::{Color, Element, Rgb, Selector, StyleRule, StyleSheet, TimerId, TimerQueue};

use crate::annotate::{COL_ATTR, ROW_ATTR};
use crate::config::HighlightColors;
use crate::table::TimerTask;

pub const COLUMN_PROPERTY: &str = "--table--hoveredCol--Background";
pub const ROW_PROPERTY: &str = "--table--hoveredRow--Background";
pub const INTERSECTION_PROPERTY: &str = "--table--hoveredIntersection--Background";

/// Rules in a complete highlight set.
pub const RULE_COUNT: usize = 3;

/// 1-indexed cell coordinate as stamped by the annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Read the coordinate attributes of a cell. None if either is missing
    /// or not a number.
    pub fn of(cell: &Element) -> Option<Self> {
        let row = cell.get_data(ROW_ATTR)?.parse().ok()?;
        let col = cell.get_data(COL_ATTR)?.parse().ok()?;
        Some(Self { row, col })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn background(property: &str, fallback: Rgb) -> String {
    Color::Var {
        name: property.to_string(),
        fallback: Some(fallback),
    }
    .to_css()
}

/// The column, row and intersection rules for `coord`, scoped to `scope`.
pub fn highlight_rules(scope: &str, coord: CellCoord, colors: &HighlightColors) -> [StyleRule; RULE_COUNT] {
    let row = coord.row.to_string();
    let col = coord.col.to_string();
    [
        StyleRule::new(Selector::new().scoped(scope).data(COL_ATTR, col.clone()))
            .declare("background", background(COLUMN_PROPERTY, colors.column)),
        StyleRule::new(Selector::new().scoped(scope).data(ROW_ATTR, row.clone()))
            .declare("background", background(ROW_PROPERTY, colors.row)),
        StyleRule::new(Selector::new().scoped(scope).data(COL_ATTR, col).data(ROW_ATTR, row))
            .declare("background", background(INTERSECTION_PROPERTY, colors.intersection)),
    ]
}

/// Per-table hover state plus the settings it was created with.
#[derive(Debug)]
pub struct HoverEngine {
    /// Id of the element the rules are scoped to (the host).
    scope_id: String,
    /// Id of the lazily created `style` element.
    style_id: String,
    colors: HighlightColors,
    poll_interval: Duration,

    coordinates: Option<CellCoord>,
    cell_id: Option<String>,
    poll: Option<TimerId>,
}

impl HoverEngine {
    pub fn new(scope_id: impl Into<String>, uid: &str, colors: HighlightColors, poll_interval: Duration) -> Self {
        Self {
            scope_id: scope_id.into(),
            style_id: format!("hoverStyles--{uid}"),
            colors,
            poll_interval,
            coordinates: None,
            cell_id: None,
            poll: None,
        }
    }

    pub fn coordinates(&self) -> Option<CellCoord> {
        self.coordinates
    }

    /// Id of the highlighted cell element.
    pub fn highlighted_cell(&self) -> Option<&str> {
        self.cell_id.as_deref()
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    pub fn poll(&self) -> Option<TimerId> {
        self.poll
    }

    /// Rules currently installed under `host`.
    pub fn rules<'a>(&self, host: &'a Element) -> &'a [StyleRule] {
        find_element(host, &self.style_id)
            .and_then(Element::sheet)
            .map(StyleSheet::rules)
            .unwrap_or(&[])
    }

    /// Pointer entered or moved over `target`. Returns the new coordinate if
    /// the highlight changed.
    pub fn on_pointer(
        &mut self,
        host: &mut Element,
        table_id: &str,
        target: &str,
        timers: &mut TimerQueue<TimerTask>,
        now: Instant,
    ) -> Option<CellCoord> {
        let table = find_element(host, table_id)?;
        let Some(cell) = closest(table, target, |el| el.tag.is_cell()) else {
            log::trace!("[hover] target={target} is not inside a cell");
            return None;
        };
        let Some(coord) = CellCoord::of(cell) else {
            log::trace!("[hover] cell={} has no coordinates", cell.id);
            return None;
        };
        if self.coordinates == Some(coord) {
            return None;
        }
        let cell_id = cell.id.clone();

        let rules = highlight_rules(&self.scope_id, coord, &self.colors);
        let Some(sheet) = self.sheet_mut(host) else {
            log::warn!("[hover] style container {} unavailable", self.style_id);
            return None;
        };

        if let Some(poll) = self.poll.take() {
            timers.clear(poll);
        }
        sheet.clear();
        for (index, rule) in rules.into_iter().enumerate() {
            if let Err(err) = sheet.insert_rule(rule, index) {
                log::warn!("[hover] {err}");
            }
        }

        self.coordinates = Some(coord);
        self.poll = Some(timers.set_interval(
            now,
            self.poll_interval,
            TimerTask::HoverPoll {
                cell_id: cell_id.clone(),
            },
        ));
        self.cell_id = Some(cell_id);
        log::debug!("[hover] highlight {coord}");
        Some(coord)
    }

    /// Poll tick: clear the highlight if `cell_id` no longer has the hover
    /// pseudo-state. `hovered` is the element currently under the pointer.
    /// Returns true if the highlight was cleared.
    pub fn check(
        &mut self,
        host: &mut Element,
        timer: TimerId,
        cell_id: &str,
        hovered: Option<&str>,
        timers: &mut TimerQueue<TimerTask>,
    ) -> bool {
        if self.poll != Some(timer) {
            // Superseded poll that fired in the same tick.
            return false;
        }

        let still_hovered = match (find_element(host, cell_id), hovered) {
            (Some(cell), Some(hovered)) => contains(cell, hovered),
            _ => false,
        };
        if still_hovered {
            return false;
        }

        self.clear(host, timers);
        true
    }

    /// Remove the rules, forget the coordinate and stop polling.
    pub fn clear(&mut self, host: &mut Element, timers: &mut TimerQueue<TimerTask>) {
        if let Some(sheet) = find_element_mut(host, &self.style_id).and_then(Element::sheet_mut) {
            sheet.clear();
        }
        if let Some(poll) = self.poll.take() {
            timers.clear(poll);
        }
        self.coordinates = None;
        self.cell_id = None;
        log::debug!("[hover] cleared");
    }

    /// The hover sheet, creating its container on first use.
    fn sheet_mut<'a>(&self, host: &'a mut Element) -> Option<&'a mut StyleSheet> {
        if find_element(host, &self.style_id).and_then(Element::sheet).is_none() {
            host.push_child(Element::style_sheet().id(self.style_id.clone()));
        }
        find_element_mut(host, &self.style_id).and_then(Element::sheet_mut)
    }
}
