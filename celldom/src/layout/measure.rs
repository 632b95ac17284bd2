use std::collections::HashMap;

use super::Rect;
use crate::element::{cells, rows, Content, Element, Tag};
use crate::text::display_width;

pub type LayoutResult = HashMap<String, Rect>;

/// Horizontal padding on each side of a table cell.
pub const CELL_PADDING: u16 = 1;

/// Lay out `root` inside `available` and return a rect per visible element.
///
/// Blocks fill the available width and stack their children vertically.
/// Tables size to their content (a column is as wide as its widest cell)
/// and are allowed to overflow their container. Hidden elements and `style`
/// elements take no space and get no rect.
pub fn measure(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(root, available.x, available.y, available.width, &mut result);
    result
}

fn layout_element(element: &Element, x: u16, y: u16, avail_width: u16, result: &mut LayoutResult) -> (u16, u16) {
    if element.hidden || element.tag == Tag::Style {
        return (0, 0);
    }

    if element.tag == Tag::Table {
        return layout_table(element, x, y, result);
    }

    let (width, height) = match &element.content {
        Content::Text(text) => (
            element.width.fixed().unwrap_or_else(|| clamp(display_width(text))),
            element.height.fixed().unwrap_or(1),
        ),
        Content::Children(children) => {
            let width = element.width.fixed().unwrap_or(avail_width);
            let mut cursor_y = y;
            for child in children {
                let (_, child_height) = layout_element(child, x, cursor_y, width, result);
                cursor_y = cursor_y.saturating_add(child_height);
            }
            let height = element.height.fixed().unwrap_or(cursor_y - y);
            (width, height)
        }
        Content::None | Content::Sheet(_) => (
            element.width.fixed().unwrap_or(avail_width),
            element.height.fixed().unwrap_or(0),
        ),
    };

    result.insert(element.id.clone(), Rect::new(x, y, width, height));
    (width, height)
}

fn layout_table(table: &Element, x: u16, y: u16, result: &mut LayoutResult) -> (u16, u16) {
    let mut column_widths: Vec<u16> = Vec::new();
    for row in rows(table) {
        for (i, cell) in cells(row).enumerate() {
            let width = cell_width(cell);
            match column_widths.get_mut(i) {
                Some(existing) => *existing = (*existing).max(width),
                None => column_widths.push(width),
            }
        }
    }

    let content_width = column_widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w));
    let mut cursor_y = y;
    for child in table.child_elements() {
        place_rows(child, x, &mut cursor_y, content_width, &column_widths, result);
    }

    let width = table.width.fixed().unwrap_or(content_width);
    let height = table.height.fixed().unwrap_or(cursor_y - y);
    result.insert(table.id.clone(), Rect::new(x, y, width, height));
    (width, height)
}

fn place_rows(
    element: &Element,
    x: u16,
    cursor_y: &mut u16,
    content_width: u16,
    column_widths: &[u16],
    result: &mut LayoutResult,
) {
    if element.hidden {
        return;
    }
    match element.tag {
        Tag::Tr => {
            let mut cell_x = x;
            for (cell, width) in cells(element).zip(column_widths) {
                result.insert(cell.id.clone(), Rect::new(cell_x, *cursor_y, *width, 1));
                // Cell content is not laid out further; hits resolve to the cell.
                cell_x = cell_x.saturating_add(*width);
            }
            result.insert(element.id.clone(), Rect::new(x, *cursor_y, content_width, 1));
            *cursor_y = cursor_y.saturating_add(1);
        }
        ref tag if tag.is_section() => {
            let start_y = *cursor_y;
            for child in element.child_elements() {
                place_rows(child, x, cursor_y, content_width, column_widths, result);
            }
            result.insert(
                element.id.clone(),
                Rect::new(x, start_y, content_width, *cursor_y - start_y),
            );
        }
        _ => {}
    }
}

fn cell_width(cell: &Element) -> u16 {
    cell.width.fixed().unwrap_or_else(|| {
        clamp(display_width(cell.text_content().trim())).saturating_add(CELL_PADDING * 2)
    })
}

fn clamp(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}
