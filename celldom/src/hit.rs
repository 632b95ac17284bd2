//! Position to element resolution over a measured layout.

use crate::element::Element;
use crate::layout::LayoutResult;

/// Deepest clickable element under `(x, y)`.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_where(layout, root, x, y, |el| el.clickable)
}

/// Deepest element of any kind under `(x, y)`.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_where(layout, root, x, y, |_| true)
}

/// Deepest element under `(x, y)` accepted by `accept`. Hidden subtrees and
/// elements missing from `layout` never match. Later siblings win overlaps.
pub fn hit_test_where(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
    accept: impl Fn(&Element) -> bool,
) -> Option<String> {
    deepest(layout, root, x, y, &accept).map(|el| el.id.clone())
}

fn deepest<'a>(
    layout: &LayoutResult,
    element: &'a Element,
    x: u16,
    y: u16,
    accept: &impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    if element.hidden || !layout.get(&element.id)?.contains(x, y) {
        return None;
    }
    element
        .child_elements()
        .iter()
        .rev()
        .find_map(|child| deepest(layout, child, x, y, accept))
        .or_else(|| accept(element).then_some(element))
}
