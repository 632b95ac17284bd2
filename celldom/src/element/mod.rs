mod content;
mod node;

pub use content::Content;
pub use node::{Element, InlineStyle, Tag};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first element (depth-first, document order) matching the predicate.
pub fn find_first<'a>(root: &'a Element, pred: &impl Fn(&Element) -> bool) -> Option<&'a Element> {
    if pred(root) {
        return Some(root);
    }
    root.child_elements()
        .iter()
        .find_map(|child| find_first(child, pred))
}

/// Chain of elements from `root` down to the element with `id`, inclusive.
pub fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    if root.id == id {
        return Some(vec![root]);
    }

    for child in root.child_elements() {
        if let Some(mut path) = path_to(child, id) {
            path.insert(0, root);
            return Some(path);
        }
    }

    None
}

/// Nearest element matching `pred`, starting at `id` and walking up to `root`.
pub fn closest<'a>(
    root: &'a Element,
    id: &str,
    pred: impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    path_to(root, id)?.into_iter().rev().find(|el| pred(el))
}

/// True if `id` is `ancestor` itself or one of its descendants.
pub fn contains(ancestor: &Element, id: &str) -> bool {
    find_element(ancestor, id).is_some()
}

/// Every `tr` under `root` in document order. Rows nested inside cells are
/// not visited.
pub fn rows(root: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    collect_rows(root, &mut out);
    out
}

fn collect_rows<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    if element.tag == Tag::Tr {
        out.push(element);
        return;
    }
    for child in element.child_elements() {
        collect_rows(child, out);
    }
}

/// Visit every `tr` under `root` mutably in document order, passing the
/// 0-based row index.
pub fn for_each_row_mut(root: &mut Element, mut f: impl FnMut(usize, &mut Element)) {
    let mut index = 0;
    visit_rows_mut(root, &mut index, &mut f);
}

fn visit_rows_mut(element: &mut Element, index: &mut usize, f: &mut impl FnMut(usize, &mut Element)) {
    if element.tag == Tag::Tr {
        f(*index, element);
        *index += 1;
        return;
    }
    if let Content::Children(children) = &mut element.content {
        for child in children {
            visit_rows_mut(child, index, f);
        }
    }
}

/// Direct `th`/`td` children of a row.
pub fn cells(row: &Element) -> impl Iterator<Item = &Element> {
    row.child_elements().iter().filter(|c| c.tag.is_cell())
}
