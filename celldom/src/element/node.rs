use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::sheet::StyleSheet;
use crate::types::Size;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Element kind. Mirrors the handful of HTML tags a table host is built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Table,
    THead,
    TBody,
    TFoot,
    Tr,
    Th,
    Td,
    Div,
    Span,
    Button,
    Slot,
    Style,
    Body,
    Other(String),
}

impl Tag {
    pub fn name(&self) -> &str {
        match self {
            Self::Table => "table",
            Self::THead => "thead",
            Self::TBody => "tbody",
            Self::TFoot => "tfoot",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
            Self::Div => "div",
            Self::Span => "span",
            Self::Button => "button",
            Self::Slot => "slot",
            Self::Style => "style",
            Self::Body => "body",
            Self::Other(name) => name,
        }
    }

    /// `th` or `td`.
    pub fn is_cell(&self) -> bool {
        matches!(self, Self::Th | Self::Td)
    }

    /// `thead`, `tbody` or `tfoot`.
    pub fn is_section(&self) -> bool {
        matches!(self, Self::THead | Self::TBody | Self::TFoot)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered inline style declarations (the `style` attribute).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an existing value in place.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(existing) => existing.1 = value,
            None => self.declarations.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.declarations.iter().position(|(p, _)| p == property)?;
        Some(self.declarations.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    // Attributes
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub data: BTreeMap<String, String>,
    pub inline_style: InlineStyle,
    pub hidden: bool,

    // Layout
    pub width: Size,
    pub height: Size,

    // Interaction
    pub clickable: bool,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: generate_id(tag.name()),
            tag,
            content: Content::None,
            classes: Vec::new(),
            data: BTreeMap::new(),
            inline_style: InlineStyle::default(),
            hidden: false,
            width: Size::Auto,
            height: Size::Auto,
            clickable: false,
        }
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn thead() -> Self {
        Self::new(Tag::THead)
    }

    pub fn tbody() -> Self {
        Self::new(Tag::TBody)
    }

    pub fn tfoot() -> Self {
        Self::new(Tag::TFoot)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    pub fn th(text: impl Into<String>) -> Self {
        Self::new(Tag::Th).text(text)
    }

    pub fn td(text: impl Into<String>) -> Self {
        Self::new(Tag::Td).text(text)
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new(Tag::Span).text(text)
    }

    pub fn button() -> Self {
        Self::new(Tag::Button)
    }

    pub fn slot() -> Self {
        Self::new(Tag::Slot)
    }

    pub fn body() -> Self {
        Self::new(Tag::Body)
    }

    /// A `style` element holding an empty sheet.
    pub fn style_sheet() -> Self {
        Self {
            content: Content::Sheet(StyleSheet::new()),
            ..Self::new(Tag::Style)
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    // Attributes
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn style_prop(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.inline_style.set(property, value);
        self
    }

    // Layout
    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    // Interaction
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Append a child, replacing non-child content.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn child_elements_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.content {
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Content::None | Content::Sheet(_) => {}
        }
    }

    // Class list

    /// Returns true if the class was added.
    pub fn add_class(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.has_class(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    // Data attributes
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn sheet(&self) -> Option<&StyleSheet> {
        match &self.content {
            Content::Sheet(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn sheet_mut(&mut self) -> Option<&mut StyleSheet> {
        match &mut self.content {
            Content::Sheet(sheet) => Some(sheet),
            _ => None,
        }
    }
}
