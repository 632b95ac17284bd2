//! Dynamic style rules: a minimal CSSOM for `style` elements.
//!
//! Selectors are limited to what the rule generators need: an optional
//! `#id` ancestor scope followed by a compound of `data-*` attribute matches.

use std::fmt;

use thiserror::Error;

use crate::element::{path_to, Element};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("rule index {index} out of bounds for sheet with {len} rules")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// `[data-name="value"]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Ancestor id the rule is scoped to (descendant combinator).
    pub scope: Option<String>,
    pub attrs: Vec<AttrMatch>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scoped(mut self, id: impl Into<String>) -> Self {
        self.scope = Some(id.into());
        self
    }

    pub fn data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(AttrMatch {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// (id selectors, attribute selectors), compared lexicographically.
    pub fn specificity(&self) -> (usize, usize) {
        (usize::from(self.scope.is_some()), self.attrs.len())
    }

    /// Does the element `id` under `root` match this selector?
    pub fn matches(&self, root: &Element, id: &str) -> bool {
        let Some(path) = path_to(root, id) else {
            return false;
        };
        let Some((target, ancestors)) = path.split_last() else {
            return false;
        };

        let attrs_match = self
            .attrs
            .iter()
            .all(|m| target.get_data(&m.name) == Some(m.value.as_str()));
        if !attrs_match {
            return false;
        }

        match &self.scope {
            Some(scope) => ancestors.iter().any(|el| el.id == *scope),
            None => true,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = &self.scope {
            write!(f, "#{scope} ")?;
        }
        for attr in &self.attrs {
            write!(f, "[data-{}=\"{}\"]", attr.name, attr.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: Selector,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            declarations: Vec::new(),
        }
    }

    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    pub fn value(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            write!(f, " {property}: {value};")?;
        }
        f.write_str(" }")
    }
}

/// Ordered rule list with index-based insert/delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Insert `rule` at `index` (0..=len). Returns the index.
    pub fn insert_rule(&mut self, rule: StyleRule, index: usize) -> Result<usize, SheetError> {
        if index > self.rules.len() {
            return Err(SheetError::IndexOutOfBounds {
                index,
                len: self.rules.len(),
            });
        }
        log::trace!("insert_rule {index}: {rule}");
        self.rules.insert(index, rule);
        Ok(index)
    }

    pub fn delete_rule(&mut self, index: usize) -> Result<StyleRule, SheetError> {
        if index >= self.rules.len() {
            return Err(SheetError::IndexOutOfBounds {
                index,
                len: self.rules.len(),
            });
        }
        log::trace!("delete_rule {index}");
        Ok(self.rules.remove(index))
    }

    /// Delete every rule. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.rules.len();
        self.rules.clear();
        removed
    }

    /// Cascaded value of `property` for element `id`: highest specificity
    /// wins, later rules win ties.
    pub fn resolve(&self, root: &Element, id: &str, property: &str) -> Option<&str> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.selector.matches(root, id))
            .filter_map(|(order, rule)| {
                rule.value(property)
                    .map(|value| ((rule.selector.specificity(), order), value))
            })
            .max_by_key(|(key, _)| *key)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
