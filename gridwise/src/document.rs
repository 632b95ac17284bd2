//! Document-level state shared by every table on a page.

use std::sync::{Arc, RwLock};

use celldom::Element;

/// Handle to the document root (`body`). Clones share the same root.
#[derive(Debug, Clone)]
pub struct Document {
    root: Arc<RwLock<Element>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: Arc::new(RwLock::new(Element::body())),
        }
    }

    /// Returns true if the class was added.
    pub fn add_class(&self, class: &str) -> bool {
        self.root
            .write()
            .map(|mut root| root.add_class(class))
            .unwrap_or(false)
    }

    /// Returns true if the class was present.
    pub fn remove_class(&self, class: &str) -> bool {
        self.root
            .write()
            .map(|mut root| root.remove_class(class))
            .unwrap_or(false)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.root
            .read()
            .map(|root| root.has_class(class))
            .unwrap_or(false)
    }

    pub fn classes(&self) -> Vec<String> {
        self.root
            .read()
            .map(|root| root.classes.clone())
            .unwrap_or_default()
    }
}
