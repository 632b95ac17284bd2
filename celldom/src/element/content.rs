use crate::sheet::StyleSheet;

#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
    /// Rules owned by a `style` element.
    Sheet(StyleSheet),
}
