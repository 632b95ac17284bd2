#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Fixed(u16),
    /// Intrinsic size for tables and inline elements, fills the container for blocks.
    #[default]
    Auto,
}

impl Size {
    pub fn fixed(self) -> Option<u16> {
        match self {
            Self::Fixed(n) => Some(n),
            Self::Auto => None,
        }
    }
}
