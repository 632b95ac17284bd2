mod measure;
mod rect;

pub use measure::{measure, LayoutResult, CELL_PADDING};
pub use rect::Rect;
