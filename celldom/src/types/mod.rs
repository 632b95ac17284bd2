mod color;
mod enums;

pub use color::{Color, ColorError, Rgb};
pub use enums::Size;
