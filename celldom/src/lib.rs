pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod sheet;
pub mod text;
pub mod timer;
pub mod types;

pub use element::{Content, Element, InlineStyle, Tag};
pub use event::{Arrow, Event, Key, KeyEvent, Modifiers};
pub use hit::{hit_test, hit_test_any, hit_test_where};
pub use layout::{measure, LayoutResult, Rect, CELL_PADDING};
pub use sheet::{Selector, SheetError, StyleRule, StyleSheet};
pub use timer::{TimerId, TimerQueue};
pub use types::*;
