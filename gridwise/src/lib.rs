pub mod annotate;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod fullscreen;
pub mod hover;
pub mod listeners;
pub mod markup;
pub mod runtime;
pub mod sort;
pub mod table;
pub mod visibility;

pub use config::{ConfigError, HighlightColors, SortableColumns, TableConfig};
pub use error::TableError;
pub use runtime::run;
pub use table::EnhancedTable;

pub mod prelude {
    pub use crate::annotate::{AnnotatedTable, RowRecord, SizeTier, SortIndex, annotate};
    pub use crate::config::{ConfigError, HighlightColors, SortableColumns, TableConfig};
    pub use crate::document::Document;
    pub use crate::error::TableError;
    pub use crate::events::{EventResult, TableEvent};
    pub use crate::fullscreen::{FullscreenController, FullscreenState};
    pub use crate::hover::{CellCoord, HoverEngine};
    pub use crate::listeners::{ListenerKind, ListenerTarget, Listeners};
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::table::{EnhancedTable, TimerTask};

    pub use celldom::{Element, Event, Key, KeyEvent};
}
