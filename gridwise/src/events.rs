//! Event types flowing out of the engine.
//!
//! The engine pushes a `TableEvent` whenever it changes observable state.
//! Hosts drain the queue after each event or timer tick.

use crate::hover::CellCoord;
use crate::sort::SortDirection;

// =============================================================================
// Table Events
// =============================================================================

/// A state change the host may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// Body rows were reordered.
    Sorted {
        column: usize,
        direction: SortDirection,
    },
    /// A new highlight rule set was installed.
    HighlightChanged(CellCoord),
    /// The highlight rule set was removed.
    HighlightCleared,
    /// Fullscreen presentation entered or left.
    FullscreenChanged { fullscreen: bool },
    /// The overflow gate was evaluated.
    OverflowChecked { overflowing: bool },
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
