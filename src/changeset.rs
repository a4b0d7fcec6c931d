/// Changeset - Window Change Notifications for SmartTable
///
/// A paged store never asks its display to reload. Every change to the
/// materialised window is described as a `WindowChange`, and observers
/// patch only the affected region.
///
/// # Change Types
///
/// - `RangeInserted`: positions `[start, end)` were appended to the window
/// - `RangeRemoved`: positions `[start, end)` were dropped from the window
/// - `CellChanged`: one cell at a window position was overwritten
/// - `LayoutChanged`: positions kept their count but may now show other rows
///
/// # Usage Pattern
///
/// 1. Store operations generate `WindowChange` events
/// 2. Each event goes to the subscribed listeners or, when there are none,
///    into the store's changeset
/// 3. Displays either react in the listener or call `drain()` after an
///    operation completes

use serde::Serialize;

/// Represents a single change to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum WindowChange {
    /// Window positions `[start, end)` are new
    RangeInserted { start: usize, end: usize },

    /// Window positions `[start, end)` no longer exist
    RangeRemoved { start: usize, end: usize },

    /// The cell at (row, column) has a new value
    CellChanged { row: usize, column: usize },

    /// Materialised rows may have been replaced or reordered
    LayoutChanged,
}

impl WindowChange {
    /// Number of rows added (positive) or removed (negative) by this change.
    pub fn row_delta(&self) -> isize {
        match self {
            WindowChange::RangeInserted { start, end } => (end - start) as isize,
            WindowChange::RangeRemoved { start, end } => -((end - start) as isize),
            WindowChange::CellChanged { .. } | WindowChange::LayoutChanged => 0,
        }
    }

    /// Returns true if this change alters the window size.
    pub fn shifts_rows(&self) -> bool {
        matches!(
            self,
            WindowChange::RangeInserted { .. } | WindowChange::RangeRemoved { .. }
        )
    }

    /// Single contiguous delta that takes a window from `old` to `new` rows.
    pub fn resize(old: usize, new: usize) -> Option<WindowChange> {
        match new.cmp(&old) {
            std::cmp::Ordering::Greater => Some(WindowChange::RangeInserted { start: old, end: new }),
            std::cmp::Ordering::Less => Some(WindowChange::RangeRemoved { start: new, end: old }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Changes a polling display has not picked up yet.
///
/// `generation` counts how many times the buffer has been emptied, whether
/// by a drain or by a listener taking over.
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    changes: Vec<WindowChange>,
    generation: u64,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: WindowChange) {
        self.changes.push(change);
    }

    /// Buffered changes, oldest first.
    pub fn changes(&self) -> &[WindowChange] {
        &self.changes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard buffered changes without handing them out.
    pub fn clear(&mut self) {
        self.changes.clear();
        self.generation += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Take every buffered change and start a new generation.
    pub fn drain(&mut self) -> Vec<WindowChange> {
        self.generation += 1;
        std::mem::take(&mut self.changes)
    }
}
