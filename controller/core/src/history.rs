//! Calculation History
//!
//! History entries are owned by the evaluation service. The calculator only
//! keeps the most recent list it was handed and the state of the sidebar
//! that shows it.

use serde::{Deserialize, Serialize};

/// Placeholder shown when the service has no history
pub const EMPTY_HISTORY_TEXT: &str = "No history";

/// A past computation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Expression as it was sent
    pub expression: String,
    /// Result as the service formatted it
    pub result: String,
}

impl HistoryEntry {
    /// Create a new entry
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// One-line rendering: `expression = result`
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Direction to move the sidebar cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMove {
    /// Towards newer entries
    Up,
    /// Towards older entries
    Down,
}

/// History sidebar state
#[derive(Clone, Debug, Default)]
pub struct HistoryPanel {
    entries: Vec<HistoryEntry>,
    visible: bool,
    cursor: usize,
}

impl HistoryPanel {
    /// Create a hidden, empty panel
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries, newest first
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Whether the sidebar is open
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Highlighted entry index
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the list with the service's latest copy
    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    }

    /// Open the sidebar with the cursor on the newest entry
    pub fn open(&mut self) {
        self.visible = true;
        self.cursor = 0;
    }

    /// Close the sidebar
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Move the cursor, clamped to the list
    pub fn move_cursor(&mut self, direction: CursorMove) {
        match direction {
            CursorMove::Up => self.cursor = self.cursor.saturating_sub(1),
            CursorMove::Down => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
            }
        }
    }

    /// Entry at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entry under the cursor, if any
    #[must_use]
    pub fn highlighted(&self) -> Option<&HistoryEntry> {
        self.get(self.cursor)
    }
}
