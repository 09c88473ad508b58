//! Calculator Messages
//!
//! Messages sent from the calculator to a surface. A surface holds no
//! calculator logic; it renders what these messages describe.

use serde::{Deserialize, Serialize};

use crate::buffer::DisplaySnapshot;
use crate::history::HistoryEntry;
use crate::keys::Layout;
use crate::preferences::{SoundCue, Theme};

/// Messages from the calculator to a surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CalculatorMessage {
    /// The display changed
    Display(DisplaySnapshot),

    /// The history list changed
    History {
        /// Entries, newest first
        entries: Vec<HistoryEntry>,
    },

    /// History sidebar opened or closed
    HistoryVisibility {
        /// Whether the sidebar is open
        visible: bool,
        /// Highlighted entry
        cursor: usize,
    },

    /// Settings panel opened or closed
    SettingsVisibility {
        /// Whether the panel is open
        visible: bool,
    },

    /// Theme changed
    Theme {
        /// The active theme
        theme: Theme,
    },

    /// Sound toggled
    Sound {
        /// Whether key clicks play
        enabled: bool,
    },

    /// Keypad layout changed
    Layout {
        /// The active layout
        layout: Layout,
    },

    /// Play a key-click cue
    PlayCue {
        /// The cue to play
        cue: SoundCue,
    },

    /// Show a transient notification
    Notify {
        /// Severity
        level: NotifyLevel,
        /// Text to show
        message: String,
    },

    /// The session is ending
    Quit,
}

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Something did not work but the calculator carries on
    Warning,
}

/// Identifier for one evaluation request
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new unique request ID
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
