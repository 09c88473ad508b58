//! Input Events
//!
//! Events sent from a surface to the calculator. Surfaces report what the
//! user did; the calculator decides what it means.

use serde::{Deserialize, Serialize};

use crate::history::CursorMove;
use crate::keys::{Action, Key};
use crate::preferences::Theme;

/// Events from a surface to the calculator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A keypad button was pressed
    Key(Key),

    /// A keyboard shortcut resolved to a buffer action
    Action(Action),

    /// The history sidebar was opened
    HistoryOpened,

    /// The history sidebar was closed
    HistoryClosed,

    /// The user asked to clear all history
    HistoryCleared,

    /// The sidebar highlight moved
    HistoryCursor(CursorMove),

    /// A history entry was picked (by index, newest first)
    HistorySelected(usize),

    /// The highlighted history entry was picked
    HistoryHighlightSelected,

    /// A theme was picked
    ThemeSelected(Theme),

    /// The sound switch was flipped
    SoundToggled(bool),

    /// The scientific switch was flipped
    ScientificToggled(bool),

    /// The settings button was pressed
    SettingsToggled,

    /// The user clicked away from the settings panel
    SettingsDismissed,

    /// The user wants to leave
    QuitRequested,
}
