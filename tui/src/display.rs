//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from CalculatorMessages and used for rendering.
//!
//! The TUI is a "thin client" - it just renders what the Calculator tells
//! it to. Display state is the bridge between CalculatorMessages and
//! rendering.

use std::time::Duration;

use calc_controller::{
    CalculatorMessage, DisplaySnapshot, HistoryEntry, Layout, NotifyLevel, Theme,
    EMPTY_BUFFER, EMPTY_HISTORY_TEXT,
};

/// How long a notification stays in the status bar
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// A notification to display
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Message content
    pub message: String,
    /// Time left before it disappears
    pub remaining: Duration,
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Main line, caption and selection
    pub display: DisplaySnapshot,
    /// History entries, newest first
    pub history: Vec<HistoryEntry>,
    /// Whether the history sidebar is open
    pub history_visible: bool,
    /// Highlighted history entry
    pub history_cursor: usize,
    /// Whether the settings panel is open
    pub settings_visible: bool,
    /// Active theme
    pub theme: Theme,
    /// Whether key clicks sound
    pub sound_enabled: bool,
    /// Keypad arrangement
    pub layout: Layout,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
    /// Cues received but not yet played
    pending_cues: usize,
    /// The Calculator said goodbye
    pub quit: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            display: DisplaySnapshot {
                text: EMPTY_BUFFER.to_string(),
                ..DisplaySnapshot::default()
            },
            history: Vec::new(),
            history_visible: false,
            history_cursor: 0,
            settings_visible: false,
            theme: Theme::default(),
            sound_enabled: true,
            layout: Layout::default(),
            notification: None,
            pending_cues: 0,
            quit: false,
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a CalculatorMessage to update display state
    pub fn apply_message(&mut self, msg: CalculatorMessage) {
        match msg {
            CalculatorMessage::Display(snapshot) => self.display = snapshot,
            CalculatorMessage::History { entries } => {
                self.history = entries;
                self.history_cursor = self
                    .history_cursor
                    .min(self.history.len().saturating_sub(1));
            }
            CalculatorMessage::HistoryVisibility { visible, cursor } => {
                self.history_visible = visible;
                self.history_cursor = cursor;
            }
            CalculatorMessage::SettingsVisibility { visible } => {
                self.settings_visible = visible;
            }
            CalculatorMessage::Theme { theme } => self.theme = theme,
            CalculatorMessage::Sound { enabled } => self.sound_enabled = enabled,
            CalculatorMessage::Layout { layout } => self.layout = layout,
            CalculatorMessage::PlayCue { cue } => {
                tracing::trace!(asset = cue.asset(), "Cue");
                self.pending_cues += 1;
            }
            CalculatorMessage::Notify { level, message } => {
                self.notification = Some(DisplayNotification {
                    level,
                    message,
                    remaining: NOTIFICATION_TTL,
                });
            }
            CalculatorMessage::Quit => self.quit = true,
        }
    }

    /// Update timers
    pub fn update(&mut self, delta: Duration) {
        if let Some(ref mut notification) = self.notification {
            notification.remaining = notification.remaining.saturating_sub(delta);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }
    }

    /// Take the number of cues waiting to be played
    pub fn take_cues(&mut self) -> usize {
        std::mem::take(&mut self.pending_cues)
    }

    /// Lines for the history sidebar: one per entry, or the empty placeholder
    pub fn history_lines(&self) -> Vec<String> {
        if self.history.is_empty() {
            vec![EMPTY_HISTORY_TEXT.to_string()]
        } else {
            self.history.iter().map(HistoryEntry::summary).collect()
        }
    }
}
