//! Input Buffer
//!
//! The expression being composed and the flag that decides whether the next
//! token extends it or replaces it.
//!
//! There are exactly two logical states:
//!
//! - **Editing**: tokens are appended to the buffer.
//! - **Pending overwrite**: a result (or an error, or a select-all) is on
//!   screen and the next token starts a fresh expression.
//!
//! The buffer is never empty; `"0"` stands for "nothing typed yet".
//!
//! Alongside the buffer this module tracks what the display shows, because
//! after a failed evaluation the display and the buffer disagree.

use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::keys::Action;

/// The value the buffer holds when logically empty
pub const EMPTY_BUFFER: &str = "0";

/// The text shown after a failed evaluation
pub const ERROR_INDICATOR: &str = "Error";

/// What a surface should show for the buffer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Main display line
    pub text: String,
    /// Caption above the main line (`"12+3 ="` after an evaluation)
    pub caption: String,
    /// Whether the whole main line is highlighted as selected
    pub selected: bool,
    /// Whether the next token will overwrite the main line
    pub reset_pending: bool,
}

/// The calculator's input buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputBuffer {
    /// The expression text (never empty)
    buffer: String,
    /// Next append overwrites instead of extending
    reset_pending: bool,
    /// Display override (set while the display shows something else)
    display_override: Option<String>,
    /// Caption line
    caption: String,
    /// Select-all highlight
    selected: bool,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    /// Create a buffer in the initial state `{"0", false}`
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: EMPTY_BUFFER.to_string(),
            reset_pending: false,
            display_override: None,
            caption: String::new(),
            selected: false,
        }
    }

    /// The current expression
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.buffer
    }

    /// Whether the next append overwrites the buffer
    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Text of the main display line
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.display_override.as_deref().unwrap_or(&self.buffer)
    }

    /// Caption line text
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Whether select-all is highlighted
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            text: self.display_text().to_string(),
            caption: self.caption.clone(),
            selected: self.selected,
            reset_pending: self.reset_pending,
        }
    }

    /// Apply a local edit
    ///
    /// Returns the expression to send when the action is
    /// [`Action::Evaluate`]; the buffer itself does not change until the
    /// outcome arrives through [`InputBuffer::evaluation_succeeded`] or
    /// [`InputBuffer::evaluation_failed`].
    pub fn apply(&mut self, action: &Action) -> Option<String> {
        match action {
            Action::Clear => self.clear(),
            Action::DeleteLast => self.delete_last(),
            Action::SelectAll => self.select_all(),
            Action::Append(token) => self.append(token),
            Action::Evaluate => return Some(self.buffer.clone()),
        }
        None
    }

    /// Reset to `"0"` and blank the caption
    pub fn clear(&mut self) {
        self.buffer = EMPTY_BUFFER.to_string();
        self.reset_pending = false;
        self.display_override = None;
        self.caption.clear();
        self.selected = false;
    }

    /// Remove the last character
    ///
    /// A pending overwrite makes the whole buffer disposable, so this clears
    /// instead.
    pub fn delete_last(&mut self) {
        if self.reset_pending {
            self.clear();
            return;
        }
        self.buffer.pop();
        if self.buffer.is_empty() {
            self.buffer = EMPTY_BUFFER.to_string();
        }
        self.display_override = None;
    }

    /// Append a token, replacing the buffer first if it is `"0"` or an
    /// overwrite is pending
    pub fn append(&mut self, token: &str) {
        if self.buffer == EMPTY_BUFFER || self.reset_pending {
            self.buffer.clear();
            self.reset_pending = false;
            self.selected = false;
        }
        self.buffer.push_str(token);
        self.display_override = None;
    }

    /// Mark the whole buffer for overwrite without changing it
    pub fn select_all(&mut self) {
        self.reset_pending = true;
        self.selected = true;
    }

    /// Replace the buffer with a history entry's result, ready for editing
    pub fn adopt_history_result(&mut self, entry: &HistoryEntry) {
        self.buffer = if entry.result.is_empty() {
            EMPTY_BUFFER.to_string()
        } else {
            entry.result.clone()
        };
        self.reset_pending = false;
        self.display_override = None;
        self.selected = false;
    }

    /// Show an evaluation result
    ///
    /// `expression` is what was sent; it becomes the caption.
    pub fn evaluation_succeeded(&mut self, expression: &str, result: &str) {
        self.caption = format!("{expression} =");
        self.buffer = if result.is_empty() {
            EMPTY_BUFFER.to_string()
        } else {
            result.to_string()
        };
        self.reset_pending = true;
        self.display_override = None;
        self.selected = false;
    }

    /// Show the error indicator
    ///
    /// The expression is kept as it was; the pending overwrite means the
    /// next keystroke discards it anyway.
    pub fn evaluation_failed(&mut self) {
        self.display_override = Some(ERROR_INDICATOR.to_string());
        self.reset_pending = true;
        self.selected = false;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(expression: &str, result: &str) -> HistoryEntry {
        HistoryEntry::new(expression, result)
    }

    #[test]
    fn test_initial_state() {
        let buffer = InputBuffer::new();
        assert_eq!(buffer.expression(), "0");
        assert!(!buffer.reset_pending());
        assert_eq!(buffer.display_text(), "0");
        assert_eq!(buffer.caption(), "");
    }

    #[test]
    fn test_appends_replace_leading_zero() {
        let mut buffer = InputBuffer::new();
        for token in ["1", "2", "+", "sin(", "3", ")"] {
            buffer.append(token);
        }
        assert_eq!(buffer.expression(), "12+sin(3)");
    }

    #[test]
    fn test_zero_token_on_empty_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.append("0");
        buffer.append("0");
        assert_eq!(buffer.expression(), "0");
        // A bare "0" is always the placeholder, even when it was typed
        buffer.append(".");
        buffer.append("5");
        assert_eq!(buffer.expression(), ".5");
    }

    #[test]
    fn test_delete_at_floor_is_idempotent() {
        let mut buffer = InputBuffer::new();
        buffer.delete_last();
        buffer.delete_last();
        assert_eq!(buffer.expression(), "0");
        assert!(!buffer.reset_pending());
    }

    #[test]
    fn test_delete_n_times_reaches_zero() {
        let mut buffer = InputBuffer::new();
        buffer.append("98+76");
        for _ in 0.."98+76".len() {
            buffer.delete_last();
        }
        assert_eq!(buffer.expression(), "0");
    }

    #[test]
    fn test_delete_multibyte_tokens() {
        let mut buffer = InputBuffer::new();
        buffer.append("6");
        buffer.append("×");
        buffer.delete_last();
        assert_eq!(buffer.expression(), "6");

        buffer.append("sin(");
        buffer.delete_last();
        assert_eq!(buffer.expression(), "6sin");
    }

    #[test]
    fn test_append_after_evaluation_overwrites() {
        let mut buffer = InputBuffer::new();
        buffer.append("7");
        let sent = buffer.apply(&Action::Evaluate);
        assert_eq!(sent.as_deref(), Some("7"));

        buffer.evaluation_succeeded("7", "7");
        assert!(buffer.reset_pending());
        assert_eq!(buffer.caption(), "7 =");

        buffer.append("3");
        assert_eq!(buffer.expression(), "3");
        assert!(!buffer.reset_pending());
    }

    #[test]
    fn test_delete_after_evaluation_clears() {
        let mut buffer = InputBuffer::new();
        buffer.append("2+2");
        buffer.evaluation_succeeded("2+2", "4");
        buffer.delete_last();
        assert_eq!(buffer.expression(), "0");
        assert_eq!(buffer.caption(), "");
    }

    #[test]
    fn test_select_all_keeps_content() {
        let mut buffer = InputBuffer::new();
        buffer.append("12+3");
        buffer.select_all();
        assert_eq!(buffer.expression(), "12+3");
        assert!(buffer.is_selected());

        buffer.delete_last();
        assert_eq!(buffer.expression(), "0");
    }

    #[test]
    fn test_select_all_then_append_overwrites() {
        let mut buffer = InputBuffer::new();
        buffer.append("12+3");
        buffer.apply(&Action::SelectAll);
        buffer.apply(&Action::Append("5".into()));
        assert_eq!(buffer.expression(), "5");
        assert!(!buffer.is_selected());
    }

    #[test]
    fn test_adopt_history_result_is_editable() {
        let mut buffer = InputBuffer::new();
        buffer.append("1");
        buffer.evaluation_succeeded("1", "1");

        buffer.adopt_history_result(&entry("40+2", "42"));
        assert!(!buffer.reset_pending());
        buffer.append("+");
        assert_eq!(buffer.expression(), "42+");
    }

    #[test]
    fn test_evaluation_failure_shows_error() {
        let mut buffer = InputBuffer::new();
        buffer.append("1÷");
        buffer.evaluation_failed();

        assert_eq!(buffer.display_text(), ERROR_INDICATOR);
        assert_eq!(buffer.expression(), "1÷");
        assert!(buffer.reset_pending());

        buffer.append("8");
        assert_eq!(buffer.expression(), "8");
        assert_eq!(buffer.display_text(), "8");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut buffer = InputBuffer::new();
        buffer.append("5×5");
        buffer.evaluation_succeeded("5×5", "25");
        buffer.apply(&Action::Clear);

        assert_eq!(
            buffer.snapshot(),
            DisplaySnapshot {
                text: "0".into(),
                caption: String::new(),
                selected: false,
                reset_pending: false,
            }
        );
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let mut buffer = InputBuffer::new();
        buffer.append("3^2");
        let before = buffer.clone();
        assert_eq!(buffer.apply(&Action::Evaluate), Some("3^2".to_string()));
        assert_eq!(buffer, before);
    }
}
