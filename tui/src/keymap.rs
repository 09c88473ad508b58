//! Keyboard Mapping
//!
//! Turns crossterm key events into calculator input. What a key means
//! depends on which panel is open: arrows move the history highlight only
//! while the sidebar is showing, digits pick themes only inside settings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use calc_controller::{Action, CursorMove, InputEvent, Layout, Theme};

use crate::display::DisplayState;

/// The parts of display state that change what a key means
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// History sidebar is open
    pub history_visible: bool,
    /// Sidebar has no entries to pick from
    pub history_empty: bool,
    /// Settings panel is open
    pub settings_visible: bool,
    /// Sound is currently on
    pub sound_enabled: bool,
    /// Keypad arrangement
    pub layout: Layout,
}

impl From<&DisplayState> for KeyContext {
    fn from(display: &DisplayState) -> Self {
        Self {
            history_visible: display.history_visible,
            history_empty: display.history.is_empty(),
            settings_visible: display.settings_visible,
            sound_enabled: display.sound_enabled,
            layout: display.layout,
        }
    }
}

/// Map a key press to an input event
///
/// Returns `None` for keys with no binding in the current context.
pub fn map_key(key: KeyEvent, ctx: KeyContext) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => Some(InputEvent::QuitRequested),
            KeyCode::Char('a') => Some(InputEvent::Action(Action::SelectAll)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::F(2) if ctx.history_visible => return Some(InputEvent::HistoryClosed),
        KeyCode::F(2) => return Some(InputEvent::HistoryOpened),
        KeyCode::F(3) => return Some(InputEvent::SettingsToggled),
        KeyCode::F(4) => {
            return Some(InputEvent::ScientificToggled(!ctx.layout.is_scientific()))
        }
        _ => {}
    }

    if ctx.settings_visible {
        if let Some(event) = map_settings_key(key.code, ctx) {
            return Some(event);
        }
    }

    if ctx.history_visible {
        if let Some(event) = map_history_key(key.code, ctx) {
            return Some(event);
        }
    }

    let action = match key.code {
        KeyCode::Enter => Action::Evaluate,
        KeyCode::Backspace => Action::DeleteLast,
        KeyCode::Esc => Action::Clear,
        KeyCode::Char(c) => Action::from_key_char(c)?,
        _ => return None,
    };
    Some(InputEvent::Action(action))
}

fn map_settings_key(code: KeyCode, ctx: KeyContext) -> Option<InputEvent> {
    match code {
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            Theme::all().get(index).copied().map(InputEvent::ThemeSelected)
        }
        KeyCode::Char('m') => Some(InputEvent::SoundToggled(!ctx.sound_enabled)),
        KeyCode::Esc => Some(InputEvent::SettingsDismissed),
        _ => None,
    }
}

fn map_history_key(code: KeyCode, ctx: KeyContext) -> Option<InputEvent> {
    match code {
        KeyCode::Up => Some(InputEvent::HistoryCursor(CursorMove::Up)),
        KeyCode::Down => Some(InputEvent::HistoryCursor(CursorMove::Down)),
        // Nothing to pick, so Enter evaluates
        KeyCode::Enter if ctx.history_empty => None,
        KeyCode::Enter => Some(InputEvent::HistoryHighlightSelected),
        KeyCode::Delete => Some(InputEvent::HistoryCleared),
        KeyCode::Esc => Some(InputEvent::HistoryClosed),
        _ => None,
    }
}
