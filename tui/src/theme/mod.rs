//! Theme and Colors
//!
//! One palette per calculator theme. Button colours follow the kind of key:
//! digits are quiet, operators carry the accent, and the clear/delete pair
//! is tinted so it is hard to hit by accident.

use ratatui::style::{Color, Modifier, Style};

use calc_controller::{Key, Theme};

// ============================================================================
// Shared Colors
// ============================================================================

/// Error text on dark backgrounds
pub const ERROR_RED: Color = Color::Rgb(255, 95, 95);

/// Error text on light backgrounds
pub const ERROR_RED_DEEP: Color = Color::Rgb(190, 40, 40);

/// Warning notifications
pub const WARNING_AMBER: Color = Color::Rgb(230, 170, 60);

/// Colours for one theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Screen background
    pub background: Color,
    /// Display and panel background
    pub surface: Color,
    /// Main text
    pub text: Color,
    /// Captions, hints and borders
    pub dim: Color,
    /// Operator keys and highlights
    pub accent: Color,
    /// Digit key face
    pub key: Color,
    /// Clear and delete key face
    pub action_key: Color,
    /// Equals key face
    pub equals_key: Color,
    /// Text on the equals key
    pub equals_text: Color,
    /// Error indicator
    pub error: Color,
}

impl Palette {
    /// Palette for a theme
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(24, 24, 28),
                surface: Color::Rgb(36, 36, 42),
                text: Color::Rgb(235, 235, 240),
                dim: Color::Rgb(120, 120, 130),
                accent: Color::Rgb(255, 159, 67),
                key: Color::Rgb(52, 52, 60),
                action_key: Color::Rgb(80, 60, 64),
                equals_key: Color::Rgb(255, 159, 67),
                equals_text: Color::Rgb(24, 24, 28),
                error: ERROR_RED,
            },
            Theme::PastelBlue => Self {
                background: Color::Rgb(222, 236, 250),
                surface: Color::Rgb(240, 247, 255),
                text: Color::Rgb(40, 60, 90),
                dim: Color::Rgb(120, 140, 170),
                accent: Color::Rgb(70, 130, 200),
                key: Color::Rgb(205, 224, 245),
                action_key: Color::Rgb(245, 210, 215),
                equals_key: Color::Rgb(70, 130, 200),
                equals_text: Color::Rgb(255, 255, 255),
                error: ERROR_RED_DEEP,
            },
            Theme::PastelPink => Self {
                background: Color::Rgb(252, 228, 236),
                surface: Color::Rgb(255, 243, 247),
                text: Color::Rgb(90, 40, 60),
                dim: Color::Rgb(170, 120, 140),
                accent: Color::Rgb(214, 92, 140),
                key: Color::Rgb(248, 212, 225),
                action_key: Color::Rgb(240, 190, 200),
                equals_key: Color::Rgb(214, 92, 140),
                equals_text: Color::Rgb(255, 255, 255),
                error: ERROR_RED_DEEP,
            },
            Theme::GreyWhite => Self {
                background: Color::Rgb(240, 240, 240),
                surface: Color::Rgb(255, 255, 255),
                text: Color::Rgb(40, 40, 40),
                dim: Color::Rgb(140, 140, 140),
                accent: Color::Rgb(90, 90, 90),
                key: Color::Rgb(225, 225, 225),
                action_key: Color::Rgb(210, 210, 210),
                equals_key: Color::Rgb(60, 60, 60),
                equals_text: Color::Rgb(250, 250, 250),
                error: ERROR_RED_DEEP,
            },
            Theme::SageGreen => Self {
                background: Color::Rgb(221, 232, 218),
                surface: Color::Rgb(238, 245, 236),
                text: Color::Rgb(45, 65, 45),
                dim: Color::Rgb(120, 145, 120),
                accent: Color::Rgb(96, 140, 96),
                key: Color::Rgb(204, 220, 200),
                action_key: Color::Rgb(230, 214, 196),
                equals_key: Color::Rgb(96, 140, 96),
                equals_text: Color::Rgb(250, 255, 250),
                error: ERROR_RED_DEEP,
            },
        }
    }

    /// Base style: text on the screen background
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Panel style: text on the surface colour
    pub fn panel(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Hints and captions
    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim).bg(self.surface)
    }

    /// Highlighted row in a list
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Face of a keypad button
    pub fn key_style(&self, key: Key) -> Style {
        match key {
            Key::Equals => Style::default()
                .fg(self.equals_text)
                .bg(self.equals_key)
                .add_modifier(Modifier::BOLD),
            Key::Clear | Key::Delete => Style::default().fg(self.text).bg(self.action_key),
            Key::Operator(_) => Style::default()
                .fg(self.accent)
                .bg(self.key)
                .add_modifier(Modifier::BOLD),
            Key::Function(_) | Key::Constant(_) | Key::OpenParen | Key::CloseParen => {
                Style::default().fg(self.accent).bg(self.surface)
            }
            Key::Digit(_) | Key::Decimal => Style::default().fg(self.text).bg(self.key),
        }
    }
}
