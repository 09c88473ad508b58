//! Widgets
//!
//! Calculator-specific ratatui widgets. Each renders into a layer buffer in
//! layer-local coordinates; the ones that take mouse input also expose the
//! geometry needed to hit-test a click.

pub mod display_panel;
pub mod history_sidebar;
pub mod keypad;
pub mod settings_panel;

pub use display_panel::DisplayPanel;
pub use history_sidebar::{HistorySidebar, HistorySidebarState};
pub use keypad::Keypad;
pub use settings_panel::SettingsPanel;
