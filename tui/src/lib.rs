//! calc-tui - Terminal keypad for calc-keypad
//!
//! This crate provides a full-screen calculator: a display, a clickable
//! keypad, a history sidebar and a settings panel. All calculator
//! behaviour lives in `calc-controller`; this crate only translates
//! terminal input into events and renders the messages that come back.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering for the sidebar and settings overlays
//! - **Display**: Render state folded from CalculatorMessages
//! - **Keymap**: Keyboard bindings, context-sensitive to open panels
//! - **Widgets**: Display panel, keypad, history sidebar, settings panel

pub mod app;
pub mod calculator_client;
pub mod compositor;
pub mod display;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use calculator_client::CalculatorClient;
