//! Calc Controller - Headless Keypad Calculator Core for calc-keypad
//!
//! This crate holds everything a keypad calculator does that is not drawing:
//! the input buffer, the keypad vocabulary, the evaluation service client,
//! history, and persisted preferences. It can drive a TUI or run headless
//! for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Surfaces                             │
//! │   ┌─────────┐                   ┌──────────────────────┐  │
//! │   │   TUI   │                   │  Headless / tests    │  │
//! │   │(ratatui)│                   │                      │  │
//! │   └────┬────┘                   └──────────┬───────────┘  │
//! │        └──────────────┬────────────────────┘              │
//! │                 InputEvent (up)                           │
//! │             CalculatorMessage (down)                      │
//! └───────────────────────┼──────────────────────────────────┘
//!                         │
//! ┌───────────────────────┼──────────────────────────────────┐
//! │                 CALC CONTROLLER                           │
//! │  ┌────────────────────┴───────────────────────────────┐  │
//! │  │                    Calculator                       │  │
//! │  │  ┌────────┐  ┌─────────┐  ┌────────┐  ┌──────────┐  │  │
//! │  │  │ Input  │  │ History │  │ Prefs  │  │ Service  │  │  │
//! │  │  │ Buffer │  │  Panel  │  │ Store  │  │  (HTTP)  │  │  │
//! │  │  └────────┘  └─────────┘  └────────┘  └──────────┘  │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Calculator`]: Owns the session and reacts to input
//! - [`InputBuffer`]: The expression being typed and its reset flag
//! - [`EvaluationService`]: Where expressions are evaluated
//! - [`CalculatorMessage`]: Messages sent from the calculator to a surface
//! - [`InputEvent`]: Events sent from a surface to the calculator
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use calc_controller::{
//!     Calculator, HttpEvaluationService, InputEvent, Key, MemoryPreferenceStore,
//! };
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!
//!     let service = HttpEvaluationService::new("http://localhost:5000")?;
//!     let store = Arc::new(MemoryPreferenceStore::new());
//!     let mut calculator = Calculator::new(service, store, tx);
//!     calculator.start().await?;
//!
//!     calculator.handle_event(InputEvent::Key(Key::Digit(4))).await?;
//!     calculator.handle_event(InputEvent::Key(Key::Equals)).await?;
//!
//!     // Apply service responses as they arrive
//!     calculator.wait_for_request().await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`buffer`]: Expression buffer and display state
//! - [`calculator`]: The orchestrating `Calculator`
//! - [`config`]: Configuration file, environment and CLI overrides
//! - [`events`]: Events from surfaces to the calculator
//! - [`history`]: History entries and sidebar state
//! - [`keys`]: Keys, actions, keyboard bindings and keypad layouts
//! - [`messages`]: Messages from the calculator to surfaces
//! - [`preferences`]: Theme, sound and their persistence
//! - [`service`]: Evaluation service abstraction and HTTP client
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod calculator;
pub mod config;
pub mod events;
pub mod history;
pub mod keys;
pub mod messages;
pub mod preferences;
pub mod service;

// Re-exports for convenience
pub use buffer::{DisplaySnapshot, InputBuffer, EMPTY_BUFFER, ERROR_INDICATOR};
pub use calculator::Calculator;
pub use events::InputEvent;
pub use history::{CursorMove, HistoryEntry, HistoryPanel, EMPTY_HISTORY_TEXT};
pub use keys::{Action, Constant, Function, Key, Layout, Operator};
pub use messages::{CalculatorMessage, NotifyLevel, RequestId};
pub use preferences::{
    default_preferences_path, FilePreferenceStore, MemoryPreferenceStore, PreferenceError,
    PreferenceStore, Preferences, SoundCue, Theme,
};
pub use service::{
    Evaluation, EvaluationError, EvaluationService, HttpEvaluationService, DEFAULT_SERVICE_URL,
};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, CalculatorConfig, CalculatorToml,
    ConfigError, ConfigOverrides, ConfigSource,
};
