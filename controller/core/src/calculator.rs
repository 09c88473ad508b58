//! Calculator - The Orchestration Core
//!
//! The Calculator owns everything a keypad session needs:
//! - The input buffer and what the display shows
//! - The evaluation service client
//! - The history sidebar
//! - Preferences and session settings
//!
//! It talks to a surface through two types only:
//! - `InputEvent`: what the user did, received FROM the surface
//! - `CalculatorMessage`: what to show, sent TO the surface
//!
//! # Network requests
//!
//! Evaluations and history requests run as spawned tasks so a slow service
//! never stalls input handling. Their outcomes come back on an internal
//! channel and are applied by [`Calculator::poll_requests`], in whatever
//! order they complete. Nothing de-duplicates or cancels requests: pressing
//! `=` twice sends two evaluations.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::buffer::InputBuffer;
use crate::events::InputEvent;
use crate::history::{HistoryEntry, HistoryPanel};
use crate::keys::{Action, Layout};
use crate::messages::{CalculatorMessage, NotifyLevel, RequestId};
use crate::preferences::{PreferenceStore, Preferences, Theme};
use crate::service::{Evaluation, EvaluationError, EvaluationService};

/// Outcome of a spawned service request
#[derive(Debug)]
enum Completion {
    /// `POST /calculate` finished
    Evaluation {
        request_id: RequestId,
        expression: String,
        outcome: Result<Evaluation, EvaluationError>,
    },
    /// `GET` or `DELETE /history` finished
    History {
        cleared: bool,
        outcome: Result<Vec<HistoryEntry>, EvaluationError>,
    },
    /// Startup reachability probe finished
    Health { reachable: bool },
}

/// The Calculator - headless keypad controller
pub struct Calculator<S: EvaluationService> {
    /// Evaluation service
    service: Arc<S>,
    /// Preference persistence
    store: Arc<dyn PreferenceStore>,
    /// Expression and display state
    buffer: InputBuffer,
    /// History sidebar
    history: HistoryPanel,
    /// Theme and sound
    prefs: Preferences,
    /// Keypad arrangement
    layout: Layout,
    /// Whether the settings panel is open
    settings_open: bool,
    /// Channel to send messages to the surface
    tx: mpsc::UnboundedSender<CalculatorMessage>,
    /// Spawned requests report here
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    /// Requests spawned but not yet applied
    in_flight: usize,
    /// False once the user asked to quit
    running: bool,
}

impl<S: EvaluationService + 'static> Calculator<S> {
    /// Create a new Calculator
    pub fn new(
        service: S,
        store: Arc<dyn PreferenceStore>,
        tx: mpsc::UnboundedSender<CalculatorMessage>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            service: Arc::new(service),
            store,
            buffer: InputBuffer::new(),
            history: HistoryPanel::new(),
            prefs: Preferences::default(),
            layout: Layout::Standard,
            settings_open: false,
            tx,
            completion_tx,
            completion_rx,
            in_flight: 0,
            running: true,
        }
    }

    /// Start with the given keypad layout
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// The input buffer
    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// The history sidebar
    pub fn history(&self) -> &HistoryPanel {
        &self.history
    }

    /// Current preferences
    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    /// Current keypad layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether the settings panel is open
    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    /// Requests spawned but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether the session is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start the session: load preferences and announce the initial state
    ///
    /// The service health check runs in the background; an unreachable
    /// service produces a warning once it answers.
    ///
    /// # Errors
    ///
    /// Currently infallible; a failed preference load falls back to
    /// defaults.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.prefs = match self.store.load().await {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load preferences, using defaults");
                Preferences::default()
            }
        };

        tracing::info!(
            service = self.service.name(),
            theme = %self.prefs.theme,
            sound = self.prefs.sound_enabled,
            layout = ?self.layout,
            "Calculator started"
        );

        self.send(CalculatorMessage::Theme {
            theme: self.prefs.theme,
        });
        self.send(CalculatorMessage::Sound {
            enabled: self.prefs.sound_enabled,
        });
        self.send(CalculatorMessage::Layout {
            layout: self.layout,
        });
        self.send_display();
        self.spawn_health_check();

        Ok(())
    }

    /// Handle an event from the surface
    ///
    /// # Errors
    ///
    /// Currently infallible; service and storage failures are reported to
    /// the surface as messages instead.
    pub async fn handle_event(&mut self, event: InputEvent) -> anyhow::Result<()> {
        tracing::trace!(?event, "Handling input event");

        match event {
            InputEvent::Key(key) => {
                // Keypad buttons always click
                self.play_cue();
                self.perform(key.action());
            }
            InputEvent::Action(action) => {
                if action.plays_cue() {
                    self.play_cue();
                }
                self.perform(action);
            }
            InputEvent::HistoryOpened => {
                self.history.open();
                self.send_history_visibility();
                self.spawn_history_request(false);
            }
            InputEvent::HistoryClosed => {
                self.history.close();
                self.send_history_visibility();
            }
            InputEvent::HistoryCleared => self.spawn_history_request(true),
            InputEvent::HistoryCursor(direction) => {
                self.history.move_cursor(direction);
                self.send_history_visibility();
            }
            InputEvent::HistorySelected(index) => self.adopt_history(index),
            InputEvent::HistoryHighlightSelected => {
                let index = self.history.cursor();
                self.adopt_history(index);
            }
            InputEvent::ThemeSelected(theme) => self.set_theme(theme).await,
            InputEvent::SoundToggled(enabled) => {
                self.prefs.sound_enabled = enabled;
                self.persist_preferences().await;
                self.send(CalculatorMessage::Sound { enabled });
            }
            InputEvent::ScientificToggled(scientific) => {
                self.layout = Layout::from_scientific(scientific);
                self.send(CalculatorMessage::Layout {
                    layout: self.layout,
                });
            }
            InputEvent::SettingsToggled => {
                self.settings_open = !self.settings_open;
                self.send(CalculatorMessage::SettingsVisibility {
                    visible: self.settings_open,
                });
            }
            InputEvent::SettingsDismissed => {
                if self.settings_open {
                    self.settings_open = false;
                    self.send(CalculatorMessage::SettingsVisibility { visible: false });
                }
            }
            InputEvent::QuitRequested => {
                tracing::info!("Quit requested");
                self.running = false;
                self.send(CalculatorMessage::Quit);
            }
        }

        Ok(())
    }

    /// Apply every request outcome that has arrived
    ///
    /// Returns true if anything was applied.
    pub fn poll_requests(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion);
            applied = true;
        }
        applied
    }

    /// Wait for the next request outcome and apply it
    ///
    /// Returns false immediately when nothing is in flight.
    pub async fn wait_for_request(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Run a buffer action
    fn perform(&mut self, action: Action) {
        if let Some(expression) = self.buffer.apply(&action) {
            self.spawn_evaluation(expression);
        } else {
            self.send_display();
        }
    }

    /// Send an expression to the service without waiting for the answer
    fn spawn_evaluation(&mut self, expression: String) {
        let request_id = RequestId::new();
        tracing::debug!(%request_id, expression = %expression, "Evaluating");

        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = service.calculate(&expression).await;
            let _ = tx.send(Completion::Evaluation {
                request_id,
                expression,
                outcome,
            });
        });
    }

    /// Fetch (or clear) history without waiting for the answer
    fn spawn_history_request(&mut self, clear: bool) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = if clear {
                service.clear_history().await
            } else {
                service.history().await
            };
            let _ = tx.send(Completion::History {
                cleared: clear,
                outcome,
            });
        });
    }

    fn spawn_health_check(&mut self) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let reachable = service.health_check().await;
            let _ = tx.send(Completion::Health { reachable });
        });
    }

    fn apply_completion(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match completion {
            Completion::Evaluation {
                request_id,
                expression,
                outcome,
            } => match outcome {
                Ok(evaluation) => {
                    tracing::debug!(
                        %request_id,
                        expression = %expression,
                        result = %evaluation.result,
                        "Evaluation succeeded"
                    );
                    self.buffer
                        .evaluation_succeeded(&expression, &evaluation.result);
                    self.history.replace(evaluation.history);
                    self.send_display();
                    self.send_history();
                }
                Err(e) => {
                    tracing::warn!(%request_id, expression = %expression, error = %e, "Evaluation failed");
                    self.buffer.evaluation_failed();
                    self.send_display();
                }
            },
            Completion::History { cleared, outcome } => match outcome {
                Ok(entries) => {
                    tracing::debug!(count = entries.len(), cleared, "History updated");
                    self.history.replace(entries);
                    self.send_history();
                }
                Err(e) => {
                    tracing::warn!(error = %e, cleared, "History request failed");
                    let message = if cleared {
                        "Could not clear history"
                    } else {
                        "Could not load history"
                    };
                    self.notify(NotifyLevel::Warning, message);
                }
            },
            Completion::Health { reachable: true } => {
                tracing::debug!(service = self.service.name(), "Evaluation service reachable");
            }
            Completion::Health { reachable: false } => {
                tracing::warn!(service = self.service.name(), "Evaluation service not reachable");
                self.notify(
                    NotifyLevel::Warning,
                    "Evaluation service not reachable - calculations will fail until it is",
                );
            }
        }
    }

    fn adopt_history(&mut self, index: usize) {
        let Some(entry) = self.history.get(index).cloned() else {
            tracing::debug!(index, "No history entry at index");
            return;
        };
        self.buffer.adopt_history_result(&entry);
        self.history.close();
        self.send_display();
        self.send_history_visibility();
    }

    async fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        self.persist_preferences().await;
        self.send(CalculatorMessage::Theme { theme });
    }

    async fn persist_preferences(&self) {
        if let Err(e) = self.store.save(&self.prefs).await {
            tracing::warn!(error = %e, "Failed to save preferences");
            self.notify(NotifyLevel::Warning, "Could not save preferences");
        }
    }

    fn play_cue(&self) {
        if self.prefs.sound_enabled {
            self.send(CalculatorMessage::PlayCue {
                cue: self.prefs.theme.cue(),
            });
        }
    }

    fn send_display(&self) {
        self.send(CalculatorMessage::Display(self.buffer.snapshot()));
    }

    fn send_history(&self) {
        self.send(CalculatorMessage::History {
            entries: self.history.entries().to_vec(),
        });
    }

    fn send_history_visibility(&self) {
        self.send(CalculatorMessage::HistoryVisibility {
            visible: self.history.is_visible(),
            cursor: self.history.cursor(),
        });
    }

    /// Send notification
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(CalculatorMessage::Notify {
            level,
            message: message.to_string(),
        });
    }

    /// Send a message to the surface
    fn send(&self, msg: CalculatorMessage) {
        if let Err(e) = self.tx.send(msg) {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
