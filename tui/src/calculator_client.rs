//! Calculator Client
//!
//! Thin wrapper around the Calculator for TUI integration.
//! This client embeds the Calculator directly (no network between the two)
//! and provides a convenient interface for sending events and receiving
//! messages.
//!
//! The TUI is a "thin client" - it doesn't contain any calculator logic.
//! The TUI's job is:
//! 1. Convert terminal events to InputEvents
//! 2. Send InputEvents to the Calculator
//! 3. Receive CalculatorMessages
//! 4. Render display state based on messages

use std::sync::Arc;

use tokio::sync::mpsc;

use calc_controller::{
    Calculator, CalculatorConfig, CalculatorMessage, EvaluationService, FilePreferenceStore,
    HttpEvaluationService, InputEvent, Key, Layout, MemoryPreferenceStore, PreferenceStore,
};

/// Client for communicating with the embedded Calculator
pub struct CalculatorClient<S: EvaluationService + 'static = HttpEvaluationService> {
    /// The embedded Calculator instance
    calculator: Calculator<S>,
    /// Receiver for messages from the Calculator
    rx: mpsc::UnboundedReceiver<CalculatorMessage>,
}

impl CalculatorClient<HttpEvaluationService> {
    /// Build a client talking HTTP to the configured service
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &CalculatorConfig) -> anyhow::Result<Self> {
        let service =
            HttpEvaluationService::with_timeout(config.service_url.clone(), config.request_timeout)?;

        let store: Arc<dyn PreferenceStore> = match config.preferences_path {
            Some(ref path) => Arc::new(FilePreferenceStore::new(path.clone())),
            None => {
                tracing::info!("No preference path, preferences will not persist");
                Arc::new(MemoryPreferenceStore::new())
            }
        };

        Ok(Self::new(
            service,
            store,
            Layout::from_scientific(config.scientific),
        ))
    }
}

impl<S: EvaluationService + 'static> CalculatorClient<S> {
    /// Create a client around any evaluation service
    pub fn new(service: S, store: Arc<dyn PreferenceStore>, layout: Layout) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let calculator = Calculator::new(service, store, tx).with_layout(layout);
        Self { calculator, rx }
    }

    /// Start the Calculator (load preferences, announce state)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.calculator.start().await
    }

    /// Send an input event to the Calculator
    pub async fn send_event(&mut self, event: InputEvent) -> anyhow::Result<()> {
        self.calculator.handle_event(event).await
    }

    /// Press a keypad button
    pub async fn press(&mut self, key: Key) -> anyhow::Result<()> {
        self.send_event(InputEvent::Key(key)).await
    }

    /// Notify the Calculator that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.send_event(InputEvent::QuitRequested).await
    }

    /// Apply finished service requests (must be called regularly)
    pub fn poll_requests(&mut self) -> bool {
        self.calculator.poll_requests()
    }

    /// Wait for the next service request to finish
    pub async fn wait_for_request(&mut self) -> bool {
        self.calculator.wait_for_request().await
    }

    /// Receive all pending messages from the Calculator (non-blocking)
    pub fn recv_all(&mut self) -> Vec<CalculatorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Whether the Calculator session is still running
    pub fn is_running(&self) -> bool {
        self.calculator.is_running()
    }

    /// Read-only access to the embedded Calculator
    pub fn calculator(&self) -> &Calculator<S> {
        &self.calculator
    }
}
