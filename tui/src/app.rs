//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - CalculatorClient for all calculator behaviour
//! - DisplayState for rendering
//!
//! Each turn of the loop converts terminal input to InputEvents, lets the
//! Calculator apply any finished service requests, folds the resulting
//! CalculatorMessages into DisplayState, and renders.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::style::Print;
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;

use calc_controller::{EvaluationService, HttpEvaluationService, InputEvent, NotifyLevel};

use crate::calculator_client::CalculatorClient;
use crate::compositor::{Compositor, LayerId};
use crate::display::DisplayState;
use crate::keymap::{map_key, KeyContext};
use crate::theme::{Palette, WARNING_AMBER};
use crate::widgets::keypad::key_at;
use crate::widgets::settings_panel::{SETTINGS_HEIGHT, SETTINGS_WIDTH};
use crate::widgets::{DisplayPanel, HistorySidebar, HistorySidebarState, Keypad, SettingsPanel};

/// Display panel height (lines, including borders)
const DISPLAY_HEIGHT: u16 = 4;

/// History sidebar width (columns, including borders)
const HISTORY_WIDTH: u16 = 34;

/// Frame interval (~30 FPS is plenty for a keypad)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Status bar hints when no notification is showing
const STATUS_HINTS: &str = " F2 history │ F3 settings │ F4 scientific │ Ctrl+Q quit";

/// Main application state
pub struct App<S: EvaluationService + 'static = HttpEvaluationService> {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Calculator Integration ===
    /// Client for the embedded Calculator
    client: CalculatorClient<S>,
    /// Display state derived from CalculatorMessages
    display: DisplayState,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Row-to-entry map of the last rendered history sidebar
    history_state: HistorySidebarState,

    // === Misc State ===
    /// Last frame time (for timers)
    last_frame: Instant,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    display: LayerId,
    keypad: LayerId,
    status: LayerId,
    history: LayerId,
    settings: LayerId,
}

impl<S: EvaluationService + 'static> App<S> {
    /// Create a new App sized to the current terminal
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be read.
    pub fn new(client: CalculatorClient<S>) -> anyhow::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::with_size(client, width, height))
    }

    /// Create a new App for a terminal of the given size
    pub fn with_size(client: CalculatorClient<S>, width: u16, height: u16) -> Self {
        let area = Rect::new(0, 0, width, height);
        let mut compositor = Compositor::new(area);

        // Panels overlay the keypad; settings sit above everything
        let display = compositor.create_layer(Rect::default(), 0);
        let keypad = compositor.create_layer(Rect::default(), 0);
        let status = compositor.create_layer(Rect::default(), 10);
        let history = compositor.create_layer(Rect::default(), 20);
        let settings = compositor.create_layer(Rect::default(), 30);
        compositor.set_visible(history, false);
        compositor.set_visible(settings, false);

        let mut app = Self {
            running: true,
            client,
            display: DisplayState::new(),
            compositor,
            layers: AppLayers {
                display,
                keypad,
                status,
                history,
                settings,
            },
            history_state: HistorySidebarState::default(),
            last_frame: Instant::now(),
            size: (width, height),
        };
        app.place_layers();
        app
    }

    /// Start the embedded Calculator
    ///
    /// # Errors
    ///
    /// Propagates Calculator start errors.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.client.start().await?;
        self.process_calculator_messages();
        Ok(())
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame = tokio::time::interval(FRAME_DURATION);
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.start().await?;
        self.draw(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event).await,
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => {
                            tracing::info!("Terminal event stream closed");
                            self.running = false;
                        }
                    }
                }

                // Frame tick - pick up service responses and timers
                _ = frame.tick() => {}
            }

            self.tick();

            if self.display.take_cues() > 0 {
                ring_bell();
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    /// One frame of non-input work: apply responses, drain messages, timers
    pub fn tick(&mut self) {
        self.client.poll_requests();
        self.process_calculator_messages();
        self.update();
    }

    /// Dispatch a terminal event
    pub async fn handle_terminal_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Whether the app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The embedded client
    pub fn client_mut(&mut self) -> &mut CalculatorClient<S> {
        &mut self.client
    }

    /// Process all pending messages from the Calculator
    fn process_calculator_messages(&mut self) {
        for msg in self.client.recv_all() {
            self.display.apply_message(msg);
        }
        if self.display.quit || !self.client.is_running() {
            self.running = false;
        }
    }

    /// Send an event, logging failures
    async fn send(&mut self, event: InputEvent) {
        if let Err(e) = self.client.send_event(event).await {
            tracing::warn!("Failed to send event to calculator: {}", e);
        }
        self.process_calculator_messages();
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key, KeyContext::from(&self.display)) {
            Some(event) => self.send(event).await,
            None => tracing::trace!(?key, "Unbound key"),
        }
    }

    /// Handle mouse input
    async fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (x, y) = (mouse.column, mouse.row);
        let hit = self.compositor.layer_at(x, y);

        if self.display.settings_visible {
            if hit == Some(self.layers.settings) {
                let local_y = self
                    .compositor
                    .local_point(self.layers.settings, x, y)
                    .map(|(_, ly)| ly);
                if let Some(event) = local_y.and_then(|ly| {
                    SettingsPanel::click(self.display.sound_enabled, self.display.layout, ly)
                }) {
                    self.send(event).await;
                }
                return;
            }
            // Dismiss, then let the click reach whatever sits underneath
            self.send(InputEvent::SettingsDismissed).await;
        }

        if hit == Some(self.layers.history) {
            let entry = self
                .compositor
                .local_point(self.layers.history, x, y)
                .and_then(|(_, ly)| self.history_state.entry_at(ly));
            if let Some(index) = entry {
                self.send(InputEvent::HistorySelected(index)).await;
            }
            return;
        }

        if hit == Some(self.layers.keypad) {
            if let Some(bounds) = self.compositor.layer_bounds(self.layers.keypad) {
                let local = Rect::new(0, 0, bounds.width, bounds.height);
                if let Some((lx, ly)) = self.compositor.local_point(self.layers.keypad, x, y) {
                    if let Some(key) = key_at(self.display.layout, local, lx, ly) {
                        self.send(InputEvent::Key(key)).await;
                    }
                }
            }
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));
        self.place_layers();
    }

    /// Position every layer for the current terminal size
    fn place_layers(&mut self) {
        let (width, height) = self.size;
        let body_height = height.saturating_sub(1);
        let display_height = DISPLAY_HEIGHT.min(body_height);

        self.compositor
            .place_layer(self.layers.display, Rect::new(0, 0, width, display_height));
        self.compositor.place_layer(
            self.layers.keypad,
            Rect::new(
                0,
                display_height,
                width,
                body_height.saturating_sub(display_height),
            ),
        );
        self.compositor
            .place_layer(self.layers.status, Rect::new(0, body_height, width, 1));

        let history_width = HISTORY_WIDTH.min(width);
        self.compositor.place_layer(
            self.layers.history,
            Rect::new(width - history_width, 0, history_width, body_height),
        );

        let settings_width = SETTINGS_WIDTH.min(width);
        let settings_height = SETTINGS_HEIGHT.min(body_height);
        self.compositor.place_layer(
            self.layers.settings,
            Rect::new(
                (width - settings_width) / 2,
                (body_height - settings_height) / 2,
                settings_width,
                settings_height,
            ),
        );
    }

    /// Update timers and panel visibility
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update(delta);

        self.compositor
            .set_visible(self.layers.history, self.display.history_visible);
        self.compositor
            .set_visible(self.layers.settings, self.display.settings_visible);
    }

    /// Render every layer and draw the composite
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be drawn to.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let palette = Palette::for_theme(self.display.theme);

        self.render_display(palette);
        self.render_keypad(palette);
        self.render_status(palette);
        self.render_history(palette);
        self.render_settings(palette);

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let Some(cell) = output.cell((x, y)) {
                        buf[(x, y)] = cell.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Render display layer
    fn render_display(&mut self, palette: Palette) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.display) {
            buf.reset();
            let area = buf.area;
            DisplayPanel::new(&self.display.display, palette).render(area, buf);
        }
    }

    /// Render keypad layer
    fn render_keypad(&mut self, palette: Palette) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.keypad) {
            buf.reset();
            let area = buf.area;
            Keypad::new(self.display.layout, palette).render(area, buf);
        }
    }

    /// Render status bar
    fn render_status(&mut self, palette: Palette) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            buf.set_style(area, palette.base());

            let (text, style) = match self.display.notification {
                Some(ref n) => {
                    let fg = match n.level {
                        NotifyLevel::Warning => WARNING_AMBER,
                        NotifyLevel::Info => palette.accent,
                    };
                    (format!(" {}", n.message), Style::default().fg(fg).bg(palette.background))
                }
                None => (
                    STATUS_HINTS.to_string(),
                    Style::default().fg(palette.dim).bg(palette.background),
                ),
            };
            buf.set_stringn(area.x, area.y, text, area.width as usize, style);
        }
    }

    /// Render history sidebar layer
    fn render_history(&mut self, palette: Palette) {
        let visible = self.display.history_visible;
        self.history_state.cursor = self.display.history_cursor;

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.history) {
            buf.reset();
            if visible {
                let area = buf.area;
                HistorySidebar::new(&self.display.history, palette).render(
                    area,
                    buf,
                    &mut self.history_state,
                );
            }
        }
    }

    /// Render settings panel layer
    fn render_settings(&mut self, palette: Palette) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.settings) {
            buf.reset();
            if self.display.settings_visible {
                let area = buf.area;
                SettingsPanel::new(
                    self.display.theme,
                    self.display.sound_enabled,
                    self.display.layout,
                    palette,
                )
                .render(area, buf);
            }
        }
    }
}

/// Ring the terminal bell for a key-click cue
fn ring_bell() {
    if let Err(e) = execute!(io::stdout(), Print('\x07')) {
        tracing::debug!("Failed to ring bell: {}", e);
    }
}
