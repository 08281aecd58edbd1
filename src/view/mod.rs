//! TUI rendering and terminal management (impure shell)

pub mod cells;
pub mod constants;
pub mod layout;
pub mod styles;

pub use layout::{render_layout, ScreenAreas};
pub use styles::{ColorConfig, Theme, ThemeName};

use crate::config::keybindings::KeyBindings;
use crate::model::AppError;
use crate::source::PageDelivery;
use crate::state::{AppState, PaginationOutcome};
use constants::FALLBACK_WIDTH;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    /// Pages answered by the delegate, drained on every tick.
    pages: Option<Receiver<PageDelivery>>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        pages: Receiver<PageDelivery>,
        key_bindings: KeyBindings,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings,
            pages: Some(pages),
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user closes the screen. Wakes on input, resize, or the timer;
    /// timer ticks drain delivered pages and redraw only when something arrived.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Page delivery polling interval
        const TIMER_INTERVAL: Duration = Duration::from_millis(100);

        self.draw()?;

        loop {
            if event::poll(TIMER_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                        continue;
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        self.draw()?;
                        continue;
                    }
                    _ => {}
                }
            }

            if self.drain_pages() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a key event. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Key release/repeat events are reported on some platforms
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if let Some(action) = self.key_bindings.get(key) {
            debug!(?action, "Key action");
            let outcomes = self.app_state.handle_action(action);
            log_outcomes(&outcomes);
        }

        self.app_state.should_quit
    }

    /// Apply every page delivered since the last tick. Returns true if any arrived.
    fn drain_pages(&mut self) -> bool {
        let Some(receiver) = self.pages.as_ref() else {
            return false;
        };

        let mut deliveries = Vec::new();
        let disconnected = loop {
            match receiver.try_recv() {
                Ok(delivery) => deliveries.push(delivery),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };
        if disconnected {
            warn!("Page source disconnected");
            self.pages = None;
        }

        let changed = !deliveries.is_empty();
        for delivery in deliveries {
            match delivery {
                PageDelivery::Page(page) => {
                    let outcomes = self.app_state.append_page(page);
                    log_outcomes(&outcomes);
                }
                PageDelivery::Missing(token) => self.app_state.page_unavailable(token),
            }
        }
        changed
    }

    /// Size the timeline to the current terminal, then render the frame.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let width = if size.width > 0 {
            size.width
        } else {
            FALLBACK_WIDTH
        };
        let areas = ScreenAreas::split(Rect::new(0, 0, width, size.height));
        let outcomes = self.app_state.set_viewport(areas.timeline_viewport());
        log_outcomes(&outcomes);

        self.terminal.draw(|frame| {
            layout::render_layout(frame, &self.app_state);
        })?;

        Ok(())
    }
}

fn log_outcomes(outcomes: &[PaginationOutcome]) {
    if !outcomes.is_empty() {
        debug!(?outcomes, "Visibility signals");
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization so a `TestBackend` can be used.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        pages: Option<Receiver<PageDelivery>>,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            pages,
        }
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Drain delivered pages as a timer tick would.
    pub(crate) fn tick_test(&mut self) -> bool {
        self.drain_pages()
    }

    /// Render a single frame to the backend.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal on exit even
/// when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    app_state: AppState,
    pages: Receiver<PageDelivery>,
    key_bindings: KeyBindings,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, pages, key_bindings)?;

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
