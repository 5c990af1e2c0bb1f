//! Terminal user interface for pomidor.
//!
//! A full-screen timer window built with ratatui and crossterm. The
//! event loop cooperatively interleaves key handling with the
//! controller's scheduled ticks; nothing runs on another thread.

mod app;
mod event;
mod ui;

pub use app::{App, Mode, SettingsForm, ViewState};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::PomidorError;

/// Upper bound on how long the loop blocks waiting for input.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(mut app: App) -> Result<(), PomidorError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomidorError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| PomidorError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomidorError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), PomidorError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomidorError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events, waking in time for the next scheduled tick
        let timeout = poll_timeout(app.controller.next_deadline());
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => break,
                event::Action::ToggleTimer => app.toggle_timer(),
                event::Action::Reset => app.reset_timer(),
                event::Action::OpenSettings => app.open_settings(),
                event::Action::ToggleAutoStart => app.toggle_auto_start(),
                event::Action::ShowHelp => app.show_help(),
                event::Action::SubmitSettings => app.submit_settings(),
                event::Action::CloseSettings => app.close_settings(),
                event::Action::DismissError => app.dismiss_error(),
                event::Action::FormNext => app.form_next(),
                event::Action::FormPrevious => app.form_previous(),
                event::Action::FormChar(c) => app.form_input(c),
                event::Action::FormBackspace => app.form_backspace(),
            }
        }

        // Dispatch a due tick or auto-start
        app.controller.poll_due(Instant::now(), &mut app.view);
    }

    Ok(())
}

/// Size the poll timeout so a scheduled tick fires on time.
fn poll_timeout(deadline: Option<Instant>) -> Duration {
    deadline.map_or(MAX_POLL, |due| {
        due.saturating_duration_since(Instant::now()).min(MAX_POLL)
    })
}
