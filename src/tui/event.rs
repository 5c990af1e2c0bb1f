//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::error::PomidorError;
use crate::tui::app::{App, Mode};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Press the start/pause button.
    ToggleTimer,
    /// Reset the timer.
    Reset,
    /// Open the settings form.
    OpenSettings,
    /// Flip the auto-start flag.
    ToggleAutoStart,
    /// Show the key reference.
    ShowHelp,
    /// Submit the settings form.
    SubmitSettings,
    /// Close the settings form without saving.
    CloseSettings,
    /// Acknowledge a validation error.
    DismissError,
    /// Focus the next form field.
    FormNext,
    /// Focus the previous form field.
    FormPrevious,
    /// Type into the focused form field.
    FormChar(char),
    /// Backspace in the focused form field.
    FormBackspace,
}

/// Poll for terminal events, waiting at most `timeout`.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling or reading fails.
pub fn handle_events(app: &App, timeout: Duration) -> Result<Option<Action>, PomidorError> {
    if event::poll(timeout)
        .map_err(|e| PomidorError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| PomidorError::Terminal(format!("Event read failed: {e}")))?
        {
            // Handle Ctrl+C everywhere
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }

            return Ok(match &app.mode {
                Mode::Main => main_key(key),
                Mode::Settings(form) => settings_key(key, form.error.is_some()),
            });
        }
    }

    Ok(None)
}

/// Key bindings on the timer screen.
fn main_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char(' ' | 's') => Some(Action::ToggleTimer),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('o') => Some(Action::OpenSettings),
        KeyCode::Char('a') => Some(Action::ToggleAutoStart),
        KeyCode::Char('?') => Some(Action::ShowHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key bindings inside the settings form.
///
/// Letters go into the focused field, so navigation sticks to
/// arrow keys and Tab. While a validation error is showing, any key
/// acknowledges it.
fn settings_key(key: KeyEvent, error_shown: bool) -> Option<Action> {
    if error_shown {
        return Some(Action::DismissError);
    }

    match key.code {
        KeyCode::Esc => Some(Action::CloseSettings),
        KeyCode::Enter => Some(Action::SubmitSettings),
        KeyCode::Up => Some(Action::FormPrevious),
        KeyCode::Down | KeyCode::Tab => Some(Action::FormNext),
        KeyCode::Backspace => Some(Action::FormBackspace),
        KeyCode::Char(c) => Some(Action::FormChar(c)),
        _ => None,
    }
}
