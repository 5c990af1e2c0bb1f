//! Application state for the TUI.

use chrono::Duration;

use crate::config::SettingsDraft;
use crate::notify::DesktopNotifier;
use crate::session::{format_mmss, SessionController, UserInterface};

/// Names of the editable settings fields, in form order.
const FIELD_NAMES: [&str; 6] = [
    "work_duration",
    "short_break",
    "long_break",
    "sessions_before_long_break",
    "notification_sound",
    "auto_start",
];

/// Render state fed by the controller callbacks.
///
/// The controller pushes text through [`UserInterface`]; the renderer
/// only ever reads these cached strings.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Countdown display, always `MM:SS`.
    pub timer_text: String,
    /// Phase label: "Work Session {n}", "Short Break", "Long Break".
    pub phase_label: String,
    /// Start-button label: "Start", "Pause", "Resume".
    pub start_button_label: String,
}

impl UserInterface for ViewState {
    fn refresh_timer_text(&mut self, minutes: u32, seconds: u32) {
        self.timer_text = format_mmss(Duration::seconds(i64::from(minutes * 60 + seconds)));
    }

    fn refresh_phase_label(&mut self, text: &str) {
        self.phase_label = text.to_string();
    }

    fn refresh_start_button_label(&mut self, text: &str) {
        self.start_button_label = text.to_string();
    }
}

/// One editable field in the settings form.
#[derive(Debug, Clone)]
pub struct FormField {
    /// Configuration field name.
    pub name: &'static str,
    /// Raw text being edited.
    pub value: String,
}

/// Editable settings form state.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    /// The six fields, in configuration order.
    pub fields: Vec<FormField>,
    /// Index of the focused field.
    pub selected: usize,
    /// Validation error awaiting acknowledgment, if any.
    pub error: Option<String>,
}

impl SettingsForm {
    /// Pre-fill the form from a draft of the current configuration.
    #[must_use]
    pub fn from_draft(draft: &SettingsDraft) -> Self {
        let values = [
            draft.work_duration.clone(),
            draft.short_break.clone(),
            draft.long_break.clone(),
            draft.sessions_before_long_break.clone(),
            draft.notification_sound.clone(),
            draft.auto_start.clone(),
        ];
        let fields = FIELD_NAMES
            .into_iter()
            .zip(values)
            .map(|(name, value)| FormField { name, value })
            .collect();

        Self {
            fields,
            selected: 0,
            error: None,
        }
    }

    /// Collect the field values back into a draft for parsing.
    #[must_use]
    pub fn draft(&self) -> SettingsDraft {
        SettingsDraft {
            work_duration: self.fields[0].value.clone(),
            short_break: self.fields[1].value.clone(),
            long_break: self.fields[2].value.clone(),
            sessions_before_long_break: self.fields[3].value.clone(),
            notification_sound: self.fields[4].value.clone(),
            auto_start: self.fields[5].value.clone(),
        }
    }

    /// Move focus to the next field, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    /// Move focus to the previous field, wrapping.
    pub fn select_previous(&mut self) {
        self.selected = if self.selected == 0 {
            self.fields.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Append a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        self.fields[self.selected].value.push(c);
    }

    /// Delete the last character of the focused field.
    pub fn pop_char(&mut self) {
        self.fields[self.selected].value.pop();
    }
}

/// Which screen has input focus.
#[derive(Debug)]
pub enum Mode {
    /// The timer screen.
    Main,
    /// The settings form popup.
    Settings(SettingsForm),
}

/// Application state.
pub struct App {
    /// The timer core.
    pub controller: SessionController<DesktopNotifier>,
    /// Cached render state fed by controller callbacks.
    pub view: ViewState,
    /// Input focus.
    pub mode: Mode,
    /// Status message to display.
    pub status: Option<String>,
}

impl App {
    /// Create the app, pushing the controller's initial state into the
    /// view. A startup warning (e.g. a recovered config file) lands in
    /// the status line.
    #[must_use]
    pub fn new(
        controller: SessionController<DesktopNotifier>,
        warning: Option<String>,
    ) -> Self {
        let mut view = ViewState::default();
        controller.sync_ui(&mut view);

        Self {
            controller,
            view,
            mode: Mode::Main,
            status: warning.or_else(|| Some("Press ? for help".to_string())),
        }
    }

    /// Start-button toggle.
    pub fn toggle_timer(&mut self) {
        self.controller.start_or_pause(&mut self.view);
        self.status = None;
    }

    /// Reset to the first work session.
    pub fn reset_timer(&mut self) {
        self.controller.reset(&mut self.view);
        self.status = Some("Timer reset".to_string());
    }

    /// Open the settings form pre-filled with the current values.
    ///
    /// An armed auto-start is cancelled so the countdown cannot start
    /// underneath the open form.
    pub fn open_settings(&mut self) {
        self.controller.cancel_auto_start();
        let draft = SettingsDraft::from_config(self.controller.config());
        self.mode = Mode::Settings(SettingsForm::from_draft(&draft));
    }

    /// Close the settings form without saving.
    pub fn close_settings(&mut self) {
        self.mode = Mode::Main;
        self.status = Some("Settings unchanged".to_string());
    }

    /// Submit the settings form.
    ///
    /// On validation failure the form stays open with the entered text
    /// intact and the error awaiting acknowledgment; nothing is saved.
    pub fn submit_settings(&mut self) {
        let Mode::Settings(form) = &mut self.mode else {
            return;
        };
        let draft = form.draft();

        match self.controller.apply_settings(&draft, &mut self.view) {
            Ok(()) => {
                self.mode = Mode::Main;
                self.status = Some("Settings saved".to_string());
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    /// Acknowledge a validation error, returning to the form.
    pub fn dismiss_error(&mut self) {
        if let Mode::Settings(form) = &mut self.mode {
            form.error = None;
        }
    }

    /// Flip the auto-start flag and persist it.
    pub fn toggle_auto_start(&mut self) {
        let enabled = !self.controller.config().auto_start;
        match self.controller.set_auto_start(enabled) {
            Ok(()) => {
                self.status = Some(if enabled {
                    "Auto-start enabled".to_string()
                } else {
                    "Auto-start disabled".to_string()
                });
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Show the key reference in the status line.
    pub fn show_help(&mut self) {
        self.status = Some(
            "space:start/pause | r:reset | o:settings | a:auto-start | q:quit".to_string(),
        );
    }

    /// Move form focus down.
    pub fn form_next(&mut self) {
        if let Mode::Settings(form) = &mut self.mode {
            form.select_next();
        }
    }

    /// Move form focus up.
    pub fn form_previous(&mut self) {
        if let Mode::Settings(form) = &mut self.mode {
            form.select_previous();
        }
    }

    /// Type into the focused form field.
    pub fn form_input(&mut self, c: char) {
        if let Mode::Settings(form) = &mut self.mode {
            form.push_char(c);
        }
    }

    /// Backspace in the focused form field.
    pub fn form_backspace(&mut self) {
        if let Mode::Settings(form) = &mut self.mode {
            form.pop_char();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::config::Config;

    fn app() -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.json");
        let controller =
            SessionController::new(Config::default(), config_file, DesktopNotifier);
        (App::new(controller, None), temp_dir)
    }

    #[test]
    fn test_initial_view_state() {
        let (app, _dir) = app();

        assert_eq!(app.view.timer_text, "25:00");
        assert_eq!(app.view.phase_label, "Work Session 1");
        assert_eq!(app.view.start_button_label, "Start");
    }

    #[test]
    fn test_startup_warning_lands_in_status() {
        let temp_dir = TempDir::new().unwrap();
        let controller = SessionController::new(
            Config::default(),
            temp_dir.path().join("config.json"),
            DesktopNotifier,
        );
        let app = App::new(controller, Some("defaults restored".to_string()));

        assert_eq!(app.status.as_deref(), Some("defaults restored"));
    }

    #[test]
    fn test_settings_form_round_trip() {
        let (mut app, _dir) = app();

        app.open_settings();
        let Mode::Settings(form) = &app.mode else {
            panic!("settings form should be open");
        };
        assert_eq!(form.fields.len(), 6);
        assert_eq!(form.fields[0].name, "work_duration");
        assert_eq!(form.fields[0].value, "25");
        assert_eq!(form.fields[5].value, "false");
    }

    #[test]
    fn test_form_editing() {
        let (mut app, _dir) = app();
        app.open_settings();

        app.form_backspace();
        app.form_backspace();
        app.form_input('3');
        app.form_input('0');
        app.submit_settings();

        assert!(matches!(app.mode, Mode::Main));
        assert_eq!(app.controller.config().work_duration, 30);
        assert_eq!(app.view.timer_text, "30:00");
    }

    #[test]
    fn test_invalid_submission_keeps_form_and_entries() {
        let (mut app, _dir) = app();
        app.open_settings();

        app.form_input('x');
        app.submit_settings();

        let Mode::Settings(form) = &app.mode else {
            panic!("form should stay open on validation failure");
        };
        assert!(form.error.is_some());
        assert_eq!(form.fields[0].value, "25x");
        assert_eq!(app.controller.config().work_duration, 25);

        app.dismiss_error();
        let Mode::Settings(form) = &app.mode else {
            panic!("form should still be open");
        };
        assert!(form.error.is_none());
        assert_eq!(form.fields[0].value, "25x");
    }

    #[test]
    fn test_form_navigation_wraps() {
        let (mut app, _dir) = app();
        app.open_settings();

        app.form_previous();
        let Mode::Settings(form) = &app.mode else {
            panic!("settings form should be open");
        };
        assert_eq!(form.selected, 5);

        app.form_next();
        let Mode::Settings(form) = &app.mode else {
            panic!("settings form should be open");
        };
        assert_eq!(form.selected, 0);
    }

    #[test]
    fn test_open_settings_cancels_pending_auto_start() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.auto_start = true;
        let controller = SessionController::new(
            config,
            temp_dir.path().join("config.json"),
            DesktopNotifier,
        );
        let mut app = App::new(controller, None);

        app.controller.complete_phase(&mut app.view);
        assert!(app.controller.next_deadline().is_some());

        app.open_settings();
        assert!(app.controller.next_deadline().is_none());

        let later = std::time::Instant::now() + std::time::Duration::from_secs(5);
        app.controller.poll_due(later, &mut app.view);
        assert!(!app.controller.is_running());
    }

    #[test]
    fn test_toggle_auto_start_persists() {
        let (mut app, dir) = app();

        app.toggle_auto_start();

        assert!(app.controller.config().auto_start);
        let contents =
            std::fs::read_to_string(dir.path().join("config.json")).unwrap();
        assert!(contents.contains("\"auto_start\": true"));
    }

    #[test]
    fn test_close_settings_discards_edits() {
        let (mut app, _dir) = app();
        app.open_settings();
        app.form_input('9');
        app.close_settings();

        assert!(matches!(app.mode, Mode::Main));
        assert_eq!(app.controller.config().work_duration, 25);
    }
}
