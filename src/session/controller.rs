//! The session controller: phase sequencing, countdown, persistence.
//!
//! Owns all timer state and the configuration, drives the UI refresh
//! callbacks after every state change, and schedules its own ticks.
//! Single-threaded by design: scheduled tasks are dispatched by the
//! event loop through [`SessionController::poll_due`], never in
//! parallel with other controller logic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{Config, SettingsDraft};
use crate::error::PomidorError;
use crate::notify::NotificationSink;
use crate::session::phase::Phase;
use crate::session::schedule::{Task, TickScheduler};
use crate::session::timer::Countdown;

/// Delay before a chained tick or an auto-started phase fires.
const TICK_DELAY: Duration = Duration::from_secs(1);

/// Rendering callbacks the controller drives after every state change.
pub trait UserInterface {
    /// Update the countdown display. Fields are zero-padded to two digits.
    fn refresh_timer_text(&mut self, minutes: u32, seconds: u32);

    /// Update the phase label: "Work Session {n}", "Short Break", or
    /// "Long Break".
    fn refresh_phase_label(&mut self, text: &str);

    /// Update the start-button label: "Start", "Pause", or "Resume".
    fn refresh_start_button_label(&mut self, text: &str);
}

/// Owns timer state, the phase state machine, and the configuration.
pub struct SessionController<N: NotificationSink> {
    config: Config,
    config_file: PathBuf,
    phase: Phase,
    current_session: u32,
    countdown: Countdown,
    running: bool,
    scheduler: TickScheduler,
    /// Bumped on every cancellation; stale scheduled tasks are
    /// discarded when their stamp no longer matches.
    epoch: u64,
    notifier: N,
}

impl<N: NotificationSink> SessionController<N> {
    /// Create a controller seeded for the first work session.
    pub fn new(config: Config, config_file: PathBuf, notifier: N) -> Self {
        let countdown = Countdown::from_minutes(config.work_duration);
        Self {
            config,
            config_file,
            phase: Phase::WorkSession,
            current_session: 1,
            countdown,
            running: false,
            scheduler: TickScheduler::default(),
            epoch: 0,
            notifier,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current work-session counter (1-based).
    #[must_use]
    pub const fn current_session(&self) -> u32 {
        self.current_session
    }

    /// Whether the countdown is ticking.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds remaining in the current phase.
    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.countdown.remaining_seconds()
    }

    /// Elapsed fraction of the current phase (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.countdown.progress()
    }

    /// Push the full current state through the UI callbacks.
    pub fn sync_ui(&self, ui: &mut impl UserInterface) {
        let (minutes, seconds) = self.countdown.clock();
        ui.refresh_timer_text(minutes, seconds);
        ui.refresh_phase_label(&self.phase.label(self.current_session));
        ui.refresh_start_button_label(self.button_label());
    }

    /// Begin or resume the countdown. Idempotent while running.
    ///
    /// This is the direct start used by auto-start; it never goes
    /// through the button toggle.
    pub fn start(&mut self, ui: &mut impl UserInterface) {
        if self.running {
            return;
        }
        self.cancel_pending();
        self.running = true;
        ui.refresh_start_button_label("Pause");
        self.scheduler.schedule(Task::Tick, TICK_DELAY, self.epoch);
    }

    /// Pause the countdown, preserving the time left. Idempotent while
    /// paused.
    pub fn pause(&mut self, ui: &mut impl UserInterface) {
        if !self.running {
            return;
        }
        self.running = false;
        self.cancel_pending();
        ui.refresh_start_button_label("Resume");
    }

    /// The start-button toggle.
    ///
    /// A pending auto-start is cancelled before the press is
    /// interpreted, so explicit user input always wins.
    pub fn start_or_pause(&mut self, ui: &mut impl UserInterface) {
        if self.running {
            self.pause(ui);
        } else {
            self.cancel_pending();
            self.start(ui);
        }
    }

    /// One countdown step, invoked once per elapsed second while
    /// running.
    ///
    /// Decrements and chains the next tick while time remains; at zero
    /// it completes the phase instead, so the countdown never goes
    /// negative.
    pub fn tick(&mut self, ui: &mut impl UserInterface) {
        if !self.running {
            return;
        }

        if self.countdown.remaining_seconds() > 0 {
            self.countdown.decrement();
            let (minutes, seconds) = self.countdown.clock();
            ui.refresh_timer_text(minutes, seconds);
            self.scheduler.schedule(Task::Tick, TICK_DELAY, self.epoch);
        } else {
            self.complete_phase(ui);
        }
    }

    /// Finish the current phase and advance the cycle.
    ///
    /// Work sessions hand over to a short break, or to a long break
    /// every `sessions_before_long_break` sessions; breaks hand back to
    /// the next work session and bump the session counter. The
    /// notification sink is invoked exactly once per completion.
    pub fn complete_phase(&mut self, ui: &mut impl UserInterface) {
        if self.config.notification_sound {
            self.notifier.phase_completed(self.phase);
        }

        if self.phase.is_break() {
            self.current_session += 1;
            self.phase = Phase::WorkSession;
        } else {
            self.phase = if self.current_session % self.config.sessions_before_long_break == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
        }

        self.countdown.reseed(self.phase.duration_minutes(&self.config));
        self.running = false;
        self.cancel_pending();
        self.sync_ui(ui);

        if self.config.auto_start {
            self.scheduler.schedule(Task::AutoStart, TICK_DELAY, self.epoch);
        }
    }

    /// Reset to the first work session. Idempotent.
    pub fn reset(&mut self, ui: &mut impl UserInterface) {
        self.cancel_pending();
        self.running = false;
        self.phase = Phase::WorkSession;
        self.current_session = 1;
        self.countdown = Countdown::from_minutes(self.config.work_duration);
        self.sync_ui(ui);
    }

    /// Validate and apply a settings submission, then reset.
    ///
    /// Rejection is atomic: on any parse or range failure, and on a
    /// failed write, the existing configuration and timer state are
    /// left untouched. A successful apply discards any in-progress
    /// countdown so changed durations never leave stale time.
    ///
    /// # Errors
    ///
    /// Returns an error if a field fails validation or the config file
    /// cannot be written.
    pub fn apply_settings(
        &mut self,
        draft: &SettingsDraft,
        ui: &mut impl UserInterface,
    ) -> Result<(), PomidorError> {
        let config = draft.parse()?;
        config.save_to_path(&self.config_file)?;
        self.config = config;
        self.reset(ui);
        Ok(())
    }

    /// Toggle auto-start and persist immediately, independent of the
    /// other settings.
    ///
    /// An armed auto-start is cancelled first, so flipping the flag
    /// always wins over a queued start; a running countdown is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn set_auto_start(&mut self, enabled: bool) -> Result<(), PomidorError> {
        self.cancel_auto_start();
        self.config.auto_start = enabled;
        self.config.save_to_path(&self.config_file)
    }

    /// Cancel an armed auto-start, if any. A pending tick is left
    /// alone, so calling this never stalls a running countdown.
    ///
    /// User actions that do not otherwise touch the scheduler (the
    /// auto-start toggle, opening the settings form) call this so
    /// explicit input always wins over a queued start.
    pub fn cancel_auto_start(&mut self) {
        if self.scheduler.next_task() == Some(Task::AutoStart) {
            self.cancel_pending();
        }
    }

    /// Dispatch the pending scheduled task if its deadline has passed.
    ///
    /// Tasks scheduled before the last cancellation carry a stale epoch
    /// and are discarded, so a fire racing a cancel can never touch
    /// freshly reset state.
    pub fn poll_due(&mut self, now: Instant, ui: &mut impl UserInterface) {
        let Some(scheduled) = self.scheduler.pop_due(now) else {
            return;
        };
        if scheduled.epoch != self.epoch {
            return;
        }
        match scheduled.task {
            Task::Tick => self.tick(ui),
            Task::AutoStart => self.start(ui),
        }
    }

    /// Deadline of the next scheduled task, for sizing the event-loop
    /// poll timeout.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn button_label(&self) -> &'static str {
        if self.running {
            "Pause"
        } else if self.countdown.remaining_seconds() < self.countdown.total_seconds() {
            "Resume"
        } else {
            "Start"
        }
    }

    fn cancel_pending(&mut self) {
        self.scheduler.cancel();
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::TempDir;

    /// Records every callback so tests can assert on what the UI saw.
    #[derive(Default)]
    struct RecordingUi {
        timer_text: String,
        phase_label: String,
        button_label: String,
    }

    impl UserInterface for RecordingUi {
        fn refresh_timer_text(&mut self, minutes: u32, seconds: u32) {
            self.timer_text = format!("{minutes:02}:{seconds:02}");
        }

        fn refresh_phase_label(&mut self, text: &str) {
            self.phase_label = text.to_string();
        }

        fn refresh_start_button_label(&mut self, text: &str) {
            self.button_label = text.to_string();
        }
    }

    /// Shares its completion log with the test through an Rc handle.
    struct RecordingNotifier(Rc<RefCell<Vec<Phase>>>);

    impl NotificationSink for RecordingNotifier {
        fn phase_completed(&mut self, phase: Phase) {
            self.0.borrow_mut().push(phase);
        }
    }

    type TestController = SessionController<RecordingNotifier>;

    fn controller(config: Config) -> (TestController, Rc<RefCell<Vec<Phase>>>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.json");
        let completions = Rc::new(RefCell::new(Vec::new()));
        let notifier = RecordingNotifier(Rc::clone(&completions));
        (
            SessionController::new(config, config_file, notifier),
            completions,
            temp_dir,
        )
    }

    fn short_config() -> Config {
        Config {
            work_duration: 1,
            short_break: 1,
            long_break: 1,
            sessions_before_long_break: 2,
            notification_sound: true,
            auto_start: false,
        }
    }

    #[test]
    fn test_initial_state() {
        let (c, _, _dir) = controller(Config::default());

        assert_eq!(c.phase(), Phase::WorkSession);
        assert_eq!(c.current_session(), 1);
        assert_eq!(c.time_left(), 25 * 60);
        assert!(!c.is_running());
    }

    #[test]
    fn test_sync_ui_pushes_full_state() {
        let (c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.sync_ui(&mut ui);

        assert_eq!(ui.timer_text, "25:00");
        assert_eq!(ui.phase_label, "Work Session 1");
        assert_eq!(ui.button_label, "Start");
    }

    #[test]
    fn test_reset_invariants_hold_from_any_state() {
        let (mut c, _, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        for _ in 0..10 {
            c.tick(&mut ui);
        }
        c.reset(&mut ui);

        assert_eq!(c.phase(), Phase::WorkSession);
        assert_eq!(c.current_session(), 1);
        assert_eq!(c.time_left(), 60);
        assert!(!c.is_running());
        assert!(c.next_deadline().is_none());
        assert_eq!(ui.button_label, "Start");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut c, _, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        c.reset(&mut ui);
        let after_once = (c.phase(), c.current_session(), c.time_left(), c.is_running());
        c.reset(&mut ui);
        let after_twice = (c.phase(), c.current_session(), c.time_left(), c.is_running());

        assert_eq!(after_once, after_twice);
    }

    #[test]
    fn test_tick_decrements_and_refreshes_display() {
        let (mut c, _, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        c.tick(&mut ui);

        assert_eq!(c.time_left(), 59);
        assert_eq!(ui.timer_text, "00:59");
        assert!(c.next_deadline().is_some());
    }

    #[test]
    fn test_tick_at_zero_completes_instead_of_decrementing() {
        let (mut c, completions, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        for _ in 0..60 {
            c.tick(&mut ui);
        }
        assert_eq!(c.time_left(), 0);
        assert_eq!(c.phase(), Phase::WorkSession);
        assert!(completions.borrow().is_empty());

        // One more tick completes the phase rather than going negative
        c.tick(&mut ui);

        assert_eq!(c.phase(), Phase::ShortBreak);
        assert_eq!(c.time_left(), 60);
        assert!(!c.is_running());
        assert_eq!(*completions.borrow(), vec![Phase::WorkSession]);
    }

    #[test]
    fn test_full_cycle_with_modulus_two() {
        let (mut c, _, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        // Work session 1 completes -> short break (1 % 2 != 0)
        c.complete_phase(&mut ui);
        assert_eq!(c.phase(), Phase::ShortBreak);
        assert_eq!(c.current_session(), 1);
        assert_eq!(c.time_left(), 60);

        // Short break completes -> work session 2
        c.complete_phase(&mut ui);
        assert_eq!(c.phase(), Phase::WorkSession);
        assert_eq!(c.current_session(), 2);
        assert_eq!(c.time_left(), 60);
        assert_eq!(ui.phase_label, "Work Session 2");

        // Work session 2 completes -> long break (2 % 2 == 0)
        c.complete_phase(&mut ui);
        assert_eq!(c.phase(), Phase::LongBreak);
        assert_eq!(c.current_session(), 2);

        // Long break completes -> work session 3
        c.complete_phase(&mut ui);
        assert_eq!(c.phase(), Phase::WorkSession);
        assert_eq!(c.current_session(), 3);
    }

    #[test]
    fn test_session_increments_only_on_break_completion() {
        let (mut c, _, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        c.complete_phase(&mut ui); // work -> break
        assert_eq!(c.current_session(), 1);

        c.complete_phase(&mut ui); // break -> work
        assert_eq!(c.current_session(), 2);
    }

    #[test]
    fn test_notification_fires_once_per_completion() {
        let (mut c, completions, _dir) = controller(short_config());
        let mut ui = RecordingUi::default();

        c.complete_phase(&mut ui);
        c.complete_phase(&mut ui);

        assert_eq!(
            *completions.borrow(),
            vec![Phase::WorkSession, Phase::ShortBreak]
        );
    }

    #[test]
    fn test_notification_respects_config_flag() {
        let mut config = short_config();
        config.notification_sound = false;
        let (mut c, completions, _dir) = controller(config);
        let mut ui = RecordingUi::default();

        c.complete_phase(&mut ui);

        assert!(completions.borrow().is_empty());
    }

    #[test]
    fn test_pause_preserves_time_left() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        for _ in 0..10 {
            c.tick(&mut ui);
        }
        assert_eq!(c.time_left(), 25 * 60 - 10);

        c.start_or_pause(&mut ui);
        assert!(!c.is_running());
        assert_eq!(ui.button_label, "Resume");

        // A leaked tick can no longer fire
        let later = Instant::now() + Duration::from_secs(5);
        c.poll_due(later, &mut ui);
        assert_eq!(c.time_left(), 25 * 60 - 10);

        // Resume continues from where it left off, not reseeded
        c.start_or_pause(&mut ui);
        assert!(c.is_running());
        assert_eq!(c.time_left(), 25 * 60 - 10);
        c.tick(&mut ui);
        assert_eq!(c.time_left(), 25 * 60 - 11);
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        c.start(&mut ui);

        assert!(c.is_running());
        assert_eq!(ui.button_label, "Pause");
    }

    #[test]
    fn test_pause_is_idempotent() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.pause(&mut ui);

        assert!(!c.is_running());
        // The label was never pushed, because nothing changed
        assert_eq!(ui.button_label, "");
    }

    #[test]
    fn test_stale_epoch_task_is_discarded() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        // Simulate a cancellation racing an already-queued fire
        c.epoch = c.epoch.wrapping_add(1);

        let later = Instant::now() + Duration::from_secs(5);
        c.poll_due(later, &mut ui);

        assert_eq!(c.time_left(), 25 * 60);
    }

    #[test]
    fn test_scheduled_tick_fires_through_poll_due() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        let later = Instant::now() + Duration::from_secs(2);
        c.poll_due(later, &mut ui);

        assert_eq!(c.time_left(), 25 * 60 - 1);
    }

    #[test]
    fn test_auto_start_rearms_after_one_delay_unit() {
        let mut config = short_config();
        config.auto_start = true;
        let (mut c, _, _dir) = controller(config);
        let mut ui = RecordingUi::default();

        c.complete_phase(&mut ui);
        assert!(!c.is_running());
        assert!(c.next_deadline().is_some());

        let later = Instant::now() + Duration::from_secs(2);
        c.poll_due(later, &mut ui);

        assert!(c.is_running());
        assert_eq!(ui.button_label, "Pause");
    }

    #[test]
    fn test_disabling_auto_start_cancels_pending_start() {
        let mut config = short_config();
        config.auto_start = true;
        let (mut c, _, _dir) = controller(config);
        let mut ui = RecordingUi::default();

        c.complete_phase(&mut ui);
        assert!(c.next_deadline().is_some());

        // The user flips the flag off during the 1-second window
        c.set_auto_start(false).unwrap();
        assert!(c.next_deadline().is_none());

        let later = Instant::now() + Duration::from_secs(5);
        c.poll_due(later, &mut ui);
        assert!(!c.is_running());
    }

    #[test]
    fn test_toggling_auto_start_while_running_keeps_ticking() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        c.set_auto_start(true).unwrap();

        // The pending tick survived the toggle
        assert!(c.next_deadline().is_some());
        let later = Instant::now() + Duration::from_secs(2);
        c.poll_due(later, &mut ui);
        assert_eq!(c.time_left(), 25 * 60 - 1);
    }

    #[test]
    fn test_cancel_auto_start_leaves_pending_tick_alone() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        c.cancel_auto_start();

        let later = Instant::now() + Duration::from_secs(2);
        c.poll_due(later, &mut ui);
        assert_eq!(c.time_left(), 25 * 60 - 1);
    }

    #[test]
    fn test_user_action_cancels_pending_auto_start() {
        let mut config = short_config();
        config.auto_start = true;
        let (mut c, _, _dir) = controller(config);
        let mut ui = RecordingUi::default();

        c.complete_phase(&mut ui);
        assert!(c.next_deadline().is_some());

        c.reset(&mut ui);
        assert!(c.next_deadline().is_none());

        let later = Instant::now() + Duration::from_secs(5);
        c.poll_due(later, &mut ui);
        assert!(!c.is_running());
    }

    #[test]
    fn test_apply_settings_rejection_is_atomic() {
        let (mut c, _, _dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        c.tick(&mut ui);
        let time_before = c.time_left();

        let mut draft = SettingsDraft::from_config(c.config());
        draft.work_duration = "abc".to_string();

        let err = c.apply_settings(&draft, &mut ui).unwrap_err();
        assert!(err.to_string().contains("work_duration"));

        // Nothing changed: config, countdown, and running state intact
        assert_eq!(c.config().work_duration, 25);
        assert_eq!(c.time_left(), time_before);
        assert!(c.is_running());
    }

    #[test]
    fn test_apply_settings_persists_and_resets() {
        let (mut c, _, dir) = controller(Config::default());
        let mut ui = RecordingUi::default();

        c.start(&mut ui);
        c.tick(&mut ui);

        let mut draft = SettingsDraft::from_config(c.config());
        draft.work_duration = "50".to_string();

        c.apply_settings(&draft, &mut ui).unwrap();

        assert_eq!(c.config().work_duration, 50);
        assert_eq!(c.time_left(), 50 * 60);
        assert_eq!(c.current_session(), 1);
        assert!(!c.is_running());

        let contents =
            std::fs::read_to_string(dir.path().join("config.json")).unwrap();
        assert!(contents.contains("\"work_duration\": 50"));
    }

    #[test]
    fn test_set_auto_start_persists_independently() {
        let (mut c, _, dir) = controller(Config::default());

        c.set_auto_start(true).unwrap();

        assert!(c.config().auto_start);
        let contents =
            std::fs::read_to_string(dir.path().join("config.json")).unwrap();
        assert!(contents.contains("\"auto_start\": true"));
    }
}
