//! Session phases for the Pomodoro cycle.

use crate::config::Config;

/// The semantic category of the current countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A focused work session.
    WorkSession,
    /// The short break between work sessions.
    ShortBreak,
    /// The long break after a full round of work sessions.
    LongBreak,
}

impl Phase {
    /// Check if this phase is a break.
    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Configured duration of this phase in minutes.
    #[must_use]
    pub const fn duration_minutes(self, config: &Config) -> u32 {
        match self {
            Self::WorkSession => config.work_duration,
            Self::ShortBreak => config.short_break,
            Self::LongBreak => config.long_break,
        }
    }

    /// Base display name, without the session counter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WorkSession => "Work Session",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Display label for this phase.
    ///
    /// Work sessions carry the session counter; breaks do not.
    #[must_use]
    pub fn label(self, current_session: u32) -> String {
        match self {
            Self::WorkSession => format!("Work Session {current_session}"),
            Self::ShortBreak | Self::LongBreak => self.name().to_string(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_break() {
        assert!(!Phase::WorkSession.is_break());
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
    }

    #[test]
    fn test_duration_from_config() {
        let config = Config::default();

        assert_eq!(Phase::WorkSession.duration_minutes(&config), 25);
        assert_eq!(Phase::ShortBreak.duration_minutes(&config), 5);
        assert_eq!(Phase::LongBreak.duration_minutes(&config), 15);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Phase::WorkSession.label(3), "Work Session 3");
        assert_eq!(Phase::ShortBreak.label(3), "Short Break");
        assert_eq!(Phase::LongBreak.label(3), "Long Break");
    }
}
