//! Countdown primitive for a single phase.
//!
//! Tracks seconds remaining; the controller decides when to decrement
//! and what happens at zero.

use chrono::Duration;

/// A seconds-resolution countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    /// Seconds the countdown was seeded with.
    total_seconds: u32,
    /// Seconds remaining.
    remaining_seconds: u32,
}

impl Countdown {
    /// Create a countdown seeded from minutes.
    ///
    /// Saturates rather than overflowing; configuration validation
    /// bounds the minutes long before this matters.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        let seconds = minutes.saturating_mul(60);
        Self {
            total_seconds: seconds,
            remaining_seconds: seconds,
        }
    }

    /// Seconds remaining.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Seconds the countdown was seeded with.
    #[must_use]
    pub const fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Decrement by one second, saturating at zero.
    pub fn decrement(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    /// Reseed the countdown from a new duration in minutes.
    pub fn reseed(&mut self, minutes: u32) {
        *self = Self::from_minutes(minutes);
    }

    /// Remaining time split into zero-padded clock fields.
    #[must_use]
    pub const fn clock(&self) -> (u32, u32) {
        (self.remaining_seconds / 60, self.remaining_seconds % 60)
    }

    /// Elapsed fraction of the countdown (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        1.0 - (f64::from(self.remaining_seconds) / f64::from(self.total_seconds))
    }
}

/// Format a duration as zero-padded MM:SS.
#[must_use]
pub fn format_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
