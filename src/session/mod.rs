//! Pomodoro session sequencing and countdown.
//!
//! - Phase cycle: work session → short/long break → work session
//! - Second-resolution countdown with chained single-shot scheduling
//! - Session controller driving UI refresh callbacks

pub mod controller;
pub mod phase;
pub mod schedule;
pub mod timer;

pub use controller::{SessionController, UserInterface};
pub use phase::Phase;
pub use schedule::{Task, TickScheduler};
pub use timer::{format_mmss, Countdown};
