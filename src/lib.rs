//! pomidor - A Pomodoro timer for the terminal
//!
//! Alternating work sessions and short/long breaks with configurable
//! durations, desktop notifications, and persisted settings.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod tui;

pub use config::{Config, Paths};
pub use error::PomidorError;
pub use session::{Phase, SessionController, UserInterface};
