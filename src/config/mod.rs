//! Configuration management for pomidor.
//!
//! This module handles loading and saving configuration from `~/.pomidor/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, LoadOutcome, SettingsDraft};
