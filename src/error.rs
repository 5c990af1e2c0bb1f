//! Error types for pomidor.

use thiserror::Error;

/// Errors that can occur while running pomidor.
#[derive(Debug, Error)]
pub enum PomidorError {
    /// Configuration path resolution, loading, or saving failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A settings submission contained values that failed validation.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Terminal setup, drawing, or event handling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}
