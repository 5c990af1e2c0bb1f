//! Path resolution for pomidor configuration files.
//!
//! All pomidor data is stored in `~/.pomidor/`:
//! - `config.json` - Timer configuration

use std::path::PathBuf;

use crate::error::PomidorError;

/// Paths to pomidor configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomidor/`
    pub root: PathBuf,
    /// Config file: `~/.pomidor/config.json`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomidorError> {
        let home = std::env::var("HOME").map_err(|_| {
            PomidorError::Config("Could not determine home directory".to_string())
        })?;

        let root = PathBuf::from(home).join(".pomidor");

        Ok(Self {
            config_file: root.join("config.json"),
            root,
        })
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.json"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomidorError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                PomidorError::Config(format!(
                    "Failed to create directory {:?}: {}",
                    self.root, e
                ))
            })?;
        }

        Ok(())
    }
}
