// ABOUTME: Configuration loading for the roster console.
// ABOUTME: Reads ROSTER_* environment variables with defaults matching the classic students.dat workflow.

use std::path::PathBuf;

use thiserror::Error;

use crate::menu::MenuOptions;

/// Backing file used when `ROSTER_DATA_FILE` is not set.
pub const DEFAULT_DATA_FILE: &str = "students.dat";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ROSTER_DATA_FILE is set but empty; unset it to use {DEFAULT_DATA_FILE}")]
    EmptyDataFile,
}

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub data_file: PathBuf,
    pub pause: bool,
    pub clear_screen: bool,
}

impl RosterConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - ROSTER_DATA_FILE: backing file path (default: students.dat)
    /// - ROSTER_PAUSE: wait for Enter after each action (default: true)
    /// - ROSTER_CLEAR_SCREEN: clear the terminal between menus (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RosterConfig::from_env`] but reading variables through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = match lookup("ROSTER_DATA_FILE") {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyDataFile),
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_DATA_FILE),
        };

        let pause = lookup("ROSTER_PAUSE").map(|v| truthy(&v)).unwrap_or(true);
        let clear_screen = lookup("ROSTER_CLEAR_SCREEN")
            .map(|v| truthy(&v))
            .unwrap_or(true);

        Ok(Self {
            data_file,
            pause,
            clear_screen,
        })
    }

    pub fn menu_options(&self) -> MenuOptions {
        MenuOptions {
            pause: self.pause,
            clear_screen: self.clear_screen,
        }
    }
}

fn truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
