//! Runner configuration.
//!
//! Loaded from TOML; every field has a default so an empty file is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TestError};

/// Test runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Convert panics escaping test code into `Error` faults.
    ///
    /// When false, a panic aborts the run and propagates to the caller.
    pub catch_panics: bool,

    /// Append `:in <test name>` to fault locations.
    pub annotate_context: bool,

    /// Verify mocks created through the test context after a passing body.
    pub verify_mocks: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            annotate_context: true,
            verify_mocks: true,
        }
    }
}

impl RunnerConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TestError::config(format!("failed to parse config: {e}")))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }
}
