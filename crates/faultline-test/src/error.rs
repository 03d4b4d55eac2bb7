//! Runner error types.
//!
//! These cover the runner's own plumbing. Failures in test code are not
//! errors here: they become faults in the `TestResult`.

/// Result type alias for runner operations.
pub type Result<T> = std::result::Result<T, TestError>;

/// Runner errors.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A fault location could not be resolved.
    #[error("location error: {0}")]
    Location(#[from] faultline_core::CoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TestError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
