//! Error types for faultline-core.
//!
//! A location string that cannot be parsed means the reporting pipeline
//! itself is broken, so it is surfaced as an error rather than absorbed.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Location string has no recognizable `file:line` pattern.
    #[error("unparseable location: {input:?}")]
    Parse {
        /// The offending input.
        input: String,
    },
}

impl CoreError {
    /// Creates a parse error for the given input.
    #[must_use]
    pub fn parse(input: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
        }
    }
}
