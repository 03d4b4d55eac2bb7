//! Execution points: comparable source locations.
//!
//! Points are captured structurally with `#[track_caller]` wherever the
//! call site is known. String parsing exists only for interoperating with
//! location strings stored in a [`Fault`](crate::Fault).

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A precise source location (file + line).
///
/// Two points are equal iff file and line match; the column is not part
/// of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExecutionPoint {
    file: String,
    line: u32,
}

impl ExecutionPoint {
    /// Creates a point from its parts.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Captures the caller's location.
    #[must_use]
    #[track_caller]
    pub fn current() -> Self {
        Self::from_location(Location::caller())
    }

    /// Converts a `std::panic::Location`.
    #[must_use]
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }

    /// Parses a backtrace-style location string.
    ///
    /// Accepts `<file>:<line>`, optionally followed by `:<column>` and/or
    /// `:in <context>`. The file part may itself contain colons (Windows
    /// drive letters); the first `:<digits>` segment that is terminated by
    /// `:` or end of input is taken as the line.
    ///
    /// # Errors
    /// Returns [`CoreError::Parse`] if no `file:line` pattern is present.
    pub fn parse(location: &str) -> Result<Self> {
        let trimmed = location.trim();

        for (idx, _) in trimmed.match_indices(':') {
            let file = &trimmed[..idx];
            if file.is_empty() {
                continue;
            }

            let rest = &trimmed[idx + 1..];
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                continue;
            }
            let tail = &rest[digits..];
            if !(tail.is_empty() || tail.starts_with(':')) {
                continue;
            }

            let line: u32 = rest[..digits]
                .parse()
                .map_err(|_| CoreError::parse(location))?;
            if line == 0 {
                continue;
            }

            return Ok(Self::new(file, line));
        }

        Err(CoreError::parse(location))
    }

    /// Returns the source file.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Renders this point as a location string with a context label,
    /// e.g. `src/lib.rs:12:in test_message`.
    #[must_use]
    pub fn with_context(&self, context: &str) -> String {
        format!("{self}:in {context}")
    }
}

impl fmt::Display for ExecutionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl FromStr for ExecutionPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&Location<'_>> for ExecutionPoint {
    fn from(location: &Location<'_>) -> Self {
        Self::from_location(location)
    }
}
