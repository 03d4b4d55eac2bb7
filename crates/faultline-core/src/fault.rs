//! Fault records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::point::ExecutionPoint;

/// Classification of a fault.
///
/// The first three kinds are failures (a check did not hold). `Error` is a
/// panic escaping test code and is counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// A failing check in test code (`flunk`, `assert`, ...).
    AssertionFailure,
    /// A must-happen interaction that did not happen the expected number of times.
    UnmetExpectation,
    /// A call on a test double with no matching expectation or stub.
    UnexpectedInvocation,
    /// A panic escaping test code.
    Error,
}

impl FaultKind {
    /// Returns true if this kind counts towards `failure_count`.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        !matches!(self, Self::Error)
    }

    /// Returns a short label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssertionFailure => "assertion failure",
            Self::UnmetExpectation => "unmet expectation",
            Self::UnexpectedInvocation => "unexpected invocation",
            Self::Error => "error",
        }
    }

    /// Single-character progress marker (`F` for failures, `E` for errors).
    #[must_use]
    pub const fn marker(self) -> char {
        if self.is_failure() { 'F' } else { 'E' }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failure or error recorded during a test run.
///
/// Immutable once created. `location` is a backtrace-style string
/// (`<file>:<line>[:in <context>]`) that parses with
/// [`ExecutionPoint::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    kind: FaultKind,
    message: String,
    location: String,
    test_name: String,
}

impl Fault {
    /// Creates a new fault.
    #[must_use]
    pub fn new(
        kind: FaultKind,
        message: impl Into<String>,
        location: impl Into<String>,
        test_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            location: location.into(),
            test_name: test_name.into(),
        }
    }

    /// Returns the fault kind.
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the raw location string.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the name of the test that produced this fault.
    #[must_use]
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Returns true if this fault counts as a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.kind.is_failure()
    }

    /// Resolves the location string into an execution point.
    ///
    /// # Errors
    /// Returns an error if the location string is malformed.
    pub fn execution_point(&self) -> Result<ExecutionPoint> {
        ExecutionPoint::parse(&self.location)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\n{} [{}]:\n{}",
            self.kind, self.test_name, self.location, self.message
        )
    }
}
