//! Failures travelling up through test code.
//!
//! A [`Failure`] is the value a test body returns via `?` when a check does
//! not hold. The runner converts it into a [`Fault`] at the execution
//! boundary.

use crate::fault::{Fault, FaultKind};
use crate::point::ExecutionPoint;

/// A detected failure with its attribution point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    kind: FaultKind,
    message: String,
    point: ExecutionPoint,
}

impl Failure {
    /// Creates a failure attributed to an explicit point.
    #[must_use]
    pub fn new(kind: FaultKind, message: impl Into<String>, point: ExecutionPoint) -> Self {
        Self {
            kind,
            message: message.into(),
            point,
        }
    }

    /// A failing assertion, attributed to the caller.
    #[must_use]
    #[track_caller]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::new(
            FaultKind::AssertionFailure,
            message,
            ExecutionPoint::current(),
        )
    }

    /// An unmet expectation, attributed to where it was declared.
    #[must_use]
    pub fn unmet_expectation(message: impl Into<String>, declared_at: ExecutionPoint) -> Self {
        Self::new(FaultKind::UnmetExpectation, message, declared_at)
    }

    /// An unexpected invocation, attributed to the offending call.
    #[must_use]
    pub fn unexpected_invocation(message: impl Into<String>, call_site: ExecutionPoint) -> Self {
        Self::new(FaultKind::UnexpectedInvocation, message, call_site)
    }

    /// A panic or other error escaping test code.
    #[must_use]
    pub fn error(message: impl Into<String>, point: ExecutionPoint) -> Self {
        Self::new(FaultKind::Error, message, point)
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the attribution point.
    #[must_use]
    pub const fn point(&self) -> &ExecutionPoint {
        &self.point
    }

    /// Converts into a fault for `test_name`.
    ///
    /// With `annotate` set, the location carries `:in <test_name>`.
    #[must_use]
    pub fn into_fault(self, test_name: &str, annotate: bool) -> Fault {
        let location = if annotate && !test_name.is_empty() {
            self.point.with_context(test_name)
        } else {
            self.point.to_string()
        };
        Fault::new(self.kind, self.message, location, test_name)
    }
}
