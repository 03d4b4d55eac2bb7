//! The context passed explicitly to test code.
//!
//! There is no ambient "current test result": assertions, mocks and
//! verification all go through the [`TestContext`] the runner hands to the
//! test body.

use std::fmt::Debug;
use std::sync::Arc;

use faultline_core::{Failure, Fault, FaultKind, TestResult};
use faultline_mock::Mock;

/// Per-test execution context.
#[derive(Debug)]
pub struct TestContext<'r> {
    result: &'r mut TestResult,
    test_name: String,
    annotate: bool,
    mocks: Vec<Mock>,
}

impl<'r> TestContext<'r> {
    /// Creates a context reporting into `result`.
    #[must_use]
    pub fn new(result: &'r mut TestResult, test_name: impl Into<String>) -> Self {
        Self {
            result,
            test_name: test_name.into(),
            annotate: true,
            mocks: Vec::new(),
        }
    }

    /// Sets whether fault locations carry `:in <test name>`.
    #[must_use]
    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Returns the running test's name.
    #[must_use]
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Returns the result being reported into.
    #[must_use]
    pub fn result(&self) -> &TestResult {
        self.result
    }

    /// Counts one assertion without checking anything.
    pub fn record_assertion(&mut self) {
        self.result.record_assertion();
    }

    /// Asserts `condition`.
    ///
    /// # Errors
    /// Returns an assertion failure attributed to the caller.
    #[track_caller]
    pub fn assert(&mut self, condition: bool) -> Result<(), Failure> {
        self.assert_with(condition, "assertion failed")
    }

    /// Asserts `condition`, failing with `message`.
    ///
    /// # Errors
    /// Returns an assertion failure attributed to the caller.
    #[track_caller]
    pub fn assert_with(&mut self, condition: bool, message: impl Into<String>) -> Result<(), Failure> {
        self.result.record_assertion();
        if condition {
            Ok(())
        } else {
            Err(Failure::assertion(message))
        }
    }

    /// Asserts `expected == actual`.
    ///
    /// # Errors
    /// Returns an assertion failure attributed to the caller.
    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, expected: T, actual: T) -> Result<(), Failure> {
        self.result.record_assertion();
        if expected == actual {
            Ok(())
        } else {
            Err(Failure::assertion(format!(
                "expected <{expected:?}> but was <{actual:?}>"
            )))
        }
    }

    /// Asserts `expected != actual`.
    ///
    /// # Errors
    /// Returns an assertion failure attributed to the caller.
    #[track_caller]
    pub fn assert_ne<T: PartialEq + Debug>(&mut self, expected: T, actual: T) -> Result<(), Failure> {
        self.result.record_assertion();
        if expected == actual {
            Err(Failure::assertion(format!(
                "expected <{expected:?}> to differ from <{actual:?}>"
            )))
        } else {
            Ok(())
        }
    }

    /// Fails unconditionally. Counts as one assertion.
    ///
    /// # Errors
    /// Always returns an assertion failure attributed to the caller.
    #[track_caller]
    pub fn flunk(&mut self, message: impl Into<String>) -> Result<(), Failure> {
        self.assert_with(false, message)
    }

    /// Creates a mock that is verified when the test body passes.
    pub fn mock(&mut self, name: impl Into<String>) -> Mock {
        let mock = Mock::new(name);
        self.mocks.push(mock.clone());
        mock
    }

    /// Returns the mocks created through this context that are still
    /// awaiting verification.
    #[must_use]
    pub fn mocks(&self) -> &[Mock] {
        &self.mocks
    }

    /// Verifies every pending mock in creation order.
    ///
    /// Verified mocks are dropped from the context, so a mock is never
    /// verified twice in one test.
    ///
    /// # Errors
    /// Returns the first unexpected-invocation or unmet-expectation failure.
    pub fn verify_mocks(&mut self) -> Result<(), Failure> {
        for mock in std::mem::take(&mut self.mocks) {
            mock.verify(self.result)?;
        }
        Ok(())
    }

    /// Converts `failure` into a fault and records it.
    pub fn record_failure(&mut self, failure: Failure) -> Arc<Fault> {
        tracing::debug!(test = %self.test_name, kind = %failure.kind(), "recording failure");
        if failure.kind() == FaultKind::UnexpectedInvocation {
            for mock in &self.mocks {
                if mock.acknowledge(&failure) {
                    break;
                }
            }
        }
        let fault = failure.into_fault(&self.test_name, self.annotate);
        self.result.record_fault(fault)
    }
}
