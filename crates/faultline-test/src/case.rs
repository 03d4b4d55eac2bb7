//! Test cases and suites.

use std::fmt;

use faultline_core::{ExecutionPoint, Failure};

use crate::context::TestContext;

/// A test step: setup, body or teardown.
pub type TestFn = Box<dyn Fn(&mut TestContext<'_>) -> Result<(), Failure> + Send + Sync>;

/// A named test body with optional fixture hooks.
pub struct TestCase {
    name: String,
    declared_at: ExecutionPoint,
    setup: Option<TestFn>,
    body: TestFn,
    teardown: Option<TestFn>,
}

#[allow(clippy::return_self_not_must_use)]
impl TestCase {
    /// Creates a test case. Panics escaping `body` are attributed to the
    /// caller of this function.
    #[track_caller]
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TestContext<'_>) -> Result<(), Failure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            declared_at: ExecutionPoint::current(),
            setup: None,
            body: Box::new(body),
            teardown: None,
        }
    }

    /// Runs `setup` before the body. A failing setup skips the body.
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn(&mut TestContext<'_>) -> Result<(), Failure> + Send + Sync + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Runs `teardown` after the body and verification, whatever their outcome.
    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: Fn(&mut TestContext<'_>) -> Result<(), Failure> + Send + Sync + 'static,
    {
        self.teardown = Some(Box::new(teardown));
        self
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the case was declared.
    #[must_use]
    pub const fn declared_at(&self) -> &ExecutionPoint {
        &self.declared_at
    }

    pub(crate) const fn setup(&self) -> Option<&TestFn> {
        self.setup.as_ref()
    }

    pub(crate) const fn body(&self) -> &TestFn {
        &self.body
    }

    pub(crate) const fn teardown(&self) -> Option<&TestFn> {
        self.teardown.as_ref()
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("declared_at", &self.declared_at)
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish_non_exhaustive()
    }
}

/// An ordered collection of test cases.
#[derive(Debug, Default)]
pub struct TestSuite {
    name: String,
    cases: Vec<TestCase>,
}

#[allow(clippy::return_self_not_must_use)]
impl TestSuite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Adds a case (builder style).
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Adds a case.
    pub fn push(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Returns the suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if the suite has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterates over the cases in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a TestSuite {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
