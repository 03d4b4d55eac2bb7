//! The test runner.
//!
//! Per case: setup, body, mock verification (only after a passing body),
//! teardown (always), then the run is counted. Every failure returned from
//! those steps becomes exactly one fault, recorded the moment it is
//! detected.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use faultline_core::{ExecutionPoint, Failure, ListenerPanic, TestResult};

use crate::case::{TestCase, TestFn, TestSuite};
use crate::config::RunnerConfig;
use crate::context::TestContext;
use crate::error::Result;

/// Executes test cases against a [`TestResult`].
#[derive(Debug, Clone, Default)]
pub struct TestRunner {
    config: RunnerConfig,
}

impl TestRunner {
    /// Creates a runner with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner with the given configuration.
    #[must_use]
    pub const fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs one case, reporting into `result`.
    ///
    /// # Panics
    /// Re-raises panics from result listeners, and panics from test code
    /// when `catch_panics` is off.
    pub fn run(&self, case: &TestCase, result: &mut TestResult) {
        let span = tracing::debug_span!("test_case", test = case.name());
        let _enter = span.enter();
        let start = Instant::now();
        let faults_before = result.faults().len();

        {
            let mut ctx = TestContext::new(&mut *result, case.name())
                .with_annotation(self.config.annotate_context);

            let outcome = match case.setup() {
                Some(setup) => self.guarded(case, &mut ctx, setup),
                None => Ok(()),
            }
            .and_then(|()| self.guarded(case, &mut ctx, case.body()));

            match outcome {
                Ok(()) if self.config.verify_mocks => {
                    if let Err(failure) = ctx.verify_mocks() {
                        ctx.record_failure(failure);
                    }
                }
                Ok(()) => {}
                Err(failure) => {
                    ctx.record_failure(failure);
                }
            }

            if let Some(teardown) = case.teardown() {
                if let Err(failure) = self.guarded(case, &mut ctx, teardown) {
                    ctx.record_failure(failure);
                }
            }
        }

        result.record_run();
        let faults = result.faults().len().saturating_sub(faults_before);
        tracing::info!(
            test = case.name(),
            elapsed = %humantime::format_duration(start.elapsed()),
            faults,
            "test case finished"
        );
    }

    /// Runs every case of `suite` into a fresh result.
    #[must_use]
    pub fn run_suite(&self, suite: &TestSuite) -> TestResult {
        let mut result = TestResult::new();
        self.run_suite_into(suite, &mut result);
        result
    }

    /// Runs every case of `suite` into `result`, in order.
    pub fn run_suite_into(&self, suite: &TestSuite, result: &mut TestResult) {
        let span = tracing::info_span!("suite", suite = suite.name(), cases = suite.len());
        let _enter = span.enter();
        let start = Instant::now();

        for case in suite {
            self.run(case, result);
        }

        tracing::info!(
            summary = %result.summary(),
            elapsed = %humantime::format_duration(start.elapsed()),
            "suite finished"
        );
    }

    fn guarded(
        &self,
        case: &TestCase,
        ctx: &mut TestContext<'_>,
        step: &TestFn,
    ) -> std::result::Result<(), Failure> {
        if !self.config.catch_panics {
            return step(ctx);
        }

        match panic::catch_unwind(AssertUnwindSafe(|| step(ctx))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                if payload.is::<ListenerPanic>() {
                    panic::resume_unwind(payload);
                }
                let message = panic_message(payload.as_ref());
                tracing::warn!(test = case.name(), %message, "test code panicked");
                Err(Failure::error(
                    format!("panicked: {message}"),
                    case.declared_at().clone(),
                ))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

/// Resolves every recorded fault's location into an execution point.
///
/// # Errors
/// Returns an error on the first malformed location.
pub fn fault_points(result: &TestResult) -> Result<Vec<ExecutionPoint>> {
    result
        .faults()
        .iter()
        .map(|fault| fault.execution_point().map_err(Into::into))
        .collect()
}
