//! The mock object.
//!
//! Calls reach a double through [`Mock::invoke`]; there is no method
//! interception. Expectations and stubs are records keyed by selector and
//! checked on every invocation.

use std::collections::HashMap;
use std::sync::Arc;

use faultline_core::{ExecutionPoint, Failure, TestResult};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::expectation::{Expectation, ExpectationRecord};

pub(crate) type SharedState = Arc<Mutex<MockState>>;

/// Internal state shared by all clones of a mock.
#[derive(Debug)]
pub(crate) struct MockState {
    name: String,
    /// Declaration order.
    pub(crate) expectations: Vec<ExpectationRecord>,
    /// Selector -> indices into `expectations`, in declaration order.
    by_selector: HashMap<String, Vec<usize>>,
    invocations: Vec<Invocation>,
    /// Unexpected invocations, in call order.
    unexpected: Vec<UnexpectedCall>,
}

/// An unexpected invocation and whether it has reached a `TestResult`.
#[derive(Debug)]
struct UnexpectedCall {
    failure: Failure,
    reported: bool,
}

impl MockState {
    fn declare(&mut self, record: ExpectationRecord) -> usize {
        let index = self.expectations.len();
        self.by_selector
            .entry(record.selector().to_string())
            .or_default()
            .push(index);
        self.expectations.push(record);
        index
    }

    /// Latest record that still accepts an invocation, else the latest
    /// record for the selector at all.
    fn dispatch(&self, selector: &str) -> Option<usize> {
        let candidates = self.by_selector.get(selector)?;
        candidates
            .iter()
            .rev()
            .copied()
            .find(|&i| self.expectations[i].allows_invocation())
            .or_else(|| candidates.last().copied())
    }
}

/// One call received by a mock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    /// Selector called.
    pub selector: String,
    /// Arguments passed.
    pub arguments: Vec<Value>,
    /// Where the call was made.
    pub call_site: ExecutionPoint,
}

/// A test double.
///
/// Clones share expectations and the invocation log.
#[derive(Debug, Clone)]
pub struct Mock {
    state: SharedState,
}

impl Mock {
    /// Creates a mock with no expectations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                name: name.into(),
                expectations: Vec::new(),
                by_selector: HashMap::new(),
                invocations: Vec::new(),
                unexpected: Vec::new(),
            })),
        }
    }

    /// Returns the mock's name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    /// Declares an interaction that must happen (exactly once unless refined).
    ///
    /// An unmet expectation is attributed to the caller of this method.
    #[track_caller]
    pub fn expects(&self, selector: &str) -> Expectation {
        let record = ExpectationRecord::expected(selector, ExecutionPoint::current());
        self.declare(record)
    }

    /// Declares an interaction that may happen any number of times.
    ///
    /// Stubs are never verified and never count as assertions.
    #[track_caller]
    pub fn stubs(&self, selector: &str) -> Expectation {
        let record = ExpectationRecord::stubbed(selector, ExecutionPoint::current());
        self.declare(record)
    }

    /// Invokes `selector` with `arguments`.
    ///
    /// An unexpected invocation is also remembered by the mock, so
    /// [`Mock::verify`] still fails if the returned error is dropped.
    ///
    /// # Errors
    /// Returns an unexpected-invocation [`Failure`] attributed to the caller
    /// if no expectation or stub matches the selector.
    #[track_caller]
    pub fn invoke(&self, selector: &str, arguments: &[Value]) -> Result<Value, Failure> {
        let call_site = ExecutionPoint::current();
        let mut state = self.state.lock();
        state.invocations.push(Invocation {
            selector: selector.to_string(),
            arguments: arguments.to_vec(),
            call_site: call_site.clone(),
        });

        let Some(index) = state.dispatch(selector) else {
            let rendered = arguments
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::debug!(mock = %state.name, selector, "unexpected invocation");
            let failure = Failure::unexpected_invocation(
                format!("unexpected invocation: {}.{selector}({rendered})", state.name),
                call_site,
            );
            state.unexpected.push(UnexpectedCall {
                failure: failure.clone(),
                reported: false,
            });
            return Err(failure);
        };

        let record = &mut state.expectations[index];
        let value = record.invoke();
        tracing::trace!(
            selector,
            invocations = record.invocation_count(),
            stub = record.is_stub(),
            "mock invoked"
        );
        Ok(value)
    }

    /// Invokes `selector` without arguments.
    ///
    /// # Errors
    /// See [`Mock::invoke`].
    #[track_caller]
    pub fn call(&self, selector: &str) -> Result<Value, Failure> {
        self.invoke(selector, &[])
    }

    /// Verifies the mock.
    ///
    /// An unexpected invocation that never reached a result fails first,
    /// without counting an assertion. Otherwise every expectation is checked
    /// in declaration order, each counting one assertion in `result`; stubs
    /// are skipped. Stops at the first unsatisfied expectation.
    ///
    /// # Errors
    /// Returns the first unreported unexpected-invocation [`Failure`], or an
    /// unmet-expectation [`Failure`] attributed to the declaration site of
    /// the first unsatisfied expectation.
    pub fn verify(&self, result: &mut TestResult) -> Result<(), Failure> {
        if let Some(failure) = self.take_unreported() {
            tracing::debug!(point = %failure.point(), "unreported unexpected invocation");
            return Err(failure);
        }

        // Lock released before counting; listeners may call back into the mock.
        let checks: Vec<(bool, String, ExecutionPoint)> = {
            let state = self.state.lock();
            state
                .expectations
                .iter()
                .filter(|record| !record.is_stub())
                .map(|record| {
                    (
                        record.is_satisfied(),
                        record.describe(&state.name),
                        record.declared_at().clone(),
                    )
                })
                .collect()
        };

        for (satisfied, description, declared_at) in checks {
            result.record_assertion();
            if !satisfied {
                tracing::debug!(%declared_at, "unmet expectation");
                return Err(Failure::unmet_expectation(description, declared_at));
            }
        }
        Ok(())
    }

    /// Marks an unexpected invocation returned by this mock as reported.
    ///
    /// Returns false if `failure` did not come from this mock or was
    /// already marked.
    pub fn acknowledge(&self, failure: &Failure) -> bool {
        let mut state = self.state.lock();
        match state
            .unexpected
            .iter_mut()
            .find(|call| !call.reported && call.failure == *failure)
        {
            Some(call) => {
                call.reported = true;
                true
            }
            None => false,
        }
    }

    /// Returns true if every non-stub expectation is satisfied and no
    /// unexpected invocation happened.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        let state = self.state.lock();
        state.unexpected.is_empty()
            && state
                .expectations
                .iter()
                .all(|record| record.is_stub() || record.is_satisfied())
    }

    /// Returns snapshots of all declared records.
    #[must_use]
    pub fn expectations(&self) -> Vec<ExpectationRecord> {
        self.state.lock().expectations.clone()
    }

    /// Returns the invocation log.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state.lock().invocations.clone()
    }

    fn take_unreported(&self) -> Option<Failure> {
        let mut state = self.state.lock();
        let call = state.unexpected.iter_mut().find(|call| !call.reported)?;
        call.reported = true;
        Some(call.failure.clone())
    }

    fn declare(&self, record: ExpectationRecord) -> Expectation {
        let index = self.state.lock().declare(record);
        Expectation::new(Arc::clone(&self.state), index)
    }
}
