//! Expectation and stub records.
//!
//! Both are plain data: a selector, a [`Cardinality`], return values, an
//! invocation counter and the point where they were declared. The only
//! difference is that stubs are never verified.

use std::collections::VecDeque;

use faultline_core::ExecutionPoint;
use serde::Serialize;
use serde_json::Value;

use crate::cardinality::{Cardinality, times};
use crate::mock::SharedState;

/// Values handed back by successive invocations. The last one repeats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReturnValues(VecDeque<Value>);

impl ReturnValues {
    fn next(&mut self) -> Value {
        if self.0.len() > 1 {
            self.0.pop_front().unwrap_or(Value::Null)
        } else {
            self.0.front().cloned().unwrap_or(Value::Null)
        }
    }
}

/// Snapshot of one declared interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectationRecord {
    selector: String,
    cardinality: Cardinality,
    invocation_count: u32,
    returns: ReturnValues,
    declared_at: ExecutionPoint,
    stub: bool,
}

impl ExpectationRecord {
    pub(crate) fn expected(selector: &str, declared_at: ExecutionPoint) -> Self {
        Self {
            selector: selector.to_string(),
            cardinality: Cardinality::exactly(1),
            invocation_count: 0,
            returns: ReturnValues::default(),
            declared_at,
            stub: false,
        }
    }

    pub(crate) fn stubbed(selector: &str, declared_at: ExecutionPoint) -> Self {
        Self {
            cardinality: Cardinality::any(),
            stub: true,
            ..Self::expected(selector, declared_at)
        }
    }

    pub(crate) fn invoke(&mut self) -> Value {
        self.invocation_count = self.invocation_count.saturating_add(1);
        self.returns.next()
    }

    /// Returns the selector this record answers to.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the invocation-count constraint.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Returns how often this record has been invoked.
    #[must_use]
    pub const fn invocation_count(&self) -> u32 {
        self.invocation_count
    }

    /// Returns where this record was declared.
    #[must_use]
    pub const fn declared_at(&self) -> &ExecutionPoint {
        &self.declared_at
    }

    /// Returns true if declared with `stubs` (never verified).
    #[must_use]
    pub const fn is_stub(&self) -> bool {
        self.stub
    }

    /// Returns true if one more invocation is within bounds.
    #[must_use]
    pub fn allows_invocation(&self) -> bool {
        self.cardinality.allows_invocation(self.invocation_count)
    }

    /// Returns true if the invocation count satisfies the cardinality.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.cardinality.is_satisfied(self.invocation_count)
    }

    /// Describes this record for failure messages.
    #[must_use]
    pub fn describe(&self, mock_name: &str) -> String {
        format!(
            "expected {}, invoked {}: {}.{}",
            self.cardinality,
            times(self.invocation_count),
            mock_name,
            self.selector
        )
    }
}

/// Builder handle returned by `Mock::expects` and `Mock::stubs`.
///
/// The record is stored on the mock as soon as it is declared; the builder
/// only refines it.
#[derive(Debug, Clone)]
pub struct Expectation {
    state: SharedState,
    index: usize,
}

#[allow(clippy::return_self_not_must_use)]
impl Expectation {
    pub(crate) const fn new(state: SharedState, index: usize) -> Self {
        Self { state, index }
    }

    /// Replaces the cardinality.
    pub fn with_cardinality(self, cardinality: Cardinality) -> Self {
        self.update(|record| record.cardinality = cardinality);
        self
    }

    /// Must be invoked exactly `n` times.
    pub fn times(self, n: u32) -> Self {
        self.with_cardinality(Cardinality::exactly(n))
    }

    /// Must be invoked exactly once.
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Must be invoked exactly twice.
    pub fn twice(self) -> Self {
        self.times(2)
    }

    /// Must never be invoked.
    pub fn never(self) -> Self {
        self.times(0)
    }

    /// Must be invoked at least `n` times.
    pub fn at_least(self, n: u32) -> Self {
        self.with_cardinality(Cardinality::at_least(n))
    }

    /// Must be invoked at least once.
    pub fn at_least_once(self) -> Self {
        self.at_least(1)
    }

    /// May be invoked at most `n` times.
    pub fn at_most(self, n: u32) -> Self {
        self.with_cardinality(Cardinality::at_most(n))
    }

    /// May be invoked at most once.
    pub fn at_most_once(self) -> Self {
        self.at_most(1)
    }

    /// Must be invoked between `min` and `max` times (inclusive).
    pub fn between(self, min: u32, max: u32) -> Self {
        self.with_cardinality(Cardinality::between(min, max))
    }

    /// Every invocation returns `value`.
    pub fn returns(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.update(|record| record.returns = ReturnValues(VecDeque::from([value])));
        self
    }

    /// Successive invocations return successive values; the last repeats.
    pub fn returns_sequence(self, values: impl IntoIterator<Item = Value>) -> Self {
        let values: VecDeque<Value> = values.into_iter().collect();
        self.update(|record| record.returns = ReturnValues(values));
        self
    }

    /// Returns a snapshot of the underlying record.
    #[must_use]
    pub fn record(&self) -> Option<ExpectationRecord> {
        self.state.lock().expectations.get(self.index).cloned()
    }

    fn update(&self, f: impl FnOnce(&mut ExpectationRecord)) {
        if let Some(record) = self.state.lock().expectations.get_mut(self.index) {
            f(record);
        }
    }
}
