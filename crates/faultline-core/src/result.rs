//! Per-run assertion and fault accounting.
//!
//! A [`TestResult`] is created fresh for one run, mutated only by that run,
//! and read afterwards. It is `Send` so a run can be handed to a worker, but
//! one instance must never be shared between concurrent runs.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fault::Fault;

/// Event channels a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A fault was recorded.
    Fault,
    /// Any counter changed.
    Changed,
}

/// An event delivered to listeners.
#[derive(Debug, Clone, Copy)]
pub enum ResultEvent<'a> {
    /// The fault just recorded. Listeners receive the stored instance.
    Fault(&'a Arc<Fault>),
    /// Counter snapshot after a change.
    Changed(&'a ResultSummary),
}

impl ResultEvent<'_> {
    /// Returns the channel this event is delivered on.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Fault(_) => EventKind::Fault,
            Self::Changed(_) => EventKind::Changed,
        }
    }
}

/// Listener callback.
pub type Listener = Box<dyn FnMut(&ResultEvent<'_>) + Send>;

/// Panic payload re-raised when a listener panics.
///
/// Listeners are run-time infrastructure: their panics escalate to the
/// caller. Wrapping the payload lets a runner that guards test code tell a
/// listener panic apart from a panic in the code under test.
#[derive(Debug)]
pub struct ListenerPanic(pub Box<dyn Any + Send>);

/// Counter snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Tests run.
    pub run_count: u64,
    /// Assertions made, including verified expectations.
    pub assertion_count: u64,
    /// Faults classified as failures.
    pub failure_count: u64,
    /// Faults classified as errors.
    pub error_count: u64,
}

impl ResultSummary {
    /// Returns true if nothing failed or errored.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure_count == 0 && self.error_count == 0
    }
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tests, {} assertions, {} failures, {} errors",
            self.run_count, self.assertion_count, self.failure_count, self.error_count
        )
    }
}

/// Assertion counts, fault counts and ordered faults for one run.
#[derive(Default)]
pub struct TestResult {
    summary: ResultSummary,
    faults: Vec<Arc<Fault>>,
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl TestResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one assertion.
    pub fn record_assertion(&mut self) {
        self.summary.assertion_count += 1;
        tracing::trace!(assertions = self.summary.assertion_count, "assertion recorded");
        self.notify_changed();
    }

    /// Records one completed test.
    pub fn record_run(&mut self) {
        self.summary.run_count += 1;
        self.notify_changed();
    }

    /// Appends a fault and notifies `Fault` listeners in registration order,
    /// then `Changed` listeners.
    ///
    /// Returns the stored instance.
    ///
    /// # Panics
    /// Re-raises a listener's panic wrapped in [`ListenerPanic`].
    pub fn record_fault(&mut self, fault: Fault) -> Arc<Fault> {
        let fault = Arc::new(fault);
        if fault.is_failure() {
            self.summary.failure_count += 1;
        } else {
            self.summary.error_count += 1;
        }
        self.faults.push(Arc::clone(&fault));

        tracing::debug!(
            kind = %fault.kind(),
            location = fault.location(),
            test = fault.test_name(),
            "fault recorded"
        );

        self.notify(&ResultEvent::Fault(&fault));
        self.notify_changed();
        fault
    }

    /// Registers a listener for future events of `kind`.
    ///
    /// Registrations are never deduplicated; all fire in registration order.
    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&ResultEvent<'_>) + Send + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    /// Registers a listener on the `Fault` channel.
    pub fn add_fault_listener<F>(&mut self, mut listener: F)
    where
        F: FnMut(&Arc<Fault>) + Send + 'static,
    {
        self.add_listener(EventKind::Fault, move |event| {
            if let ResultEvent::Fault(fault) = *event {
                listener(fault);
            }
        });
    }

    /// Returns the number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Returns the assertion count.
    #[must_use]
    pub const fn assertion_count(&self) -> u64 {
        self.summary.assertion_count
    }

    /// Returns the failure count.
    #[must_use]
    pub const fn failure_count(&self) -> u64 {
        self.summary.failure_count
    }

    /// Returns the error count.
    #[must_use]
    pub const fn error_count(&self) -> u64 {
        self.summary.error_count
    }

    /// Returns the number of tests run.
    #[must_use]
    pub const fn run_count(&self) -> u64 {
        self.summary.run_count
    }

    /// Returns the faults in detection order.
    #[must_use]
    pub fn faults(&self) -> &[Arc<Fault>] {
        &self.faults
    }

    /// Returns true if nothing failed or errored.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Returns a counter snapshot.
    #[must_use]
    pub const fn summary(&self) -> ResultSummary {
        self.summary
    }

    fn notify_changed(&mut self) {
        let summary = self.summary;
        self.notify(&ResultEvent::Changed(&summary));
    }

    fn notify(&mut self, event: &ResultEvent<'_>) {
        let Some(listeners) = self.listeners.get_mut(&event.kind()) else {
            return;
        };
        for listener in listeners.iter_mut() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                let payload = if payload.is::<ListenerPanic>() {
                    payload
                } else {
                    Box::new(ListenerPanic(payload))
                };
                panic::resume_unwind(payload);
            }
        }
    }
}

impl fmt::Debug for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResult")
            .field("summary", &self.summary)
            .field("faults", &self.faults)
            .field("fault_listeners", &self.listener_count(EventKind::Fault))
            .field("changed_listeners", &self.listener_count(EventKind::Changed))
            .finish()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.summary.fmt(f)
    }
}
