//! Falsification Tests: Category C - Fault Listeners (F041-F047)
//!
//! Every registered fault listener sees every fault exactly once, in
//! registration order, and all of them see the same instance.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use faultline_core::{EventKind, ListenerPanic, ResultEvent, TestResult};
use parking_lot::Mutex;

use super::{collect_faults, run_test_into};

/// F041: N listeners each fire once per fault
///
/// # Falsification Attempt
/// Register three listeners and produce a single fault.
#[test]
fn f041_each_listener_fires_once() {
    let mut result = TestResult::new();
    let collected: Vec<_> = (0..3).map(|_| collect_faults(&mut result)).collect();

    run_test_into(&mut result, |ctx| ctx.flunk("once"));

    for (i, faults) in collected.iter().enumerate() {
        assert_eq!(faults.lock().len(), 1, "F041 FALSIFIED: listener {i} fired wrong count");
    }
}

/// F042: Listeners fire in registration order
#[test]
fn f042_registration_order() {
    let mut result = TestResult::new();
    let order: Arc<Mutex<Vec<usize>>> = Arc::default();
    for i in 0..4 {
        let sink = Arc::clone(&order);
        result.add_fault_listener(move |_| sink.lock().push(i));
    }

    run_test_into(&mut result, |ctx| ctx.flunk("x"));

    assert_eq!(*order.lock(), [0, 1, 2, 3], "F042 FALSIFIED: listeners reordered");
}

/// F043: All listeners receive the identical fault instance
///
/// # Falsification Attempt
/// Compare pointers of the faults seen by two listeners and the one stored.
#[test]
fn f043_identical_instance() {
    let mut result = TestResult::new();
    let first = collect_faults(&mut result);
    let second = collect_faults(&mut result);

    run_test_into(&mut result, |ctx| {
        ctx.mock("object").expects("message");
        Ok(())
    });

    let (first, second) = (first.lock(), second.lock());
    assert!(Arc::ptr_eq(&first[0], &second[0]), "F043 FALSIFIED: listeners got copies");
    assert!(
        Arc::ptr_eq(&first[0], &result.faults()[0]),
        "F043 FALSIFIED: stored fault differs from notified fault"
    );
}

/// F044: A passing test never notifies fault listeners
#[test]
fn f044_no_fault_no_notification() {
    let mut result = TestResult::new();
    let faults = collect_faults(&mut result);

    run_test_into(&mut result, |ctx| {
        let object = ctx.mock("object");
        object.expects("message");
        object.stubs("other");
        object.call("message")?;
        ctx.assert(true)
    });

    assert!(faults.lock().is_empty(), "F044 FALSIFIED: listener fired without a fault");
}

/// F045: The fault is announced before the run is counted
///
/// # Falsification Attempt
/// Record the run count seen by the fault listener and by every
/// subsequent `Changed` event.
#[test]
fn f045_fault_event_precedes_run_completion() {
    let mut result = TestResult::new();
    let events: Arc<Mutex<Vec<(EventKind, u64)>>> = Arc::default();

    let sink = Arc::clone(&events);
    result.add_listener(EventKind::Fault, move |event| {
        sink.lock().push((event.kind(), 0));
    });
    let sink = Arc::clone(&events);
    result.add_listener(EventKind::Changed, move |event| {
        if let ResultEvent::Changed(summary) = event {
            sink.lock().push((event.kind(), summary.run_count));
        }
    });

    run_test_into(&mut result, |ctx| ctx.flunk("x"));

    let events = events.lock();
    let fault_at = events
        .iter()
        .position(|(kind, _)| *kind == EventKind::Fault)
        .expect("F045 FALSIFIED: no fault event");
    assert!(
        events[..fault_at].iter().all(|(_, runs)| *runs == 0),
        "F045 FALSIFIED: run counted before the fault was announced"
    );
    assert_eq!(events.last().map(|(_, runs)| *runs), Some(1));
}

/// F046: A panicking listener aborts the run instead of becoming a fault
#[test]
fn f046_listener_panic_escalates() {
    let mut result = TestResult::new();
    result.add_fault_listener(|_| panic!("listener broke"));

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        run_test_into(&mut result, |ctx| ctx.flunk("x"));
    }))
    .expect_err("F046 FALSIFIED: listener panic swallowed");

    assert!(payload.is::<ListenerPanic>(), "F046 FALSIFIED: panic not wrapped");
    assert_eq!(result.error_count(), 0, "F046 FALSIFIED: listener panic recorded as error");
}

/// F047: Registering the same listener twice fires it twice
#[test]
fn f047_duplicate_registration() {
    let mut result = TestResult::new();
    let hits: Arc<Mutex<u32>> = Arc::default();
    let listener = {
        let hits = Arc::clone(&hits);
        move |_: &Arc<faultline_core::Fault>| *hits.lock() += 1
    };
    result.add_fault_listener(listener.clone());
    result.add_fault_listener(listener);

    run_test_into(&mut result, |ctx| ctx.flunk("x"));

    assert_eq!(*hits.lock(), 2, "F047 FALSIFIED: duplicate registration collapsed");
    assert_eq!(result.listener_count(EventKind::Fault), 2);
}
