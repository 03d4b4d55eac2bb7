//! Falsification Tests: Category B - Fault Location Attribution (F021-F028)
//!
//! Every fault must point at the line that caused it, never at the line
//! where verification ran.

use std::sync::Arc;

use faultline_core::{ExecutionPoint, FaultKind, TestResult};
use faultline_test::{RunnerConfig, TestCase, TestRunner};

use super::{PointSlot, captured, collect_faults, run_test_into};

/// F021: Unmet expectation points at the `expects` call
///
/// # Falsification Attempt
/// Capture the execution point on the same line as `expects`, let the
/// expectation go unmet, and compare with the fault's location.
#[test]
fn f021_unmet_expectation_points_at_expects() {
    let mut result = TestResult::new();
    let faults = collect_faults(&mut result);
    let slot = PointSlot::default();
    let sink = Arc::clone(&slot);

    run_test_into(&mut result, move |ctx| {
        let object = ctx.mock("object");
        let (point, _) = (ExecutionPoint::current(), object.expects("message"));
        *sink.lock() = Some(point);
        Ok(())
    });

    let faults = faults.lock();
    assert_eq!(faults.len(), 1, "F021 FALSIFIED: expected exactly one fault");
    assert_eq!(
        faults[0].execution_point().unwrap(),
        captured(&slot),
        "F021 FALSIFIED: fault does not point at the expects call"
    );
}

/// F022: Unexpected invocation points at the offending call
#[test]
fn f022_unexpected_invocation_points_at_call() {
    let mut result = TestResult::new();
    let faults = collect_faults(&mut result);
    let slot = PointSlot::default();
    let sink = Arc::clone(&slot);

    run_test_into(&mut result, move |ctx| {
        let object = ctx.mock("object");
        let (point, outcome) = (ExecutionPoint::current(), object.call("message"));
        *sink.lock() = Some(point);
        outcome.map(drop)
    });

    let faults = faults.lock();
    assert_eq!(faults.len(), 1, "F022 FALSIFIED: expected exactly one fault");
    assert_eq!(faults[0].kind(), FaultKind::UnexpectedInvocation);
    assert_eq!(
        faults[0].execution_point().unwrap(),
        captured(&slot),
        "F022 FALSIFIED: fault does not point at the unexpected call"
    );
}

/// F023: Failing assertion points at the assertion
#[test]
fn f023_failing_assertion_points_at_assertion() {
    let mut result = TestResult::new();
    let faults = collect_faults(&mut result);
    let slot = PointSlot::default();
    let sink = Arc::clone(&slot);

    run_test_into(&mut result, move |ctx| {
        let (point, outcome) = (ExecutionPoint::current(), ctx.flunk("Flunked."));
        *sink.lock() = Some(point);
        outcome
    });

    let faults = faults.lock();
    assert_eq!(faults.len(), 1, "F023 FALSIFIED: expected exactly one fault");
    assert_eq!(
        faults[0].execution_point().unwrap(),
        captured(&slot),
        "F023 FALSIFIED: fault does not point at the flunk call"
    );
}

/// F024: Attribution is not the verification site
///
/// # Falsification Attempt
/// Check that an unmet-expectation fault lies in this file, where the
/// expectation was declared, rather than in the runner's source.
#[test]
fn f024_not_attributed_to_verification() {
    let mut result = TestResult::new();
    run_test_into(&mut result, |ctx| {
        ctx.mock("object").expects("message");
        Ok(())
    });

    let point = result.faults()[0].execution_point().unwrap();
    assert_eq!(point.file(), file!(), "F024 FALSIFIED: attributed to runner source");
}

/// F025: Expectations declared in a helper are attributed to the helper
#[test]
fn f025_helper_declaration_site() {
    fn declare(object: &faultline_mock::Mock) -> ExecutionPoint {
        let (point, _) = (ExecutionPoint::current(), object.expects("helper"));
        point
    }

    let slot = PointSlot::default();
    let sink = Arc::clone(&slot);
    let mut result = TestResult::new();
    run_test_into(&mut result, move |ctx| {
        let object = ctx.mock("object");
        *sink.lock() = Some(declare(&object));
        Ok(())
    });

    assert_eq!(result.faults()[0].execution_point().unwrap(), captured(&slot));
}

/// F026: Location strings are backtrace-compatible and carry the test name
#[test]
fn f026_location_format() {
    let mut result = TestResult::new();
    run_test_into(&mut result, |ctx| ctx.flunk("x"));

    let location = result.faults()[0].location();
    assert!(
        location.ends_with(":in test_me"),
        "F026 FALSIFIED: context missing from {location}"
    );
    assert!(location.starts_with(file!()), "F026 FALSIFIED: file missing from {location}");
}

/// F027: Without annotation the location is the bare `file:line`
#[test]
fn f027_location_without_context() {
    let runner = TestRunner::with_config(RunnerConfig {
        annotate_context: false,
        ..Default::default()
    });
    let mut result = TestResult::new();
    runner.run(&TestCase::new("plain", |ctx| ctx.flunk("x")), &mut result);

    let fault = &result.faults()[0];
    let point = fault.execution_point().unwrap();
    assert_eq!(fault.location(), point.to_string(), "F027 FALSIFIED: unexpected context");
}

/// F028: A panic is attributed to the test case declaration
#[test]
fn f028_panic_points_at_case_declaration() {
    let (point, case) = (ExecutionPoint::current(), TestCase::new("boom", |_| panic!("boom")));
    let mut result = TestResult::new();
    TestRunner::new().run(&case, &mut result);

    assert_eq!(result.faults()[0].kind(), FaultKind::Error);
    assert_eq!(
        result.faults()[0].execution_point().unwrap(),
        point,
        "F028 FALSIFIED: panic not attributed to the case declaration"
    );
}
