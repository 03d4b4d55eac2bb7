// Demos are allowed to use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Faultline Suite Demo
//!
//! Runs a small suite mixing passing tests, unmet expectations, unexpected
//! invocations and flunks, then prints every fault with the source line it
//! resolves to.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example suite
//!
//! # Load runner settings from a TOML file
//! cargo run --example suite -- --config runner.toml
//!
//! # Emit faults as JSON lines
//! RUST_LOG=faultline_test=debug cargo run --example suite -- --json
//! ```

use std::sync::Arc;

use faultline::prelude::*;
use parking_lot::Mutex;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn build_suite() -> TestSuite {
    TestSuite::new("mocha_integration")
        .with_case(TestCase::new("test_expectation_counted", |ctx| {
            let object = ctx.mock("object");
            object.expects("message").returns(json!(42));
            let answer = object.call("message")?;
            ctx.assert_eq(json!(42), answer)
        }))
        .with_case(TestCase::new("test_stub_not_counted", |ctx| {
            let object = ctx.mock("object");
            object.stubs("message").returns_sequence([json!(1), json!(2)]);
            object.call("message")?;
            object.call("message")?;
            Ok(())
        }))
        .with_case(TestCase::new("test_unmet_expectation", |ctx| {
            let object = ctx.mock("object");
            object.expects("message");
            Ok(())
        }))
        .with_case(TestCase::new("test_unexpected_invocation", |ctx| {
            let object = ctx.mock("object");
            object.invoke("message", &[json!(1), json!("a")])?;
            Ok(())
        }))
        .with_case(TestCase::new("test_flunk", |ctx| ctx.flunk("Flunked.")))
        .with_case(
            TestCase::new("test_with_fixtures", |ctx| {
                let object = ctx.mock("object");
                object.expects("message").at_least_once();
                object.call("message")?;
                ctx.assert(true)
            })
            .with_setup(|ctx| ctx.assert(true))
            .with_teardown(|_| Ok(())),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let as_json = args.iter().any(|a| a == "--json");
    let config = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map_or_else(RunnerConfig::default, |path| {
            RunnerConfig::load(path).expect("failed to load runner config")
        });

    let suite = build_suite();
    let mut result = TestResult::new();

    let seen: Arc<Mutex<Vec<Arc<Fault>>>> = Arc::default();
    let sink = Arc::clone(&seen);
    result.add_fault_listener(move |fault| sink.lock().push(Arc::clone(fault)));

    TestRunner::with_config(config).run_suite_into(&suite, &mut result);

    for fault in seen.lock().iter() {
        if as_json {
            println!("{}", serde_json::to_string(fault.as_ref()).unwrap());
            continue;
        }
        println!("{} {}", fault.kind().marker(), fault);
        match fault.execution_point() {
            Ok(point) => println!("  -> {point}"),
            Err(e) => println!("  -> unresolved: {e}"),
        }
    }

    if as_json {
        println!("{}", serde_json::to_string(&result.summary()).unwrap());
    } else {
        println!();
        println!("{result}");
    }
}
