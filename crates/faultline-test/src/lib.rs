// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # faultline-test
//!
//! A minimal test runner that drives the faultline accounting facility.
//!
//! This crate provides:
//! - **Test context**: explicit per-test handle for assertions and mocks
//! - **Cases and suites**: named bodies with setup/teardown hooks
//! - **Runner**: executes cases, verifies mocks, converts failures and
//!   panics into faults
//! - **Falsification tests**: numbered tests refuting claims about
//!   assertion counts and fault attribution
//!
//! ## Example
//!
//! ```rust
//! use faultline_core::TestResult;
//! use faultline_test::{TestCase, TestRunner};
//!
//! let case = TestCase::new("expects_message", |ctx| {
//!     let object = ctx.mock("object");
//!     object.expects("message");
//!     object.call("message")?;
//!     Ok(())
//! });
//!
//! let mut result = TestResult::new();
//! TestRunner::new().run(&case, &mut result);
//!
//! assert_eq!(result.assertion_count(), 1);
//! assert_eq!(result.failure_count(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod case;
pub mod config;
pub mod context;
pub mod error;
pub mod runner;

pub use case::{TestCase, TestFn, TestSuite};
pub use config::RunnerConfig;
pub use context::TestContext;
pub use error::{Result, TestError};
pub use runner::{TestRunner, fault_points};
