// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # faultline-core
//!
//! Assertion accounting and fault attribution for a single test run.
//!
//! - [`ExecutionPoint`]: a comparable source location (file + line)
//! - [`Fault`]: an immutable record of one failure or error
//! - [`Failure`]: the value test code returns via `?` when a check fails
//! - [`TestResult`]: assertion/failure counters, ordered faults, and a typed
//!   listener registry notified synchronously as faults are recorded
//!
//! ## Example
//!
//! ```rust
//! use faultline_core::{ExecutionPoint, Failure, TestResult};
//!
//! let mut result = TestResult::new();
//! result.add_fault_listener(|fault| eprintln!("{fault}"));
//!
//! let failure = Failure::assertion("expected a value");
//! let fault = result.record_fault(failure.into_fault("test_value", true));
//!
//! assert_eq!(result.failure_count(), 1);
//! assert_eq!(fault.execution_point()?.file(), file!());
//! # Ok::<(), faultline_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod failure;
pub mod fault;
pub mod point;
pub mod result;

pub use error::{CoreError, Result};
pub use failure::Failure;
pub use fault::{Fault, FaultKind};
pub use point::ExecutionPoint;
pub use result::{EventKind, Listener, ListenerPanic, ResultEvent, ResultSummary, TestResult};
