// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # faultline-mock
//!
//! Test doubles with explicit expectations and stubs.
//!
//! - [`Mock::expects`] declares an interaction that must happen; verifying
//!   it counts one assertion
//! - [`Mock::stubs`] declares an interaction that may happen; it is never
//!   verified and never counts
//! - [`Mock::invoke`] is the single entry point for calls on the double
//!
//! Failures are attributed to source lines: unmet expectations to the
//! `expects` call, unexpected invocations to the offending `invoke`.
//!
//! ## Example
//!
//! ```rust
//! use faultline_core::TestResult;
//! use faultline_mock::Mock;
//!
//! let object = Mock::new("object");
//! object.expects("message").returns(7);
//! object.stubs("ping");
//!
//! assert_eq!(object.call("message")?, 7);
//!
//! let mut result = TestResult::new();
//! object.verify(&mut result)?;
//! assert_eq!(result.assertion_count(), 1);
//! # Ok::<(), faultline_core::Failure>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cardinality;
pub mod expectation;
pub mod mock;

pub use cardinality::Cardinality;
pub use expectation::{Expectation, ExpectationRecord};
pub use mock::{Invocation, Mock};
