//! Faultline: assertion accounting and fault attribution for tests with mocks.
//!
//! # Quick Start
//!
//! ```rust
//! use faultline::prelude::*;
//!
//! let case = TestCase::new("test_me", |ctx| {
//!     let object = ctx.mock("object");
//!     object.expects("message");
//!     Ok(())
//! });
//!
//! let mut result = TestResult::new();
//! TestRunner::new().run(&case, &mut result);
//!
//! assert_eq!(result.failure_count(), 1);
//! assert_eq!(result.faults()[0].kind(), FaultKind::UnmetExpectation);
//! ```

pub use faultline_core as core;
pub use faultline_mock as mock;
pub use faultline_test as runner;

/// Prelude module for common imports.
pub mod prelude {
    pub use faultline_core::{
        EventKind, ExecutionPoint, Failure, Fault, FaultKind, ResultEvent, ResultSummary,
        TestResult,
    };
    pub use faultline_mock::{Cardinality, Mock};
    pub use faultline_test::{RunnerConfig, TestCase, TestContext, TestRunner, TestSuite};
}
