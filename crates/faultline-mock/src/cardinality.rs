//! Invocation-count constraints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Allowed range of invocations for an expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    required: u32,
    maximum: Option<u32>,
}

impl Cardinality {
    /// Exactly `n` invocations.
    #[must_use]
    pub const fn exactly(n: u32) -> Self {
        Self {
            required: n,
            maximum: Some(n),
        }
    }

    /// At least `n` invocations.
    #[must_use]
    pub const fn at_least(n: u32) -> Self {
        Self {
            required: n,
            maximum: None,
        }
    }

    /// At most `n` invocations.
    #[must_use]
    pub const fn at_most(n: u32) -> Self {
        Self {
            required: 0,
            maximum: Some(n),
        }
    }

    /// Between `min` and `max` invocations (inclusive). Reversed bounds are
    /// swapped.
    #[must_use]
    pub const fn between(min: u32, max: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            required: min,
            maximum: Some(max),
        }
    }

    /// Any number of invocations, including none.
    #[must_use]
    pub const fn any() -> Self {
        Self::at_least(0)
    }

    /// Returns true if one more invocation is within bounds.
    #[must_use]
    pub fn allows_invocation(&self, invoked: u32) -> bool {
        self.maximum.is_none_or(|max| invoked < max)
    }

    /// Returns true if `invoked` satisfies the constraint.
    #[must_use]
    pub fn is_satisfied(&self, invoked: u32) -> bool {
        invoked >= self.required && self.maximum.is_none_or(|max| invoked <= max)
    }

    /// Returns the minimum required invocations.
    #[must_use]
    pub const fn required(&self) -> u32 {
        self.required
    }

    /// Returns the maximum permitted invocations, if bounded.
    #[must_use]
    pub const fn maximum(&self) -> Option<u32> {
        self.maximum
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::exactly(1)
    }
}

/// Renders a count the way failure messages read: `never`, `once`, `twice`, `3 times`.
#[must_use]
pub fn times(n: u32) -> String {
    match n {
        0 => "never".to_string(),
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{n} times"),
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.required, self.maximum) {
            (0, Some(0)) => f.write_str("never"),
            (min, Some(max)) if min == max => write!(f, "exactly {}", times(min)),
            (0, None) => f.write_str("any number of times"),
            (min, None) => write!(f, "at least {}", times(min)),
            (0, Some(max)) => write!(f, "at most {}", times(max)),
            (min, Some(max)) => write!(f, "between {min} and {max} times"),
        }
    }
}
