//! Collect-all input validation.
//!
//! A [`Validation`] is a ledger of failed `(field, message)` entries. Each
//! rule appends to it and returns whether the value passed, so callers run
//! every rule and inspect the ledger once at the end:
//!
//! ```rust
//! use scribe::Validation;
//!
//! let mut valid = Validation::new();
//! valid.required("title", None, "title is required");
//! valid.range("state", 7, 0, 1, "state must be 0 or 1");
//! assert_eq!(valid.violations().len(), 2);
//! ```

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// One failed constraint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    pub field: &'static str,
    pub message: Cow<'static, str>,
}

/// A record of validation results, in the order the rules ran.
#[derive(Debug, Default)]
pub struct Validation {
    failed: SmallVec<[Violation; 4]>,
}

impl Validation {
    pub fn new() -> Self {
        Self { failed: SmallVec::new() }
    }

    /// Records a violation for `field`.
    pub fn record(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.failed.push(Violation { field, message: message.into() });
    }

    /// Parses an optional integer input.
    ///
    /// Absent input yields `None` without a violation; the caller decides
    /// whether absence is acceptable. Text that is not an integer is recorded.
    pub fn integer(&mut self, field: &'static str, raw: Option<&str>) -> Option<i64> {
        let raw = raw?;
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.record(field, format!("{field} must be an integer"));
                None
            }
        }
    }

    pub fn required(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        message: &'static str,
    ) -> bool {
        let ok = value.is_some_and(|v| !v.is_empty());
        if !ok {
            self.record(field, message);
        }
        ok
    }

    pub fn min(
        &mut self,
        field: &'static str,
        value: i64,
        min: i64,
        message: &'static str,
    ) -> bool {
        let ok = value >= min;
        if !ok {
            self.record(field, message);
        }
        ok
    }

    /// Inclusive on both ends.
    pub fn range(
        &mut self,
        field: &'static str,
        value: i64,
        lo: i64,
        hi: i64,
        message: &'static str,
    ) -> bool {
        let ok = (lo..=hi).contains(&value);
        if !ok {
            self.record(field, message);
        }
        ok
    }

    /// Length is counted in characters, not bytes. Absent values pass.
    pub fn max_size(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max: usize,
        message: &'static str,
    ) -> bool {
        let ok = value.is_none_or(|v| v.chars().count() <= max);
        if !ok {
            self.record(field, message);
        }
        ok
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.failed.iter().any(|v| v.field == field)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.failed
    }

    /// Emits one warning per violation. Violations are never sent to clients.
    pub fn log(&self) {
        for v in &self.failed {
            tracing::warn!(field = v.field, message = %v.message, "invalid parameter");
        }
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.failed {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            write!(f, "invalid value for `{}`: {}", v.field, v.message)?;
        }
        Ok(())
    }
}
