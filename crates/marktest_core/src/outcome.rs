//! Outcome classification and run tally bookkeeping.

use std::fmt;

/// Classification of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

impl Outcome {
    /// Upper-case status tag, as shown by reporters.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::Error => "ERROR",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running counts of outcomes across a run.
///
/// Counters only move through [`RunTally::record`], so `total == passed + failed + errors` holds after every
/// call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    total: usize,
    passed: usize,
    failed: usize,
    errors: usize,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one invocation outcome into the tally.
    pub fn record(&mut self, outcome: Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
            Outcome::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Number of recorded invocations with the given outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Pass => self.passed,
            Outcome::Fail => self.failed,
            Outcome::Error => self.errors,
        }
    }

    /// Returns true if no invocation failed or errored.
    ///
    /// An empty run is a success.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}
