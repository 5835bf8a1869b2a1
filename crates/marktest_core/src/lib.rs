//! Provide the shared, pure vocabulary of the marktest engine.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that both:
//! - the engine uses to coerce scenario literals and classify invocations, and
//! - test units use to declare parameter kinds and build return values.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no engine-specific types.
//! - Current scope: parameter kind vocabulary, the [`Value`] tagged union with its canonical string form,
//!   literal coercion, and outcome/tally bookkeeping.

pub mod coerce;
pub mod kinds;
pub mod outcome;
pub mod value;

pub use coerce::{ConversionError, coerce};
pub use kinds::ParamKind;
pub use outcome::{Outcome, RunTally};
pub use value::Value;
