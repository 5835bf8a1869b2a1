#![forbid(unsafe_code)]
//! marktest: marker-driven test discovery and execution
//!
//! A test unit registers its methods, some of them marked as tests and optionally carrying literal
//! `(params, expected)` scenarios. The engine discovers the marked methods, runs each once per scenario
//! (or once without arguments), coerces scenario literals to the declared parameter kind, and classifies
//! every invocation as PASS, FAIL or ERROR.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `engine` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Methods under test**: a panic inside a registered method is caught by the engine and classified as an
//!   ERROR; it never aborts the run.

pub mod cli;
pub mod engine;
pub mod suites;
pub mod version;

pub use marktest_core::{ConversionError, Outcome, ParamKind, RunTally, Value, coerce};

pub use engine::{RunConfig, RunReporter, TestUnit, run_unit};
