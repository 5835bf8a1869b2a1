//! The discovery and execution engine.
//!
//! ## Modules
//!
//! - `unit` - `TestUnit` trait, method registry, fault types
//! - `descriptor` - scenarios, test descriptors and invocations
//! - `discovery` - marked-method discovery and ordering
//! - `executor` - coercion, invocation and classification of single calls
//! - `reporter` - `RunReporter` trait and the console/JSON/recording reporters
//! - `summary` - the run driver and `RunConfig`
//!
//! ## Design
//!
//! Units register their methods explicitly rather than being introspected. The run is single-threaded and
//! fully sequential: descriptors in discovery order, scenarios in declaration order. Every per-invocation
//! fault is converted into an ERROR outcome in `executor`; only a construction fault escapes, and it aborts
//! the run before discovery.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod descriptor;
pub mod discovery;
pub mod executor;
pub mod reporter;
pub mod summary;
pub mod unit;

pub use descriptor::{Invocation, Scenario, TestDescriptor};
pub use discovery::{discover, filter_by_keyword};
pub use executor::{ErrorCause, InvocationResult, execute_descriptor, invoke};
pub use reporter::{ConsoleReporter, JsonReporter, RecordedEvent, RecordingReporter, RunReporter};
pub use summary::{RunConfig, run_unit};
pub use unit::{Args, ConstructionFault, EngineFault, Fault, MethodEntry, MethodFn, Registry, TestMarker, TestUnit};
