//! Run reporters.
//!
//! ## RunReporter Trait
//!
//! The engine never prints. It calls a [`RunReporter`] with structured events, which allows for custom output
//! formats by implementing the trait. Three implementations ship with the crate:
//!
//! - [`ConsoleReporter`]: human-readable, color-coded console output
//! - [`JsonReporter`]: one JSON object per event (JSON lines)
//! - [`RecordingReporter`]: keeps every event in memory, for assertions
//!
//! Reporter output is best-effort: write errors on the underlying stream are ignored so a closed pipe cannot
//! change the outcome of a run.

use std::io::{self, Write};
use std::time::Duration;

use marktest_core::{Outcome, RunTally};
use serde_json::json;

use super::descriptor::Invocation;
use super::executor::{ErrorCause, InvocationResult};
use super::summary::RunConfig;
use super::unit::ConstructionFault;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const SEPARATOR: &str = "-------------------------------------------------------";

/// Receives structured events from a run.
pub trait RunReporter {
    /// Called before the unit is constructed
    fn on_run_start(&mut self, _unit_name: &str) {}

    /// Called when the unit cannot be constructed; no further events follow
    fn on_construction_failed(&mut self, unit_name: &str, fault: &ConstructionFault);

    /// Called once discovery (and filtering) is complete
    fn on_discovery_complete(&mut self, test_count: usize);

    /// Called before the invocations of a parameterized test
    fn on_parameterized_start(&mut self, _test_name: &str) {}

    /// Called before the method of an invocation runs
    fn on_invocation_start(&mut self, _invocation: &Invocation<'_>) {}

    /// Called after each invocation has been classified and recorded
    fn on_invocation_complete(&mut self, invocation: &Invocation<'_>, result: &InvocationResult, elapsed: Duration);

    /// Called after the last invocation
    fn on_run_complete(&mut self, tally: &RunTally);
}

// ============================================================================
// Console reporter
// ============================================================================

/// Default console reporter.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    pub color: bool,
    pub verbose: bool,
    pub name_width: usize,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(config: &RunConfig) -> Self {
        Self::with_writer(io::stdout(), config)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, config: &RunConfig) -> Self {
        Self {
            out,
            color: config.color,
            verbose: config.verbose,
            name_width: config.name_width,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn status(&self, result: &InvocationResult) -> String {
        match result {
            InvocationResult::Pass => self.paint(GREEN, "[PASS]"),
            InvocationResult::Fail { .. } => self.paint(RED, "[FAIL]"),
            InvocationResult::Error(ErrorCause::Engine(e)) => self.paint(RED, &format!("[ENGINE ERROR] {e}")),
            InvocationResult::Error(_) => self.paint(YELLOW, "[ERROR]"),
        }
    }

    fn detail(&self, result: &InvocationResult) -> Option<String> {
        match result {
            InvocationResult::Pass | InvocationResult::Error(ErrorCause::Engine(_)) => None,
            InvocationResult::Fail { expected, actual } => Some(self.paint(
                RED,
                &format!("    -> Expected: '{expected}', Actual: '{actual}'"),
            )),
            InvocationResult::Error(ErrorCause::Raised { kind, .. }) => {
                Some(self.paint(YELLOW, &format!("    -> Exception thrown: {kind}")))
            }
            InvocationResult::Error(ErrorCause::Conversion(e)) => {
                Some(self.paint(YELLOW, &format!("    -> Conversion failed: {e}")))
            }
        }
    }
}

impl<W: Write> RunReporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, unit_name: &str) {
        let text = self.paint(CYAN, &format!("Loading class: {unit_name}..."));
        self.line(&text);
    }

    fn on_construction_failed(&mut self, unit_name: &str, fault: &ConstructionFault) {
        let text = self.paint(RED, &format!("CRITICAL: Could not instantiate class {unit_name}"));
        self.line(&text);
        let text = self.paint(RED, &format!("    -> {fault}"));
        self.line(&text);
    }

    fn on_discovery_complete(&mut self, test_count: usize) {
        self.line(&format!("Found {test_count} test methods."));
        self.line(SEPARATOR);
    }

    fn on_parameterized_start(&mut self, test_name: &str) {
        let text = self.paint(CYAN, &format!("Running parameterized test: {test_name}"));
        self.line(&text);
    }

    fn on_invocation_start(&mut self, invocation: &Invocation<'_>) {
        // The status is appended on completion, after anything the method itself prints
        let _ = write!(self.out, "  Test: {:<width$}", invocation.label(), width = self.name_width);
        let _ = self.out.flush();
    }

    fn on_invocation_complete(&mut self, _invocation: &Invocation<'_>, result: &InvocationResult, elapsed: Duration) {
        let mut text = self.status(result);
        if self.verbose {
            text.push_str(&format!(" ({}ms)", elapsed.as_millis()));
        }
        self.line(&text);

        if let Some(detail) = self.detail(result) {
            self.line(&detail);
        }
    }

    fn on_run_complete(&mut self, tally: &RunTally) {
        self.line(SEPARATOR);
        self.line("SUMMARY:");
        self.line(&format!("Total Scenarios: {}", tally.total()));
        let text = self.paint(GREEN, &format!("Passed:          {}", tally.passed()));
        self.line(&text);
        let text = self.paint(RED, &format!("Failed:          {}", tally.failed()));
        self.line(&text);
        let text = self.paint(YELLOW, &format!("Errors:          {}", tally.errors()));
        self.line(&text);
        self.line(SEPARATOR);
        let _ = self.out.flush();
    }
}

// ============================================================================
// JSON-lines reporter
// ============================================================================

/// Emits one JSON object per event, one per line.
pub struct JsonReporter<W: Write = io::Stdout> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: serde_json::Value) {
        let _ = writeln!(self.out, "{event}");
    }
}

impl<W: Write> RunReporter for JsonReporter<W> {
    fn on_run_start(&mut self, unit_name: &str) {
        self.emit(json!({ "event": "run_started", "unit": unit_name }));
    }

    fn on_construction_failed(&mut self, unit_name: &str, fault: &ConstructionFault) {
        self.emit(json!({
            "event": "construction_failed",
            "unit": unit_name,
            "message": fault.to_string(),
        }));
    }

    fn on_discovery_complete(&mut self, test_count: usize) {
        self.emit(json!({ "event": "discovered", "count": test_count }));
    }

    fn on_parameterized_start(&mut self, test_name: &str) {
        self.emit(json!({ "event": "parameterized_started", "name": test_name }));
    }

    fn on_invocation_complete(&mut self, invocation: &Invocation<'_>, result: &InvocationResult, elapsed: Duration) {
        let mut event = json!({
            "event": "invocation",
            "name": invocation.name,
            "param": invocation.param(),
            "outcome": result.outcome().as_str(),
            "elapsed_ms": elapsed.as_secs_f64() * 1000.0,
        });
        match result {
            InvocationResult::Pass => {}
            InvocationResult::Fail { expected, actual } => {
                event["expected"] = json!(expected);
                event["actual"] = json!(actual);
            }
            InvocationResult::Error(cause) => {
                event["error_kind"] = json!(cause.category());
                event["message"] = json!(cause.to_string());
            }
        }
        self.emit(event);
    }

    fn on_run_complete(&mut self, tally: &RunTally) {
        self.emit(json!({
            "event": "summary",
            "total": tally.total(),
            "passed": tally.passed(),
            "failed": tally.failed(),
            "errors": tally.errors(),
        }));
        let _ = self.out.flush();
    }
}

// ============================================================================
// Recording reporter
// ============================================================================

/// An event captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    RunStarted(String),
    ConstructionFailed(String, ConstructionFault),
    DiscoveryComplete(usize),
    ParameterizedStarted(String),
    Invocation {
        label: String,
        outcome: Outcome,
        result: InvocationResult,
    },
    RunComplete(RunTally),
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<RecordedEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of completed invocations, in execution order.
    pub fn invocation_labels(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Invocation { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Results of completed invocations, in execution order.
    pub fn results(&self) -> Vec<&InvocationResult> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::Invocation { result, .. } => Some(result),
                _ => None,
            })
            .collect()
    }
}

impl RunReporter for RecordingReporter {
    fn on_run_start(&mut self, unit_name: &str) {
        self.events.push(RecordedEvent::RunStarted(unit_name.to_string()));
    }

    fn on_construction_failed(&mut self, unit_name: &str, fault: &ConstructionFault) {
        self.events
            .push(RecordedEvent::ConstructionFailed(unit_name.to_string(), fault.clone()));
    }

    fn on_discovery_complete(&mut self, test_count: usize) {
        self.events.push(RecordedEvent::DiscoveryComplete(test_count));
    }

    fn on_parameterized_start(&mut self, test_name: &str) {
        self.events.push(RecordedEvent::ParameterizedStarted(test_name.to_string()));
    }

    fn on_invocation_complete(&mut self, invocation: &Invocation<'_>, result: &InvocationResult, _elapsed: Duration) {
        self.events.push(RecordedEvent::Invocation {
            label: invocation.label(),
            outcome: result.outcome(),
            result: result.clone(),
        });
    }

    fn on_run_complete(&mut self, tally: &RunTally) {
        self.events.push(RecordedEvent::RunComplete(*tally));
    }
}
