//! Execution engine: one invocation at a time, classified as PASS, FAIL or ERROR.
//!
//! ## Per-invocation flow
//!
//! 1. **Coerce**: a scenario's parameter literal is converted to the method's *first* declared parameter
//!    kind. A conversion failure is an ERROR and the method is never called.
//! 2. **Invoke**: the argument count is checked against the declared parameter count, then the method is
//!    called. `Err(Fault::Raised)` and panics are faults of the method body; `Err(Fault::Engine)` and arity
//!    mismatches are engine faults. Both classify as ERROR.
//! 3. **Verify**: with no scenario, fault-freedom is a PASS and the return value is ignored. With a scenario,
//!    the canonical string of the return value must equal `expected` exactly (case- and
//!    whitespace-sensitive).
//! 4. **Record**: the outcome is folded into the [`RunTally`] and reported before the next invocation.
//!
//! Every fault is contained here; nothing above this module sees a raw per-invocation fault.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::thread;
use std::time::{Duration, Instant};

use marktest_core::{ConversionError, Outcome, RunTally, Value, coerce};

use super::descriptor::{Invocation, Scenario, TestDescriptor};
use super::reporter::RunReporter;
use super::unit::{Args, EngineFault, Fault};

/// Category name reported for a panic inside a method body.
pub const PANIC_KIND: &str = "Panic";

thread_local! {
    static CAPTURING_PANIC: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Classified result of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Pass,
    /// The stringified return value did not match the scenario's expectation.
    Fail { expected: String, actual: String },
    Error(ErrorCause),
}

impl InvocationResult {
    pub fn outcome(&self) -> Outcome {
        match self {
            InvocationResult::Pass => Outcome::Pass,
            InvocationResult::Fail { .. } => Outcome::Fail,
            InvocationResult::Error(_) => Outcome::Error,
        }
    }
}

/// Why an invocation ended in ERROR.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCause {
    /// The parameter literal could not be coerced; the method was not called.
    Conversion(ConversionError),
    /// The method body raised a fault or panicked.
    Raised { kind: String, message: String },
    /// The method could not be invoked as declared.
    Engine(EngineFault),
}

impl ErrorCause {
    /// Short category used by reporters.
    pub fn category(&self) -> &str {
        match self {
            ErrorCause::Conversion(_) => "ConversionError",
            ErrorCause::Raised { kind, .. } => kind,
            ErrorCause::Engine(_) => "EngineError",
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCause::Conversion(e) => write!(f, "{e}"),
            ErrorCause::Raised { kind, message } => write!(f, "{kind}: {message}"),
            ErrorCause::Engine(e) => write!(f, "{e}"),
        }
    }
}

/// Run a single invocation of `descriptor` against `unit`.
///
/// ## Parameters
/// - `unit`: the unit under test, shared by every invocation of the run.
/// - `descriptor`: the method being exercised.
/// - `scenario`: the scenario driving this call, or `None` for an argument-less invocation.
///
/// ## Returns
/// - The classified [`InvocationResult`]. This function never panics on behalf of the method.
pub fn invoke<U>(unit: &mut U, descriptor: &TestDescriptor<U>, scenario: Option<&Scenario>) -> InvocationResult {
    let args = match scenario {
        Some(scenario) => {
            let Some(&kind) = descriptor.params().first() else {
                return InvocationResult::Error(ErrorCause::Engine(EngineFault::NoParameters {
                    method: descriptor.name().to_string(),
                }));
            };
            match coerce(scenario.params(), kind) {
                Ok(value) => Args::new(vec![value]),
                Err(e) => return InvocationResult::Error(ErrorCause::Conversion(e)),
            }
        }
        None => Args::none(),
    };

    if args.len() != descriptor.params().len() {
        return InvocationResult::Error(ErrorCause::Engine(EngineFault::Arity {
            expected: descriptor.params().len(),
            got: args.len(),
        }));
    }

    let call = descriptor.call();
    let returned = match call_capturing_panics(|| call(unit, &args)) {
        Ok(Ok(value)) => value,
        Ok(Err(Fault::Raised { kind, message })) => {
            return InvocationResult::Error(ErrorCause::Raised { kind, message });
        }
        Ok(Err(Fault::Engine(e))) => return InvocationResult::Error(ErrorCause::Engine(e)),
        Err(payload) => {
            return InvocationResult::Error(ErrorCause::Raised {
                kind: PANIC_KIND.to_string(),
                message: panic_message(payload.as_ref()),
            });
        }
    };

    verify(scenario, &returned)
}

/// Run `f`, turning a panic into `Err` without printing the usual panic message.
///
/// The process-wide hook is wrapped once; panics on other threads, or outside a captured call, still reach
/// the previously installed hook.
pub(crate) fn call_capturing_panics<R>(f: impl FnOnce() -> R) -> thread::Result<R> {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING_PANIC.with(Cell::get) {
                previous(info);
            }
        }));
    });

    let outer = CAPTURING_PANIC.with(|capturing| capturing.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CAPTURING_PANIC.with(|capturing| capturing.set(outer));
    result
}

fn verify(scenario: Option<&Scenario>, returned: &Value) -> InvocationResult {
    let Some(scenario) = scenario else {
        return InvocationResult::Pass;
    };
    let actual = returned.to_string();
    if actual == scenario.expected() {
        InvocationResult::Pass
    } else {
        InvocationResult::Fail {
            expected: scenario.expected().to_string(),
            actual,
        }
    }
}

/// Execute every invocation of `descriptor` in order, recording each outcome in `tally` and reporting it.
pub fn execute_descriptor<U>(
    unit: &mut U,
    descriptor: &TestDescriptor<U>,
    tally: &mut RunTally,
    reporter: &mut dyn RunReporter,
) {
    if descriptor.is_parameterized() {
        reporter.on_parameterized_start(descriptor.name());
    }

    for invocation in descriptor.invocations() {
        reporter.on_invocation_start(&invocation);
        let (result, elapsed) = timed_invoke(unit, descriptor, &invocation);
        tally.record(result.outcome());
        tracing::debug!(
            test = %invocation.label(),
            outcome = %result.outcome(),
            elapsed_us = elapsed.as_micros() as u64,
            "invocation complete"
        );
        reporter.on_invocation_complete(&invocation, &result, elapsed);
    }
}

fn timed_invoke<U>(
    unit: &mut U,
    descriptor: &TestDescriptor<U>,
    invocation: &Invocation<'_>,
) -> (InvocationResult, Duration) {
    let start = Instant::now();
    let result = invoke(unit, descriptor, invocation.scenario);
    (result, start.elapsed())
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marktest_core::ParamKind;

    use super::*;
    use crate::engine::discovery::discover;
    use crate::engine::unit::Registry;

    #[derive(Default)]
    struct Counter {
        calls: usize,
    }

    fn descriptor_for(build: impl FnOnce(&mut Registry<Counter>)) -> TestDescriptor<Counter> {
        let mut registry = Registry::new();
        build(&mut registry);
        discover(&registry).into_iter().next().unwrap()
    }

    #[test]
    fn test_no_scenario_ignores_return_value() {
        let d = descriptor_for(|r| {
            r.test("returns_int", &[], |_, _| Ok(Value::Int(42)));
        });
        assert_eq!(invoke(&mut Counter::default(), &d, None), InvocationResult::Pass);
    }

    #[test]
    fn test_matching_expectation_passes() {
        let d = descriptor_for(|r| {
            r.test("add_one", &[ParamKind::Int], |_, args| Ok(Value::Int(args.int(0)? + 1)))
                .scenario("1", "2");
        });
        let scenario = &d.scenarios()[0];
        assert_eq!(invoke(&mut Counter::default(), &d, Some(scenario)), InvocationResult::Pass);
    }

    #[test]
    fn test_mismatch_fails_with_both_values() {
        let d = descriptor_for(|r| {
            r.test("add_one", &[ParamKind::Int], |_, args| Ok(Value::Int(args.int(0)? + 1)))
                .scenario("10", "99");
        });
        let result = invoke(&mut Counter::default(), &d, Some(&d.scenarios()[0]));
        assert_eq!(
            result,
            InvocationResult::Fail {
                expected: "99".into(),
                actual: "11".into(),
            }
        );
    }

    #[test]
    fn test_comparison_is_case_and_whitespace_sensitive() {
        let d = descriptor_for(|r| {
            r.test("echo", &[ParamKind::Str], |_, args| Ok(Value::from(args.str(0)?)))
                .scenario("java", "Java")
                .scenario("java", "java ");
        });
        for scenario in d.scenarios() {
            assert_eq!(invoke(&mut Counter::default(), &d, Some(scenario)).outcome(), Outcome::Fail);
        }
    }

    #[test]
    fn test_conversion_failure_skips_invocation() {
        let d = descriptor_for(|r| {
            r.test("count", &[ParamKind::Int], |c, _| {
                c.calls += 1;
                Ok(Value::Unit)
            })
            .scenario("abc", "null");
        });
        let mut unit = Counter::default();
        let result = invoke(&mut unit, &d, Some(&d.scenarios()[0]));
        assert!(matches!(result, InvocationResult::Error(ErrorCause::Conversion(_))));
        assert_eq!(unit.calls, 0);
    }

    #[test]
    fn test_raised_fault_is_error_even_with_expectation() {
        let d = descriptor_for(|r| {
            r.test("boom", &[ParamKind::Str], |_, _| Err(Fault::runtime("nope")))
                .scenario("x", "nope");
        });
        let result = invoke(&mut Counter::default(), &d, Some(&d.scenarios()[0]));
        let InvocationResult::Error(cause) = result else {
            panic!("expected an error result");
        };
        assert_eq!(cause.category(), "RuntimeError");
    }

    #[test]
    fn test_panic_is_contained() {
        let d = descriptor_for(|r| {
            r.test("panics", &[], |_, _| panic!("kaboom"));
        });
        let result = invoke(&mut Counter::default(), &d, None);
        assert_eq!(
            result,
            InvocationResult::Error(ErrorCause::Raised {
                kind: PANIC_KIND.into(),
                message: "kaboom".into(),
            })
        );
    }

    #[test]
    fn test_panic_capture_is_scoped_to_the_method_call() {
        #[derive(Default)]
        struct Observer {
            capturing_inside: Option<bool>,
        }

        let mut registry = Registry::<Observer>::new();
        registry.test("panics", &[], |observer, _| {
            observer.capturing_inside = Some(CAPTURING_PANIC.with(Cell::get));
            panic!("kaboom")
        });
        let d = discover(&registry).into_iter().next().unwrap();

        let mut unit = Observer::default();
        let result = invoke(&mut unit, &d, None);
        assert_eq!(result.outcome(), Outcome::Error);
        assert_eq!(unit.capturing_inside, Some(true));
        assert!(!CAPTURING_PANIC.with(Cell::get));
    }

    #[test]
    fn test_multi_parameter_method_is_arity_error() {
        let d = descriptor_for(|r| {
            r.test("pair", &[ParamKind::Int, ParamKind::Int], |_, _| Ok(Value::Unit))
                .scenario("1", "null");
        });
        let result = invoke(&mut Counter::default(), &d, Some(&d.scenarios()[0]));
        assert_eq!(
            result,
            InvocationResult::Error(ErrorCause::Engine(EngineFault::Arity { expected: 2, got: 1 }))
        );
    }

    #[test]
    fn test_parameterless_method_with_scenario_is_engine_error() {
        let d = descriptor_for(|r| {
            r.test("nullary", &[], |_, _| Ok(Value::Unit)).scenario("1", "null");
        });
        let result = invoke(&mut Counter::default(), &d, Some(&d.scenarios()[0]));
        assert!(matches!(
            result,
            InvocationResult::Error(ErrorCause::Engine(EngineFault::NoParameters { .. }))
        ));
    }

    #[test]
    fn test_unit_return_stringifies_as_null() {
        let d = descriptor_for(|r| {
            r.test("void", &[ParamKind::Str], |_, _| Ok(Value::Unit)).scenario("x", "null");
        });
        assert_eq!(invoke(&mut Counter::default(), &d, Some(&d.scenarios()[0])), InvocationResult::Pass);
    }
}
