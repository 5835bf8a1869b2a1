//! Test units and their explicit method registry.
//!
//! A test unit is an ordinary Rust type that implements [`TestUnit`]. Instead of being scanned at runtime,
//! it registers its methods into a [`Registry`]: each entry pairs a name with a callable, the declared
//! parameter kinds, and an optional [`TestMarker`] holding the scenario list.
//!
//! ```
//! use marktest::engine::{Fault, Registry, TestUnit, ConstructionFault};
//! use marktest::{ParamKind, Value};
//!
//! #[derive(Default)]
//! struct Calculator;
//!
//! impl TestUnit for Calculator {
//!     const NAME: &'static str = "docs::Calculator";
//!
//!     fn construct() -> Result<Self, ConstructionFault> {
//!         Ok(Calculator)
//!     }
//!
//!     fn register(registry: &mut Registry<Self>) {
//!         registry
//!             .test("double", &[ParamKind::Int], |_, args| Ok(Value::Int(args.int(0)? * 2)))
//!             .scenario("2", "4")
//!             .scenario("-1", "-2");
//!         registry.test("panics_never", &[], |_, _| Ok(Value::Unit));
//!         registry.method("helper", &[], |_, _| Err(Fault::runtime("not a test")));
//!     }
//! }
//!
//! let registry = Registry::<Calculator>::collect();
//! assert_eq!(registry.len(), 3);
//! ```

use std::fmt;

use marktest_core::{ParamKind, Value};
use thiserror::Error;

use super::descriptor::Scenario;

/// Callable registered for a method: receives the unit and the coerced arguments.
pub type MethodFn<U> = fn(&mut U, &Args) -> Result<Value, Fault>;

/// A type whose registered methods can be discovered and executed.
pub trait TestUnit: Sized {
    /// Fully-qualified name, used to select the unit and in reporter output.
    const NAME: &'static str;

    /// Build the instance a run executes against. Called exactly once per run.
    fn construct() -> Result<Self, ConstructionFault>;

    /// Register every method of the unit, marked or not.
    fn register(registry: &mut Registry<Self>);
}

/// Marks a method as a test and carries its scenarios in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestMarker {
    pub scenarios: Vec<Scenario>,
}

/// One registered method.
pub struct MethodEntry<U> {
    pub name: &'static str,
    pub params: Vec<ParamKind>,
    pub marker: Option<TestMarker>,
    pub call: MethodFn<U>,
}

impl<U> MethodEntry<U> {
    /// Attach a test marker (with no scenarios) if the method does not carry one yet.
    pub fn marked(&mut self) -> &mut Self {
        self.marker.get_or_insert_with(TestMarker::default);
        self
    }

    /// Append a scenario to the method's marker, marking the method if needed.
    pub fn scenario(&mut self, params: &str, expected: &str) -> &mut Self {
        self.marker
            .get_or_insert_with(TestMarker::default)
            .scenarios
            .push(Scenario::new(params, expected));
        self
    }

    pub fn is_marked(&self) -> bool {
        self.marker.is_some()
    }
}

impl<U> fmt::Debug for MethodEntry<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// The method table of a unit, in registration order.
pub struct Registry<U> {
    methods: Vec<MethodEntry<U>>,
}

impl<U> Registry<U> {
    pub fn new() -> Self {
        Self { methods: Vec::new() }
    }

    /// Build the registry for a unit type by running its [`TestUnit::register`].
    pub fn collect() -> Self
    where
        U: TestUnit,
    {
        let mut registry = Self::new();
        U::register(&mut registry);
        registry
    }

    /// Register a method without a test marker. Discovery never returns it.
    pub fn method(&mut self, name: &'static str, params: &[ParamKind], call: MethodFn<U>) -> &mut MethodEntry<U> {
        self.methods.push(MethodEntry {
            name,
            params: params.to_vec(),
            marker: None,
            call,
        });
        let last = self.methods.len() - 1;
        &mut self.methods[last]
    }

    /// Register a marked test method. Chain [`MethodEntry::scenario`] to parameterize it.
    pub fn test(&mut self, name: &'static str, params: &[ParamKind], call: MethodFn<U>) -> &mut MethodEntry<U> {
        self.method(name, params, call).marked()
    }

    pub fn methods(&self) -> &[MethodEntry<U>] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<U> Default for Registry<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerced arguments handed to a method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Value, EngineFault> {
        self.values.get(index).ok_or(EngineFault::MissingArgument { index })
    }

    pub fn str(&self, index: usize) -> Result<&str, EngineFault> {
        let value = self.get(index)?;
        value.as_str().ok_or_else(|| mismatch(index, ParamKind::Str, value))
    }

    pub fn int(&self, index: usize) -> Result<i64, EngineFault> {
        let value = self.get(index)?;
        value.as_int().ok_or_else(|| mismatch(index, ParamKind::Int, value))
    }

    pub fn float(&self, index: usize) -> Result<f64, EngineFault> {
        let value = self.get(index)?;
        value.as_float().ok_or_else(|| mismatch(index, ParamKind::Float, value))
    }

    pub fn bool(&self, index: usize) -> Result<bool, EngineFault> {
        let value = self.get(index)?;
        value.as_bool().ok_or_else(|| mismatch(index, ParamKind::Bool, value))
    }
}

fn mismatch(index: usize, expected: ParamKind, found: &Value) -> EngineFault {
    EngineFault::ArgumentType {
        index,
        expected,
        found: found.type_name(),
    }
}

/// Structural problems invoking a method, as opposed to faults raised by its body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("wrong number of arguments: expected {expected}, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("method `{method}` declares no parameters but a scenario supplies one")]
    NoParameters { method: String },

    #[error("argument {index} is missing")]
    MissingArgument { index: usize },

    #[error("argument {index} has type {found}, expected {expected}")]
    ArgumentType {
        index: usize,
        expected: ParamKind,
        found: &'static str,
    },
}

/// Error returned by a registered method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// The method body signalled a failure; `kind` is its category name.
    #[error("{kind}: {message}")]
    Raised { kind: String, message: String },

    #[error(transparent)]
    Engine(#[from] EngineFault),
}

impl Fault {
    pub fn raised(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Fault::Raised {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// A `RuntimeError` with the given message.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::raised("RuntimeError", message)
    }
}

/// The unit under test could not be instantiated. Aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionFault {
    #[error("no test unit named `{0}` is registered")]
    UnknownUnit(String),

    #[error("constructor failed: {0}")]
    Constructor(String),

    #[error("constructor panicked: {0}")]
    Panicked(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Probe;

    fn noop(_: &mut Probe, _: &Args) -> Result<Value, Fault> {
        Ok(Value::Unit)
    }

    #[test]
    fn test_method_is_unmarked() {
        let mut registry = Registry::<Probe>::new();
        registry.method("helper", &[], noop);
        assert!(!registry.methods()[0].is_marked());
    }

    #[test]
    fn test_scenario_marks_and_keeps_order() {
        let mut registry = Registry::<Probe>::new();
        registry
            .method("add", &[ParamKind::Int], noop)
            .scenario("1", "2")
            .scenario("3", "4");

        let entry = &registry.methods()[0];
        assert!(entry.is_marked());
        let scenarios = &entry.marker.as_ref().unwrap().scenarios;
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].params(), "1");
        assert_eq!(scenarios[1].expected(), "4");
    }

    #[test]
    fn test_marked_is_idempotent() {
        let mut registry = Registry::<Probe>::new();
        registry.test("t", &[ParamKind::Str], noop).scenario("a", "A").marked();
        assert_eq!(registry.methods()[0].marker.as_ref().unwrap().scenarios.len(), 1);
    }

    #[test]
    fn test_args_accessors() {
        let args = Args::new(vec![Value::Int(3)]);
        assert_eq!(args.int(0).unwrap(), 3);
        assert_eq!(
            args.str(0),
            Err(EngineFault::ArgumentType {
                index: 0,
                expected: ParamKind::Str,
                found: "int",
            })
        );
        assert_eq!(args.bool(1), Err(EngineFault::MissingArgument { index: 1 }));
    }

    #[test]
    fn test_engine_fault_converts_into_fault() {
        fn needs_arg(_: &mut Probe, args: &Args) -> Result<Value, Fault> {
            Ok(Value::Int(args.int(0)?))
        }
        let err = needs_arg(&mut Probe, &Args::none()).unwrap_err();
        assert_eq!(err, Fault::Engine(EngineFault::MissingArgument { index: 0 }));
    }

    #[test]
    fn test_fault_messages() {
        assert_eq!(Fault::runtime("boom").to_string(), "RuntimeError: boom");
        assert_eq!(
            EngineFault::Arity { expected: 2, got: 1 }.to_string(),
            "wrong number of arguments: expected 2, got 1"
        );
        assert_eq!(
            ConstructionFault::UnknownUnit("x::Y".into()).to_string(),
            "no test unit named `x::Y` is registered"
        );
    }
}
