//! Scenarios, test descriptors and the invocations they expand into.

use std::fmt;

use marktest_core::ParamKind;

use super::unit::{MethodEntry, MethodFn};

/// One literal `(params, expected)` pair driving a single invocation.
///
/// Both sides stay string literals; the parameter is coerced when the invocation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    params: String,
    expected: String,
}

impl Scenario {
    pub fn new(params: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            params: params.into(),
            expected: expected.into(),
        }
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }
}

/// A discovered test method with its scenario list.
///
/// An empty scenario list means a single argument-less invocation whose return value is never inspected.
/// `N` scenarios mean exactly `N` invocations of the same method.
pub struct TestDescriptor<U> {
    name: &'static str,
    params: Vec<ParamKind>,
    scenarios: Vec<Scenario>,
    call: MethodFn<U>,
}

impl<U> TestDescriptor<U> {
    /// Build a descriptor from a registered method, or `None` if the method is not marked.
    pub fn from_entry(entry: &MethodEntry<U>) -> Option<Self> {
        let marker = entry.marker.as_ref()?;
        Some(Self {
            name: entry.name,
            params: entry.params.clone(),
            scenarios: marker.scenarios.clone(),
            call: entry.call,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameter kinds. Only the first one is consulted for coercion.
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn call(&self) -> MethodFn<U> {
        self.call
    }

    pub fn is_parameterized(&self) -> bool {
        !self.scenarios.is_empty()
    }

    /// Number of invocations this descriptor expands into.
    pub fn invocation_count(&self) -> usize {
        self.scenarios.len().max(1)
    }

    /// The invocations of this descriptor, in scenario declaration order.
    pub fn invocations(&self) -> Vec<Invocation<'_>> {
        if self.scenarios.is_empty() {
            return vec![Invocation {
                name: self.name,
                scenario: None,
            }];
        }
        self.scenarios
            .iter()
            .map(|scenario| Invocation {
                name: self.name,
                scenario: Some(scenario),
            })
            .collect()
    }
}

impl<U> fmt::Debug for TestDescriptor<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("scenarios", &self.scenarios)
            .finish_non_exhaustive()
    }
}

/// A single planned call of a test method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub scenario: Option<&'a Scenario>,
}

impl Invocation<'_> {
    /// The parameter literal, if this invocation comes from a scenario.
    pub fn param(&self) -> Option<&str> {
        self.scenario.map(Scenario::params)
    }

    pub fn expected(&self) -> Option<&str> {
        self.scenario.map(Scenario::expected)
    }

    /// Display label: `name(param)` or `name()`.
    pub fn label(&self) -> String {
        format!("{}({})", self.name, self.param().unwrap_or(""))
    }
}
