//! The sample suite exercised when `marktest` runs without arguments.
//!
//! Covers every classification path: a plain passing test, a parameterized test with one mismatching
//! scenario, a string-parameter test, a test whose body raises, and an unmarked helper that must never run.

use marktest_core::{ParamKind, Value};

use crate::engine::{ConstructionFault, Fault, Registry, TestUnit};

#[derive(Debug, Default)]
pub struct SampleSuite;

impl SampleSuite {
    pub fn add_one(&self, number: i64) -> i64 {
        number + 1
    }

    pub fn to_upper_case(&self, input: &str) -> String {
        input.to_uppercase()
    }
}

impl TestUnit for SampleSuite {
    const NAME: &'static str = "marktest::suites::SampleSuite";

    fn construct() -> Result<Self, ConstructionFault> {
        Ok(SampleSuite)
    }

    fn register(registry: &mut Registry<Self>) {
        registry.test("simpleTest", &[], |_, _| {
            tracing::info!("executing simple logic");
            Ok(Value::Unit)
        });

        registry
            .test("addOne", &[ParamKind::Int], |suite, args| Ok(Value::Int(suite.add_one(args.int(0)?))))
            .scenario("1", "2")
            .scenario("5", "6")
            .scenario("10", "99");

        registry
            .test("toUpperCase", &[ParamKind::Str], |suite, args| {
                Ok(Value::Str(suite.to_upper_case(args.str(0)?)))
            })
            .scenario("java", "JAVA")
            .scenario("test", "TEST");

        registry.test("crashTest", &[], |_, _| {
            Err(Fault::runtime("Something went wrong inside the test!"))
        });

        registry.method("notATest", &[], |_, _| {
            tracing::error!("notATest is not marked and should never run");
            Ok(Value::Unit)
        });
    }
}
