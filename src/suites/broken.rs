//! A unit that can never be instantiated, for exercising the run-abort path.

use marktest_core::Value;

use crate::engine::{ConstructionFault, Registry, TestUnit};

#[derive(Debug)]
pub struct UnconstructibleSuite;

impl TestUnit for UnconstructibleSuite {
    const NAME: &'static str = "marktest::suites::UnconstructibleSuite";

    fn construct() -> Result<Self, ConstructionFault> {
        Err(ConstructionFault::Constructor(
            "required resource is unavailable".to_string(),
        ))
    }

    fn register(registry: &mut Registry<Self>) {
        registry.test("neverRuns", &[], |_, _| Ok(Value::Unit));
    }
}
