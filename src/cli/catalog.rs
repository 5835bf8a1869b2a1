//! Name-addressable table of test units.
//!
//! The CLI selects a unit by its fully-qualified name. Each entry stores a monomorphized [`run_unit`] so the
//! table can hold units of different types.

use marktest_core::RunTally;

use crate::engine::{ConstructionFault, RunConfig, RunReporter, TestUnit, run_unit};
use crate::suites::{SampleSuite, UnconstructibleSuite};

/// Unit run when no name is given on the command line.
pub const DEFAULT_UNIT: &str = SampleSuite::NAME;

type RunFn = fn(&RunConfig, &mut dyn RunReporter) -> Result<RunTally, ConstructionFault>;

/// One runnable unit.
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    run: RunFn,
}

impl CatalogEntry {
    pub fn of<U: TestUnit>() -> Self {
        Self {
            name: U::NAME,
            run: run_unit::<U>,
        }
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Units known to the CLI, in registration order.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of units shipped with the crate.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register::<SampleSuite>();
        catalog.register::<UnconstructibleSuite>();
        catalog
    }

    /// Add a unit. A later registration under the same name shadows the earlier one.
    pub fn register<U: TestUnit>(&mut self) -> &mut Self {
        self.entries.push(CatalogEntry::of::<U>());
        self
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().rev().find(|entry| entry.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Run the unit registered under `name`.
    ///
    /// An unknown name is reported exactly like a unit whose constructor failed.
    pub fn run(
        &self,
        name: &str,
        config: &RunConfig,
        reporter: &mut dyn RunReporter,
    ) -> Result<RunTally, ConstructionFault> {
        match self.get(name) {
            Some(entry) => (entry.run)(config, reporter),
            None => {
                let fault = ConstructionFault::UnknownUnit(name.to_string());
                tracing::warn!(%fault, "unknown test unit");
                reporter.on_run_start(name);
                reporter.on_construction_failed(name, &fault);
                Err(fault)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::{RecordedEvent, RecordingReporter};

    #[test]
    fn test_builtin_contains_default_unit() {
        let catalog = Catalog::builtin();
        assert!(catalog.get(DEFAULT_UNIT).is_some());
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec![
                "marktest::suites::SampleSuite",
                "marktest::suites::UnconstructibleSuite"
            ]
        );
    }

    #[test]
    fn test_unknown_unit_is_construction_fault() {
        let catalog = Catalog::builtin();
        let mut reporter = RecordingReporter::new();
        let err = catalog
            .run("no::such::Unit", &RunConfig::default(), &mut reporter)
            .unwrap_err();

        assert_eq!(err, ConstructionFault::UnknownUnit("no::such::Unit".into()));
        assert_eq!(
            reporter.events,
            vec![
                RecordedEvent::RunStarted("no::such::Unit".into()),
                RecordedEvent::ConstructionFailed("no::such::Unit".into(), err.clone()),
            ]
        );
    }

    #[test]
    fn test_run_dispatches_to_unit() {
        let catalog = Catalog::builtin();
        let mut reporter = RecordingReporter::new();
        let tally = catalog.run(DEFAULT_UNIT, &RunConfig::default(), &mut reporter).unwrap();
        assert_eq!(tally.total(), 7);
    }
}
