//! Run driver: construction, discovery and execution over one unit, folded into a single [`RunTally`].

use marktest_core::RunTally;

use super::discovery::{discover, filter_by_keyword};
use super::executor::{call_capturing_panics, execute_descriptor, panic_message};
use super::reporter::RunReporter;
use super::unit::{ConstructionFault, Registry, TestUnit};

/// Options for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Only execute tests whose name contains this keyword
    pub filter: Option<String>,
    /// Emit ANSI color codes in console output
    pub color: bool,
    /// Show per-invocation timings
    pub verbose: bool,
    /// Column width the invocation label is padded to
    pub name_width: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filter: None,
            color: true,
            verbose: false,
            name_width: 30,
        }
    }
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the test name filter
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        self.filter = Some(keyword.into());
        self
    }

    /// Enable or disable color output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable per-invocation timings
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the label column width
    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }
}

/// Run every discovered test of unit `U`.
///
/// ## Returns
/// - `Ok(tally)` once every descriptor has been executed. Per-invocation faults never abort the run.
/// - `Err(ConstructionFault)` if the unit could not be built; nothing was discovered or executed and no summary
///   was reported.
#[tracing::instrument(skip_all, fields(unit = U::NAME))]
pub fn run_unit<U: TestUnit>(
    config: &RunConfig,
    reporter: &mut dyn RunReporter,
) -> Result<RunTally, ConstructionFault> {
    reporter.on_run_start(U::NAME);

    let mut unit = match construct::<U>() {
        Ok(unit) => unit,
        Err(fault) => {
            tracing::warn!(%fault, "could not instantiate test unit");
            reporter.on_construction_failed(U::NAME, &fault);
            return Err(fault);
        }
    };

    let registry = Registry::<U>::collect();
    let mut descriptors = discover(&registry);
    if let Some(keyword) = &config.filter {
        descriptors = filter_by_keyword(descriptors, keyword);
    }
    reporter.on_discovery_complete(descriptors.len());

    let mut tally = RunTally::new();
    for descriptor in &descriptors {
        execute_descriptor(&mut unit, descriptor, &mut tally, reporter);
    }

    tracing::info!(
        total = tally.total(),
        passed = tally.passed(),
        failed = tally.failed(),
        errors = tally.errors(),
        "run complete"
    );
    reporter.on_run_complete(&tally);
    Ok(tally)
}

/// Build the unit, converting a constructor panic into a [`ConstructionFault`].
fn construct<U: TestUnit>() -> Result<U, ConstructionFault> {
    call_capturing_panics(U::construct)
        .unwrap_or_else(|payload| Err(ConstructionFault::Panicked(panic_message(payload.as_ref()))))
}
