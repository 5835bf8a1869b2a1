//! Test discovery over a unit's registry.
//!
//! Only methods carrying a [`TestMarker`](super::unit::TestMarker) are candidates; there is no naming
//! convention. Candidates are ordered by name (plain byte-wise `str` ordering) so output is deterministic
//! and diffable. The sort is stable: methods registered twice under the same name keep registration order.

use super::descriptor::TestDescriptor;
use super::unit::Registry;

/// Return the marked methods of `registry` as descriptors, sorted by name.
#[tracing::instrument(skip_all, fields(method_count = registry.len()))]
pub fn discover<U>(registry: &Registry<U>) -> Vec<TestDescriptor<U>> {
    let mut descriptors: Vec<TestDescriptor<U>> = registry
        .methods()
        .iter()
        .filter_map(TestDescriptor::from_entry)
        .collect();
    descriptors.sort_by(|a, b| a.name().cmp(b.name()));

    tracing::debug!(test_count = descriptors.len(), "discovered test methods");
    descriptors
}

/// Keep only descriptors whose name contains `keyword`, preserving order.
pub fn filter_by_keyword<U>(descriptors: Vec<TestDescriptor<U>>, keyword: &str) -> Vec<TestDescriptor<U>> {
    descriptors.into_iter().filter(|d| d.name().contains(keyword)).collect()
}
