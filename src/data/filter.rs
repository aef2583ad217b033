use super::model::{Dataset, DatasetId};
use super::store::ExperimentStore;

// ---------------------------------------------------------------------------
// Text search over experiment metadata
// ---------------------------------------------------------------------------

/// Whether `dataset` matches a lower-cased, trimmed query.
fn matches(dataset: &Dataset, needle: &str) -> bool {
    dataset.name.to_lowercase().contains(needle)
        || dataset.description.to_lowercase().contains(needle)
        || dataset
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Return ids of experiments whose name, description or tags contain `query`.
///
/// Matching is case-insensitive. A blank query matches every experiment.
pub fn matching_ids(store: &ExperimentStore, query: &str) -> Vec<DatasetId> {
    let needle = query.trim().to_lowercase();
    store
        .iter()
        .filter(|ds| needle.is_empty() || matches(ds, &needle))
        .map(|ds| ds.id)
        .collect()
}
