//! Memoized comparison results.
//!
//! Comparison keys carry each dataset's `(id, revision, name)`, so replacing
//! an experiment's rows or renaming it makes every entry that used the old
//! state unreachable.

use std::collections::HashMap;
use std::hash::Hash;

use super::align::{align_series_with, AlignedSeries, CollisionPolicy};
use super::model::{Dataset, DatasetId};
use super::projection::{project_plot, PlotPoint};
use super::stats::{summarize, SummaryStatistics};

/// Aligned series and summary statistics for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub aligned: AlignedSeries,
    pub summaries: Vec<SummaryStatistics>,
}

/// Cache key: (datasets with revisions and names, metric)
type ComparisonKey = (Vec<(DatasetId, u64, String)>, String);

/// Cache key: (dataset, revision, x column, y column)
type ProjectionKey = (DatasetId, u64, String, String);

pub struct ComparisonCache {
    comparisons: HashMap<ComparisonKey, Comparison>,
    projections: HashMap<ProjectionKey, Vec<PlotPoint>>,
    policy: CollisionPolicy,
    max_entries: usize,
}

impl ComparisonCache {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            comparisons: HashMap::new(),
            projections: HashMap::new(),
            policy,
            max_entries: 64,
        }
    }

    /// Get the cached comparison of `metric` across `datasets` or compute it
    pub fn comparison(&mut self, datasets: &[&Dataset], metric: &str) -> &Comparison {
        let key = (
            datasets
                .iter()
                .map(|ds| (ds.id, ds.revision(), ds.name.clone()))
                .collect(),
            metric.to_string(),
        );
        let policy = self.policy;
        get_or_compute(&mut self.comparisons, key, self.max_entries, || Comparison {
            aligned: align_series_with(datasets, metric, policy),
            summaries: summarize(datasets, metric),
        })
    }

    /// Get the cached projection of `dataset` onto `x` / `y` or compute it
    pub fn projection(&mut self, dataset: &Dataset, x: &str, y: &str) -> &[PlotPoint] {
        let key = (dataset.id, dataset.revision(), x.to_string(), y.to_string());
        get_or_compute(&mut self.projections, key, self.max_entries, || {
            project_plot(dataset, x, y)
        })
        .as_slice()
    }

    /// Clear all cached data
    pub fn invalidate(&mut self) {
        self.comparisons.clear();
        self.projections.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize) {
        (self.comparisons.len() + self.projections.len(), self.max_entries * 2)
    }
}

impl Default for ComparisonCache {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}

fn get_or_compute<K, V, F>(map: &mut HashMap<K, V>, key: K, max_entries: usize, compute: F) -> &V
where
    K: Hash + Eq + Clone,
    F: FnOnce() -> V,
{
    if !map.contains_key(&key) && map.len() >= max_entries {
        // Simple strategy: clear half the cache
        let to_remove: Vec<K> = map.keys().take(map.len() / 2).cloned().collect();
        for k in to_remove {
            map.remove(&k);
        }
    }
    map.entry(key).or_insert_with(compute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_row as row;

    fn dataset(id: u64, values: &[f64]) -> Dataset {
        Dataset::new(
            DatasetId(id),
            format!("run {id}"),
            values.iter().map(|v| row(&[("v", (*v).into())])).collect(),
        )
    }

    #[test]
    fn matches_direct_computation() {
        let a = dataset(1, &[1.0, 2.0, 3.0]);
        let b = dataset(2, &[5.0]);
        let mut cache = ComparisonCache::default();

        let cached = cache.comparison(&[&a, &b], "v").clone();
        assert_eq!(cached.aligned, align_series_with(&[&a, &b], "v", CollisionPolicy::LastWriteWins));
        assert_eq!(cached.summaries, summarize(&[&a, &b], "v"));
        assert_eq!(cache.projection(&a, "v", "v"), project_plot(&a, "v", "v").as_slice());
    }

    #[test]
    fn reuses_entry_for_same_revision() {
        let a = dataset(1, &[1.0, 2.0]);
        let mut cache = ComparisonCache::default();
        cache.comparison(&[&a], "v");
        cache.comparison(&[&a], "v");
        assert_eq!(cache.stats().0, 1);
    }

    #[test]
    fn replaced_rows_are_recomputed() {
        let mut a = dataset(1, &[1.0, 2.0]);
        let mut cache = ComparisonCache::default();
        assert_eq!(cache.comparison(&[&a], "v").aligned.len(), 2);

        a.replace_rows(vec![row(&[("v", 9.0.into())])]);
        let fresh = cache.comparison(&[&a], "v");
        assert_eq!(fresh.aligned.len(), 1);
        assert_eq!(fresh.summaries[0].stats.mean, Some(9.0));
    }

    #[test]
    fn renamed_datasets_are_recomputed() {
        let mut a = dataset(1, &[1.0, 2.0]);
        let mut cache = ComparisonCache::default();
        assert_eq!(cache.comparison(&[&a], "v").aligned.series[0].label, "run 1");

        a.name = "renamed".to_string();
        let fresh = cache.comparison(&[&a], "v");
        assert_eq!(fresh.aligned.series[0].key, "renamed");
        assert_eq!(fresh.aligned.series[0].label, "renamed");
        assert_eq!(fresh.summaries[0].name, "renamed");
    }

    #[test]
    fn renaming_into_a_collision_merges_series() {
        let a = dataset(1, &[1.0, 2.0]);
        let mut b = dataset(2, &[5.0]);
        let mut cache = ComparisonCache::default();
        assert_eq!(cache.comparison(&[&a, &b], "v").aligned.series.len(), 2);

        b.name = a.name.clone();
        let merged = cache.comparison(&[&a, &b], "v");
        assert_eq!(merged.aligned.series.len(), 1);
        assert_eq!(merged.aligned.series[0].dataset, DatasetId(2));
    }

    #[test]
    fn selection_order_is_part_of_the_key() {
        let a = dataset(1, &[1.0]);
        let b = dataset(2, &[2.0]);
        let mut cache = ComparisonCache::default();
        let first = cache.comparison(&[&a, &b], "v").summaries[0].dataset;
        let second = cache.comparison(&[&b, &a], "v").summaries[0].dataset;
        assert_eq!(first, DatasetId(1));
        assert_eq!(second, DatasetId(2));
    }

    #[test]
    fn evicts_when_full() {
        let a = dataset(1, &[1.0]);
        let mut cache = ComparisonCache::default();
        for i in 0..200 {
            cache.comparison(&[&a], &format!("m{i}"));
        }
        assert!(cache.stats().0 <= 64);
        cache.invalidate();
        assert_eq!(cache.stats().0, 0);
    }
}
