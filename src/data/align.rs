use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{cell, CellValue, Dataset, DatasetId};
use super::schema::contributing;

// ---------------------------------------------------------------------------
// Series keys
// ---------------------------------------------------------------------------

/// How aligned slots are keyed when several datasets share a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Key by display name. A later dataset with the same name overwrites
    /// the earlier one's slot in every row.
    #[default]
    LastWriteWins,
    /// Key by dataset id and keep the name only as a label.
    KeyById,
}

impl CollisionPolicy {
    fn key_for(self, dataset: &Dataset) -> String {
        match self {
            CollisionPolicy::LastWriteWins => dataset.name.clone(),
            CollisionPolicy::KeyById => dataset.id.to_string(),
        }
    }
}

/// One rendered series of an [`AlignedSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesColumn {
    /// Key of this series' slot in every [`AlignedRow`].
    pub key: String,
    /// Display label (the dataset name).
    pub label: String,
    /// Dataset that last wrote this key.
    pub dataset: DatasetId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    pub index: usize,
    pub slots: BTreeMap<String, CellValue>,
}

/// Values of one metric from several datasets, laid out by row index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeries {
    pub metric: String,
    pub series: Vec<SeriesColumn>,
    pub rows: Vec<AlignedRow>,
}

impl AlignedSeries {
    fn empty(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            series: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Number of aligned rows (the longest contributing dataset).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Slot value of series `key` at row `index`.
    pub fn value(&self, index: usize, key: &str) -> Option<&CellValue> {
        self.rows.get(index)?.slots.get(key)
    }

    /// `[index, value]` pairs of series `key`, skipping non-numeric slots.
    pub fn points_for(&self, key: &str) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .filter_map(|row| {
                let v = row.slots.get(key)?.as_number()?;
                Some([row.index as f64, v])
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Align `metric` across `datasets`, keying slots by dataset name.
pub fn align_series(datasets: &[&Dataset], metric: &str) -> AlignedSeries {
    align_series_with(datasets, metric, CollisionPolicy::LastWriteWins)
}

/// Align `metric` across `datasets` by positional row index.
///
/// Only datasets whose first row holds a number at `metric` take part. The
/// result has one row per index up to the longest of them; a dataset shorter
/// than that leaves its trailing slots [`CellValue::Absent`].
pub fn align_series_with(
    datasets: &[&Dataset],
    metric: &str,
    policy: CollisionPolicy,
) -> AlignedSeries {
    let members = contributing(datasets, metric);
    if members.is_empty() {
        return AlignedSeries::empty(metric);
    }

    let keys: Vec<String> = members.iter().map(|ds| policy.key_for(ds)).collect();

    let mut series: Vec<SeriesColumn> = Vec::with_capacity(members.len());
    for (ds, key) in members.iter().zip(&keys) {
        match series.iter_mut().find(|s| s.key == *key) {
            Some(existing) => {
                log::debug!("series key '{key}' shared by {} and {}", existing.dataset, ds.id);
                existing.label = ds.name.clone();
                existing.dataset = ds.id;
            }
            None => series.push(SeriesColumn {
                key: key.clone(),
                label: ds.name.clone(),
                dataset: ds.id,
            }),
        }
    }

    let max_len = members.iter().map(|ds| ds.len()).max().unwrap_or(0);
    let rows = (0..max_len)
        .map(|index| {
            let mut slots = BTreeMap::new();
            for (ds, key) in members.iter().zip(&keys) {
                let value = ds
                    .rows()
                    .get(index)
                    .map(|row| cell(row, metric).clone())
                    .unwrap_or(CellValue::Absent);
                slots.insert(key.clone(), value);
            }
            AlignedRow { index, slots }
        })
        .collect();

    AlignedSeries {
        metric: metric.to_string(),
        series,
        rows,
    }
}
