use serde::Serialize;

use super::model::{cell, Dataset, DatasetId};
use super::schema::contributing;

/// Descriptive statistics over a set of numeric values.
///
/// The float fields are `None` when `count` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stats {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Population standard deviation (divides by `count`).
    pub std_dev: Option<f64>,
}

/// Summary of one metric for one contributing dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub dataset: DatasetId,
    pub name: String,
    pub metric: String,
    #[serde(flatten)]
    pub stats: Stats,
}

/// Calculate count, min, max, mean and population std dev of `values`.
pub fn calculate_stats(values: &[f64]) -> Stats {
    let count = values.len();
    if count == 0 {
        return Stats::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Stats {
        count,
        min: Some(min),
        max: Some(max),
        mean: Some(mean),
        std_dev: Some(variance.sqrt()),
    }
}

/// Summarize `metric` for every dataset whose first row holds a number there.
///
/// Only cells that are numbers are aggregated; text and absent cells in the
/// column are skipped rather than coerced.
pub fn summarize(datasets: &[&Dataset], metric: &str) -> Vec<SummaryStatistics> {
    contributing(datasets, metric)
        .into_iter()
        .map(|ds| {
            let values: Vec<f64> = ds
                .rows()
                .iter()
                .filter_map(|row| cell(row, metric).as_number())
                .collect();
            SummaryStatistics {
                dataset: ds.id,
                name: ds.name.clone(),
                metric: metric.to_string(),
                stats: calculate_stats(&values),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};
    use crate::data::test_row as row;

    fn x() -> Dataset {
        Dataset::new(
            DatasetId(1),
            "X",
            vec![
                row(&[("t", 0.0.into()), ("v", 1.0.into())]),
                row(&[("t", 1.0.into()), ("v", 2.0.into())]),
                row(&[("t", 2.0.into()), ("v", 3.0.into())]),
            ],
        )
    }

    #[test]
    fn summarizes_one_dataset() {
        let x = x();
        let summary = summarize(&[&x], "v");
        assert_eq!(summary.len(), 1);

        let s = summary[0].stats;
        assert_eq!(s.count, 3);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.max, Some(3.0));
        assert_eq!(s.mean, Some(2.0));
        let expected = (2.0f64 / 3.0).sqrt();
        assert!((s.std_dev.unwrap() - expected).abs() < 1e-12);
        assert!((s.std_dev.unwrap() - 0.8165).abs() < 1e-4);
    }

    #[test]
    fn skips_text_and_absent_cells() {
        let ds = Dataset::new(
            DatasetId(4),
            "mixed",
            vec![
                row(&[("v", 4.0.into())]),
                row(&[("v", "oops".into())]),
                row(&[("v", CellValue::Absent)]),
                Row::new(),
                row(&[("v", 8.0.into())]),
            ],
        );
        let summary = summarize(&[&ds], "v");
        assert_eq!(summary[0].stats.count, 2);
        assert_eq!(summary[0].stats.mean, Some(6.0));
        assert_eq!(summary[0].stats.std_dev, Some(2.0));
    }

    #[test]
    fn only_contributing_datasets_are_summarized() {
        let x = x();
        let z = Dataset::new(
            DatasetId(9),
            "Z",
            vec![row(&[("t", "zero".into()), ("label", "a".into())])],
        );
        assert!(summarize(&[&z], "t").is_empty());
        let summary = summarize(&[&z, &x], "t");
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].dataset, DatasetId(1));
        assert!(summarize(&[], "v").is_empty());
    }

    #[test]
    fn zero_count_leaves_fields_undefined() {
        // Numeric in row 0 is required to contribute, so an empty value set
        // can only come from direct use of the calculator.
        let s = calculate_stats(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.std_dev, None);
        assert_eq!(s.min, None);
    }

    #[test]
    fn repeated_summaries_are_identical() {
        let x = x();
        assert_eq!(summarize(&[&x], "v"), summarize(&[&x], "v"));
    }

    #[test]
    fn serializes_flat() {
        let x = x();
        let json = serde_json::to_value(&summarize(&[&x], "v")[0]).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["name"], "X");
        assert_eq!(json["mean"], 2.0);
    }
}
