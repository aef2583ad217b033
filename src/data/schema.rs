use super::model::{cell, Dataset};

// ---------------------------------------------------------------------------
// Numeric column discovery
// ---------------------------------------------------------------------------

/// Column names whose value in the **first row** is a number.
///
/// Later rows are never consulted: a column numeric in row 0 stays numeric
/// even if later rows hold text or nothing there, and a column that is not
/// numeric in row 0 is never offered.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    let Some(first) = dataset.first_row() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|(_, value)| value.is_number())
        .map(|(name, _)| name.clone())
        .collect()
}

/// Whether `dataset` contributes a series for `metric`.
pub fn is_contributing(dataset: &Dataset, metric: &str) -> bool {
    dataset
        .first_row()
        .is_some_and(|row| cell(row, metric).is_number())
}

/// The datasets that contribute a series for `metric`, in input order.
pub fn contributing<'a>(datasets: &[&'a Dataset], metric: &str) -> Vec<&'a Dataset> {
    datasets
        .iter()
        .copied()
        .filter(|ds| is_contributing(ds, metric))
        .collect()
}

/// Union of the numeric columns of every dataset, in first-appearance order.
/// Used to build the metric selector when several experiments are compared.
pub fn shared_numeric_columns(datasets: &[&Dataset]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for ds in datasets {
        for col in numeric_columns(ds) {
            if !out.contains(&col) {
                out.push(col);
            }
        }
    }
    out
}
