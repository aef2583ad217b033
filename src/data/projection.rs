use serde::Serialize;

use super::model::{cell, CellValue, Dataset, Row};

/// One row of a dataset projected onto an (x, y) column pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    /// Zero-based row index in the source dataset.
    pub index: usize,
    pub x: CellValue,
    pub y: CellValue,
    /// Remaining fields of the source row, for detail display.
    pub fields: Row,
}

impl PlotPoint {
    /// Plot coordinates, when both axes hold numbers in this row.
    pub fn coordinates(&self) -> Option<[f64; 2]> {
        Some([self.x.as_number()?, self.y.as_number()?])
    }
}

/// Project every row of `dataset` onto the `x` / `y` columns.
///
/// Rows keep their original order, even when `x` is not monotonic. An empty
/// column name means "nothing selected yet" and yields no points, as does a
/// column the first row does not hold.
pub fn project_plot(dataset: &Dataset, x: &str, y: &str) -> Vec<PlotPoint> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }
    let Some(first) = dataset.first_row() else {
        return Vec::new();
    };
    if cell(first, x).is_absent() || cell(first, y).is_absent() {
        return Vec::new();
    }
    dataset
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| PlotPoint {
            index,
            x: cell(row, x).clone(),
            y: cell(row, y).clone(),
            fields: row
                .iter()
                .filter(|(name, _)| name.as_str() != x && name.as_str() != y)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        })
        .collect()
}
