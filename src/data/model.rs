use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CellValue – a single cell of an experiment table
// ---------------------------------------------------------------------------

/// A tagged cell value. Numbers are the only values the comparison engine
/// aggregates; text is carried through for display, `Absent` stands in for
/// a missing key or an explicit null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Absent,
}

static ABSENT: CellValue = CellValue::Absent;

impl CellValue {
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// The numeric payload, if this cell holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Absent => write!(f, "<absent>"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Row – one measurement record
// ---------------------------------------------------------------------------

/// Column name → value, in the order the columns were read. Rows of one
/// dataset usually, but not necessarily, share the same keys.
pub type Row = IndexMap<String, CellValue>;

/// Read `column` from `row`, treating a missing key as [`CellValue::Absent`].
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a CellValue {
    row.get(column).unwrap_or(&ABSENT)
}

// ---------------------------------------------------------------------------
// Dataset – one experiment
// ---------------------------------------------------------------------------

/// Opaque, stable identity of a dataset inside the experiment store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetId(pub u64);

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exp-{}", self.0)
    }
}

/// A named experiment and its measurement rows.
///
/// The row sequence is only ever replaced as a whole; every replacement
/// bumps `revision`, so `(id, revision)` identifies one exact row sequence.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    revision: u64,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(id: DatasetId, name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            revision: 0,
            rows,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Swap in a new row sequence.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.revision += 1;
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
