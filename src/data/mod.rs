//! Data layer: experiment model, store, import, and the comparison engine.
//!
//! Architecture:
//! ```text
//!   .json file / sample upload
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  JSON records or fabricated rows → ExperimentDraft
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  store    │  Vec<Dataset>, ids, revisions   ◄── filter (text search)
//!   └──────────┘
//!        │  &[&Dataset]
//!        ▼
//!   ┌──────────┐
//!   │  schema   │  numeric columns from the first row
//!   └──────────┘
//!        │
//!        ├──────────────┬───────────────┐
//!        ▼              ▼               ▼
//!   projection        align           stats
//!   (x, y) points     per-index       count/min/max/
//!                     slots           mean/std dev
//!        └──────────────┴───────────────┘
//!                       │
//!                       ▼
//!                 cache (memo by id + revision)
//! ```

pub mod align;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod projection;
pub mod schema;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) fn test_row(pairs: &[(&str, model::CellValue)]) -> model::Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
