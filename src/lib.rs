//! Core of the experiment comparison dashboard: the experiment model and
//! store, JSON import, and the pure comparison engine (numeric column
//! discovery, plot projection, series alignment, summary statistics).
//!
//! Nothing in here depends on the UI; the `experiment-compare` binary
//! renders what these modules compute.

pub mod color;
pub mod config;
pub mod data;
pub mod error;
