//! Error types for the experiment store, JSON import and configuration.
//!
//! The comparison engine itself is total and never returns these.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::DatasetId;

/// Errors raised by the experiment store and the import path.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// JSON parsed, but not into rows.
    #[error("Invalid experiment layout: {0}")]
    InvalidLayout(String),

    #[error("No experiment with id {0}")]
    UnknownExperiment(DatasetId),

    #[error("Experiment name must not be empty")]
    EmptyName,
}

impl DataError {
    /// Get a short title for the error (for the status line)
    pub fn title(&self) -> &'static str {
        match self {
            DataError::FileIo(_) => "File Error",
            DataError::Json(_) => "JSON Error",
            DataError::UnsupportedFormat { .. } => "Unsupported Format",
            DataError::InvalidLayout(_) => "Invalid Layout",
            DataError::UnknownExperiment(_) => "Unknown Experiment",
            DataError::EmptyName => "Validation Error",
        }
    }
}

/// Errors raised while reading the dashboard configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),
}
