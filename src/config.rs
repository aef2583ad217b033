//! Dashboard configuration.
//!
//! Read once at startup from the JSON file named by `EXPDASH_CONFIG`, or from
//! `expdash.json` in the working directory. Every field has a default, so a
//! partial file is fine and a missing file means "all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::SeriesPalette;
use crate::data::align::CollisionPolicy;
use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "EXPDASH_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "expdash.json";

/// Rows kept per imported experiment.
pub const DEFAULT_MAX_ROWS: usize = 100_000;

/// Decimals shown in the statistics table.
pub const DEFAULT_PRECISION: usize = 3;

/// Rows fabricated for a sample upload.
pub const DEFAULT_SAMPLE_ROWS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Series colours as `#rrggbb`; empty means the built-in palette.
    pub palette: Vec<String>,
    /// Generate this many evenly spaced hues instead of using `palette`.
    pub hue_palette_size: Option<usize>,
    pub max_rows: usize,
    pub precision: usize,
    pub sample_rows: usize,
    pub collision_policy: CollisionPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            palette: Vec::new(),
            hue_palette_size: None,
            max_rows: DEFAULT_MAX_ROWS,
            precision: DEFAULT_PRECISION,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            collision_policy: CollisionPolicy::KeyById,
        }
    }
}

impl DashboardConfig {
    /// Read a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve and read the startup config, falling back to defaults.
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = explicit.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if explicit.is_none() && !path.exists() {
            log::debug!("No {CONFIG_FILE} found, using default configuration");
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// The series palette this config describes.
    pub fn series_palette(&self) -> Result<SeriesPalette, ConfigError> {
        match self.hue_palette_size {
            Some(n) => Ok(SeriesPalette::hue_wheel(n)),
            None => SeriesPalette::from_hex(&self.palette),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(r#"{ "precision": 5, "collision_policy": "last_write_wins" }"#);
        let config = DashboardConfig::from_path(file.path()).unwrap();
        assert_eq!(config.precision, 5);
        assert_eq!(config.collision_policy, CollisionPolicy::LastWriteWins);
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(config.sample_rows, DEFAULT_SAMPLE_ROWS);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("{ precision: }");
        assert!(matches!(
            DashboardConfig::from_path(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn palette_selection() {
        let mut config = DashboardConfig::default();
        assert_eq!(config.series_palette().unwrap(), SeriesPalette::default());

        config.palette = vec!["#000000".to_string()];
        assert_eq!(config.series_palette().unwrap().len(), 1);

        config.hue_palette_size = Some(8);
        assert_eq!(config.series_palette().unwrap().len(), 8);

        config.hue_palette_size = None;
        config.palette = vec!["purple-ish".to_string()];
        assert!(config.series_palette().is_err());
    }
}
