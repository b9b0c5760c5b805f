//! Binning configuration.
//!
//! YAML configuration with precedence: CLI > file > defaults.
//!
//! ```yaml
//! version: 1
//! binsize: 0.3
//! strategy: bucketed
//! max_cells: 1000000
//! ```

use crate::binning::{GridBinner, Strategy, DEFAULT_MAX_CELLS};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Binning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Full width and height of each bin.
    #[serde(default = "default_binsize")]
    pub binsize: f64,

    /// Membership strategy.
    #[serde(default)]
    pub strategy: Strategy,

    /// Maximum number of grid cells.
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
}

fn default_version() -> u32 {
    1
}
fn default_binsize() -> f64 {
    0.01
}
fn default_max_cells() -> usize {
    DEFAULT_MAX_CELLS
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            binsize: default_binsize(),
            strategy: Strategy::default(),
            max_cells: default_max_cells(),
        }
    }
}

impl BinConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serialise to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse {
            line: 0,
            message: e.to_string(),
        })
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unsupported version, a
    /// non-positive bin size or a zero cell cap.
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::invalid(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if self.max_cells == 0 {
            return Err(Error::invalid("max_cells must be at least 1"));
        }
        self.to_binner().validate()
    }

    /// Validates and builds the configured binner.
    ///
    /// # Errors
    ///
    /// See [`BinConfig::validate`].
    pub fn binner(&self) -> Result<GridBinner> {
        self.validate()?;
        Ok(self.to_binner())
    }

    fn to_binner(&self) -> GridBinner {
        GridBinner::new(self.binsize)
            .strategy(self.strategy)
            .max_cells(self.max_cells)
    }
}
