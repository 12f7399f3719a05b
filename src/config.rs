//! Frame display and comparison settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for frame display and default tolerances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Maximum number of rows printed by `Display`
    pub display_max_rows: usize,
    /// Decimals printed for float cells
    pub float_precision: usize,
    /// Default tolerance of `assert_almost_equal`
    pub almost_equal_precision: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            display_max_rows: 10,
            float_precision: 3,
            almost_equal_precision: 1e-5,
        }
    }
}

impl FrameConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of displayed rows
    pub fn with_display_max_rows(mut self, rows: usize) -> Self {
        self.display_max_rows = rows;
        self
    }

    /// Set the number of decimals for float cells
    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    /// Set the default comparison tolerance
    pub fn with_almost_equal_precision(mut self, precision: f64) -> Self {
        self.almost_equal_precision = precision;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()
    }

    /// Loads a `.toml`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&source),
            _ => Err(Error::Config(format!(
                "unrecognized configuration format: {}",
                path.display()
            ))),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    fn validate(self) -> Result<Self> {
        let precision = self.almost_equal_precision;
        if precision.is_nan() || precision < 0.0 {
            return Err(Error::Config(format!(
                "almost_equal_precision must be non-negative, got {}",
                self.almost_equal_precision
            )));
        }
        Ok(self)
    }
}
