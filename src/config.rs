// Analysis configuration
//
// Controls report rendering and an optional confidence override. Loaded from
// a TOML file (`--config`) and then overridden by command-line flags.

use crate::error::{FitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest supported number of decimal places in reports
pub const MAX_PRECISION: usize = 12;

/// Configuration for a regression analysis run
///
/// # Example
/// ```
/// use fisherfit::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.precision, 4);
/// assert!(config.confidence_override.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Decimal places for every number in text and CSV reports
    ///
    /// Default: 4
    pub precision: usize,

    /// Width of the `=` separator lines in text reports
    ///
    /// Default: 60
    pub delimiter_width: usize,

    /// Confidence probability used instead of the value stored in each input
    ///
    /// Must lie strictly between 0 and 1. Default: none (use the input's value)
    pub confidence_override: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            delimiter_width: 60,
            confidence_override: None,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            FitError::InvalidConfig(msg) => {
                FitError::InvalidConfig(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded analysis config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AnalysisConfig =
            toml::from_str(contents).map_err(|e| FitError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(FitError::InvalidConfig(format!(
                "precision must be <= {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }

        if self.delimiter_width == 0 {
            return Err(FitError::InvalidConfig(
                "delimiter_width must be positive".to_string(),
            ));
        }

        if let Some(p) = self.confidence_override {
            if !(p > 0.0 && p < 1.0) {
                return Err(FitError::InvalidConfig(format!(
                    "confidence_override must be in (0, 1), got {}",
                    p
                )));
            }
        }

        Ok(())
    }
}
