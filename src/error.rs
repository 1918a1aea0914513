//! Error types for regression fitting, critical-value lookup and data loading

use thiserror::Error;

use crate::regression::DenominatorDf;

/// Errors that can occur while fitting a model or testing its adequacy
#[derive(Error, Debug)]
pub enum FitError {
    #[error("Empty input: at least one sample is required")]
    EmptyInput,

    #[error("Degenerate input: no variance to fit or explain")]
    DegenerateInput,

    #[error("Insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error(
        "No critical F-value for significance level {significance_level} \
         with degrees of freedom ({numerator_df}, {denominator_df})"
    )]
    CriticalValueNotFound {
        significance_level: f64,
        numerator_df: u32,
        denominator_df: DenominatorDf,
    },

    #[error("Malformed data source: {0}")]
    MalformedSource(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fitting and lookup operations
pub type Result<T> = std::result::Result<T, FitError>;
