//! CLI argument parsing for fisherfit

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for regression reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "fisherfit")]
#[command(version)]
#[command(about = "Simple linear regression with an F-test adequacy check", long_about = None)]
pub struct Cli {
    /// Input JSON files: {"data": [[x, y], ...], "confidence_probability": p}
    #[arg(short = 'f', long = "files", value_name = "FILE", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Analyze the built-in six-point demo dataset
    #[arg(long = "demo")]
    pub demo: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Override the confidence probability stored in each input (0 < P < 1)
    #[arg(long = "confidence", value_name = "P")]
    pub confidence: Option<f64>,

    /// Decimal places in text and CSV output
    #[arg(long = "precision", value_name = "DIGITS")]
    pub precision: Option<usize>,

    /// TOML analysis configuration file
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
