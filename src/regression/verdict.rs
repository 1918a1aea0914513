// Model adequacy verdict from the F-test
//
// Composes the engine and the critical-value table:
// - significance level = 1 - confidence probability
// - degrees of freedom = (1, n - 2)
// - adequate when F >= F_critical, inadequate when F < F_critical

use crate::error::{FitError, Result};
use crate::regression::critical_value::CriticalValueTable;
use crate::regression::engine::{DegreesOfFreedom, RegressionEngine};
use serde::{Deserialize, Serialize};

/// Outcome of comparing the model's F-statistic with the critical value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdequacyVerdict {
    /// F >= F_critical: the linear model explains a significant share of variance
    Adequate,
    /// F < F_critical
    Inadequate,
}

impl AdequacyVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdequacyVerdict::Adequate => "adequate",
            AdequacyVerdict::Inadequate => "inadequate",
        }
    }
}

/// Detailed F-test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdequacyAssessment {
    pub verdict: AdequacyVerdict,
    pub f_statistic: f64,
    pub critical_value: f64,
    pub confidence_probability: f64,
    pub significance_level: f64,
    pub degrees_of_freedom: DegreesOfFreedom,
}

impl AdequacyAssessment {
    /// `"38.5333 >= 7.7100"` style comparison line
    pub fn comparison_string(&self, precision: usize) -> String {
        let op = match self.verdict {
            AdequacyVerdict::Adequate => ">=",
            AdequacyVerdict::Inadequate => "<",
        };
        format!(
            "{:.prec$} {} {:.prec$}",
            self.f_statistic,
            op,
            self.critical_value,
            prec = precision
        )
    }

    /// Generate human-readable report
    pub fn to_report_string(&self, precision: usize) -> String {
        let mut report = String::new();

        match self.verdict {
            AdequacyVerdict::Adequate => report.push_str("Model is adequate\n"),
            AdequacyVerdict::Inadequate => report.push_str("Model is inadequate\n"),
        }
        report.push_str(&format!("{}\n", self.comparison_string(precision)));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n",
            format_level(self.significance_level),
            format_level(self.confidence_probability * 100.0)
        ));
        report.push_str(&format!(
            "Degrees of freedom: ({}, {})\n",
            self.degrees_of_freedom.numerator, self.degrees_of_freedom.denominator
        ));

        report
    }
}

/// Shortest decimal form after rounding away representation noise
fn format_level(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    format!("{}", rounded)
}

/// Run the F-test for a fitted model
///
/// # Arguments
/// * `engine` - Fitted regression (needs at least three samples)
/// * `confidence_probability` - Confidence in (0, 1); significance is `1 - p`
/// * `table` - Critical F-values
///
/// # Errors
/// * [`FitError::MalformedSource`] for a probability outside (0, 1)
/// * [`FitError::InsufficientSamples`] / [`FitError::DegenerateInput`] from the engine
/// * [`FitError::CriticalValueNotFound`] when `n - 2` is not tabulated
///
/// # Example
/// ```
/// use fisherfit::regression::{assess_adequacy, AdequacyVerdict, CriticalValueTable};
/// use fisherfit::{RegressionEngine, Sample};
///
/// let samples: Vec<Sample> = [(1.0, 0.0), (-1.0, -2.0), (1.0, 1.0), (1.0, 0.0), (-1.0, -2.0), (0.0, -1.0)]
///     .into_iter()
///     .map(Sample::from)
///     .collect();
/// let engine = RegressionEngine::new(&samples).unwrap();
/// let assessment = assess_adequacy(&engine, 0.95, CriticalValueTable::standard()).unwrap();
/// assert_eq!(assessment.verdict, AdequacyVerdict::Adequate);
/// assert_eq!(assessment.critical_value, 7.71);
/// ```
pub fn assess_adequacy(
    engine: &RegressionEngine,
    confidence_probability: f64,
    table: &CriticalValueTable,
) -> Result<AdequacyAssessment> {
    validate_confidence(confidence_probability)?;

    let significance_level = 1.0 - confidence_probability;
    let degrees_of_freedom = engine.degrees_of_freedom()?;
    let f_statistic = engine.f_statistic()?;

    let critical_value = table.critical_value(
        significance_level,
        degrees_of_freedom.numerator,
        degrees_of_freedom.denominator,
    )?;

    let verdict = if f_statistic < critical_value {
        AdequacyVerdict::Inadequate
    } else {
        AdequacyVerdict::Adequate
    };

    tracing::debug!(
        f_statistic,
        critical_value,
        significance_level,
        denominator_df = degrees_of_freedom.denominator,
        ?verdict,
        "assessed model adequacy"
    );

    Ok(AdequacyAssessment {
        verdict,
        f_statistic,
        critical_value,
        confidence_probability,
        significance_level,
        degrees_of_freedom,
    })
}

/// Confidence probability must lie strictly between 0 and 1
pub fn validate_confidence(confidence_probability: f64) -> Result<()> {
    if !(confidence_probability > 0.0 && confidence_probability < 1.0) {
        return Err(FitError::MalformedSource(format!(
            "confidence_probability must be in (0, 1), got {}",
            confidence_probability
        )));
    }
    Ok(())
}
