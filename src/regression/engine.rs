// Least-squares fit of y = a1·x + a0 with residual decomposition
//
// All derived series are computed once, at construction, in dependency order:
// products → model → fitted values → centered/residual differences.
// Sums are strict left folds so results are reproducible bit-for-bit.

use crate::error::{FitError, Result};
use crate::sample::Sample;
use serde::{Deserialize, Serialize};

/// Minimum number of samples for a defined F-statistic (denominator df = n - 2)
pub const MIN_SAMPLES_FOR_F_TEST: usize = 3;

/// Per-sample series exposed by [`RegressionEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Observed x
    X,
    /// Observed y
    Y,
    /// x·y
    XY,
    /// x²
    XX,
    /// y²
    YY,
    /// Model prediction ŷ
    Fitted,
    /// ŷ - ȳ
    FitCenteredDiff,
    /// (ŷ - ȳ)²
    FitCenteredDiffSq,
    /// ŷ - y (fit minus observed)
    Residual,
    /// (ŷ - y)²
    ResidualSq,
}

impl Series {
    /// Every series, in report column order
    pub const ALL: [Series; 10] = [
        Series::X,
        Series::Y,
        Series::XY,
        Series::XX,
        Series::YY,
        Series::Fitted,
        Series::FitCenteredDiff,
        Series::FitCenteredDiffSq,
        Series::Residual,
        Series::ResidualSq,
    ];

    /// Column header used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Series::X => "x",
            Series::Y => "y",
            Series::XY => "x*y",
            Series::XX => "x^2",
            Series::YY => "y^2",
            Series::Fitted => "y_fit",
            Series::FitCenteredDiff => "y_fit-y_mean",
            Series::FitCenteredDiffSq => "(y_fit-y_mean)^2",
            Series::Residual => "y_fit-y",
            Series::ResidualSq => "(y_fit-y)^2",
        }
    }
}

/// Coordinate selector for [`RegressionEngine::expected_value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Fitted linear function y = slope·x + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// a1
    pub slope: f64,
    /// a0
    pub intercept: f64,
}

impl LinearModel {
    /// Evaluate the model at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Degrees of freedom of the F-test for a single-predictor model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreesOfFreedom {
    pub numerator: u32,
    pub denominator: u32,
}

/// Sum a series left to right, starting from 0.0
///
/// The accumulation order is fixed so that every sum (and every mean derived
/// from one) is exactly reproducible.
pub fn left_sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// Simple linear regression over an owned dataset
#[derive(Debug, Clone)]
pub struct RegressionEngine {
    samples: Vec<Sample>,
    x: Vec<f64>,
    y: Vec<f64>,
    xy: Vec<f64>,
    xx: Vec<f64>,
    yy: Vec<f64>,
    fitted: Vec<f64>,
    fit_centered_diff: Vec<f64>,
    fit_centered_diff_sq: Vec<f64>,
    residual: Vec<f64>,
    residual_sq: Vec<f64>,
    model: LinearModel,
}

impl RegressionEngine {
    /// Fit a model to `samples`
    ///
    /// # Errors
    /// * [`FitError::EmptyInput`] when `samples` is empty
    /// * [`FitError::DegenerateInput`] when every x is identical, or when the
    ///   slope denominator `n·Σx² - (Σx)²` is not positive
    ///
    /// The denominator is computed from raw sums, so x values sharing a large
    /// common offset (around 1e8 and beyond) lose precision to cancellation.
    /// Such datasets may fit poorly or be rejected as degenerate; center x
    /// before fitting.
    ///
    /// # Example
    /// ```
    /// use fisherfit::{RegressionEngine, Sample};
    ///
    /// let samples = [Sample::new(0.0, 1.0), Sample::new(1.0, 3.0), Sample::new(2.0, 5.0)];
    /// let engine = RegressionEngine::new(&samples).unwrap();
    /// assert_eq!(engine.model().slope, 2.0);
    /// assert_eq!(engine.model().intercept, 1.0);
    /// ```
    pub fn new(samples: &[Sample]) -> Result<Self> {
        if samples.is_empty() {
            return Err(FitError::EmptyInput);
        }

        let samples = samples.to_vec();
        let x: Vec<f64> = samples.iter().map(Sample::x).collect();
        let y: Vec<f64> = samples.iter().map(Sample::y).collect();

        let xy: Vec<f64> = samples.iter().map(|s| s.x() * s.y()).collect();
        let xx: Vec<f64> = samples.iter().map(|s| s.x() * s.x()).collect();
        let yy: Vec<f64> = samples.iter().map(|s| s.y() * s.y()).collect();

        let model = fit_model(&x, &y, &xy, &xx)?;
        tracing::trace!(
            slope = model.slope,
            intercept = model.intercept,
            samples = samples.len(),
            "fitted linear model"
        );

        let fitted: Vec<f64> = x.iter().map(|&xi| model.predict(xi)).collect();

        let y_mean = left_sum(&y) / y.len() as f64;
        let fit_centered_diff: Vec<f64> = fitted.iter().map(|&f| f - y_mean).collect();
        let fit_centered_diff_sq: Vec<f64> = fit_centered_diff.iter().map(|d| d * d).collect();
        let residual: Vec<f64> = fitted.iter().zip(&y).map(|(f, yi)| f - yi).collect();
        let residual_sq: Vec<f64> = residual.iter().map(|r| r * r).collect();

        Ok(Self {
            samples,
            x,
            y,
            xy,
            xx,
            yy,
            fitted,
            fit_centered_diff,
            fit_centered_diff_sq,
            residual,
            residual_sq,
            model,
        })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: an engine cannot be built from an empty dataset
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples the model was fitted to, in original order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// A derived series, index-aligned with [`samples`](Self::samples)
    pub fn series(&self, series: Series) -> &[f64] {
        match series {
            Series::X => &self.x,
            Series::Y => &self.y,
            Series::XY => &self.xy,
            Series::XX => &self.xx,
            Series::YY => &self.yy,
            Series::Fitted => &self.fitted,
            Series::FitCenteredDiff => &self.fit_centered_diff,
            Series::FitCenteredDiffSq => &self.fit_centered_diff_sq,
            Series::Residual => &self.residual,
            Series::ResidualSq => &self.residual_sq,
        }
    }

    /// Left-to-right sum of a series
    pub fn sum(&self, series: Series) -> f64 {
        left_sum(self.series(series))
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y
    }

    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Signed residuals ŷ - y
    pub fn residuals(&self) -> &[f64] {
        &self.residual
    }

    /// Arithmetic mean of x or y
    pub fn expected_value(&self, axis: Axis) -> f64 {
        let series = match axis {
            Axis::X => Series::X,
            Axis::Y => Series::Y,
        };
        self.sum(series) / self.len() as f64
    }

    pub fn model(&self) -> LinearModel {
        self.model
    }

    /// Numerator degrees of freedom (k): one predictor
    pub fn degrees_of_freedom_numerator(&self) -> u32 {
        1
    }

    /// Degrees of freedom (k, n - 2) of the F-test
    ///
    /// # Errors
    /// [`FitError::InsufficientSamples`] when fewer than three samples were fitted.
    pub fn degrees_of_freedom(&self) -> Result<DegreesOfFreedom> {
        let n = self.require_f_test_samples()?;
        let denominator = u32::try_from(n - 2).map_err(|_| FitError::InsufficientSamples {
            required: MIN_SAMPLES_FOR_F_TEST,
            actual: n,
        })?;
        Ok(DegreesOfFreedom {
            numerator: self.degrees_of_freedom_numerator(),
            denominator,
        })
    }

    /// F = (Σ(ŷ - ȳ)² · (n - 2)) / (Σ(ŷ - y)² · k)
    ///
    /// A perfect fit (zero residual sum) yields `f64::INFINITY`.
    ///
    /// # Errors
    /// * [`FitError::InsufficientSamples`] when fewer than three samples were fitted
    /// * [`FitError::DegenerateInput`] when both sums are zero (constant y
    ///   leaves nothing to explain)
    pub fn f_statistic(&self) -> Result<f64> {
        let n = self.require_f_test_samples()?;
        let k = self.degrees_of_freedom_numerator();

        let numerator = self.sum(Series::FitCenteredDiffSq) * (n - 2) as f64;
        let denominator = self.sum(Series::ResidualSq) * f64::from(k);

        if denominator == 0.0 {
            if numerator == 0.0 {
                return Err(FitError::DegenerateInput);
            }
            return Ok(f64::INFINITY);
        }

        Ok(numerator / denominator)
    }

    /// Coefficient of determination R² = Σ(ŷ - ȳ)² / Σ(y - ȳ)²
    ///
    /// `None` when y has no variance.
    pub fn r_squared(&self) -> Option<f64> {
        let y_mean = self.expected_value(Axis::Y);
        let total = self
            .y
            .iter()
            .fold(0.0, |acc, yi| acc + (yi - y_mean) * (yi - y_mean));
        (total != 0.0).then(|| self.sum(Series::FitCenteredDiffSq) / total)
    }

    fn require_f_test_samples(&self) -> Result<usize> {
        let n = self.len();
        if n < MIN_SAMPLES_FOR_F_TEST {
            return Err(FitError::InsufficientSamples {
                required: MIN_SAMPLES_FOR_F_TEST,
                actual: n,
            });
        }
        Ok(n)
    }
}

fn fit_model(x: &[f64], y: &[f64], xy: &[f64], xx: &[f64]) -> Result<LinearModel> {
    if x.iter().all(|&xi| xi == x[0]) {
        return Err(FitError::DegenerateInput);
    }

    let n = x.len() as f64;
    let sum_x = left_sum(x);
    let sum_y = left_sum(y);
    let sum_xy = left_sum(xy);
    let sum_xx = left_sum(xx);

    // Never negative in exact arithmetic
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator <= 0.0 || !denominator.is_finite() {
        return Err(FitError::DegenerateInput);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::DegenerateInput);
    }

    Ok(LinearModel { slope, intercept })
}
