// Simple linear regression with an F-test of model adequacy
//
// Pipeline:
// - engine: least-squares fit of y = a1·x + a0, per-sample series and sums
// - critical_value: published F-distribution critical values, looked up by
//   significance level (ceiling search with epsilon) and df pair (exact)
// - verdict: significance = 1 - confidence, df = (1, n - 2), F vs F_critical
//
// Sums are left folds in sample order, so every accessor is reproducible
// bit-for-bit across runs.

mod critical_value;
mod engine;
mod verdict;

pub use critical_value::{CriticalValueTable, DenominatorDf, LevelRow, LEVEL_EPSILON};
pub use engine::{
    left_sum, Axis, DegreesOfFreedom, LinearModel, RegressionEngine, Series,
    MIN_SAMPLES_FOR_F_TEST,
};
pub use verdict::{assess_adequacy, validate_confidence, AdequacyAssessment, AdequacyVerdict};
