//! Regression report rendering
//!
//! A [`RegressionReport`] snapshots everything the engine and the F-test
//! produce for one dataset and renders it as an aligned text table, JSON or CSV.

use crate::config::AnalysisConfig;
use crate::regression::{
    AdequacyAssessment, AdequacyVerdict, Axis, LinearModel, RegressionEngine, Series,
};
use serde::{Deserialize, Serialize};

/// One value per derived series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesValues {
    pub x: f64,
    pub y: f64,
    pub xy: f64,
    pub xx: f64,
    pub yy: f64,
    pub fitted: f64,
    pub fit_centered_diff: f64,
    pub fit_centered_diff_sq: f64,
    pub residual: f64,
    pub residual_sq: f64,
}

impl SeriesValues {
    fn from_fn(mut value: impl FnMut(Series) -> f64) -> Self {
        Self {
            x: value(Series::X),
            y: value(Series::Y),
            xy: value(Series::XY),
            xx: value(Series::XX),
            yy: value(Series::YY),
            fitted: value(Series::Fitted),
            fit_centered_diff: value(Series::FitCenteredDiff),
            fit_centered_diff_sq: value(Series::FitCenteredDiffSq),
            residual: value(Series::Residual),
            residual_sq: value(Series::ResidualSq),
        }
    }

    pub fn get(&self, series: Series) -> f64 {
        match series {
            Series::X => self.x,
            Series::Y => self.y,
            Series::XY => self.xy,
            Series::XX => self.xx,
            Series::YY => self.yy,
            Series::Fitted => self.fitted,
            Series::FitCenteredDiff => self.fit_centered_diff,
            Series::FitCenteredDiffSq => self.fit_centered_diff_sq,
            Series::Residual => self.residual,
            Series::ResidualSq => self.residual_sq,
        }
    }

    fn formatted(&self, precision: usize) -> Vec<String> {
        Series::ALL
            .iter()
            .map(|&s| format!("{:.prec$}", self.get(s), prec = precision))
            .collect()
    }
}

/// Table row for one sample (1-based index)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub index: usize,
    #[serde(flatten)]
    pub values: SeriesValues,
}

/// Full analysis result for one dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    pub source: String,
    pub rows: Vec<ReportRow>,
    pub sums: SeriesValues,
    pub x_mean: f64,
    pub y_mean: f64,
    pub model: LinearModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_squared: Option<f64>,
    pub assessment: AdequacyAssessment,
}

impl RegressionReport {
    /// Snapshot an engine and its F-test result
    pub fn build(
        source: impl Into<String>,
        engine: &RegressionEngine,
        assessment: AdequacyAssessment,
    ) -> Self {
        let rows = (0..engine.len())
            .map(|i| ReportRow {
                index: i + 1,
                values: SeriesValues::from_fn(|s| engine.series(s)[i]),
            })
            .collect();

        Self {
            source: source.into(),
            rows,
            sums: SeriesValues::from_fn(|s| engine.sum(s)),
            x_mean: engine.expected_value(Axis::X),
            y_mean: engine.expected_value(Axis::Y),
            model: engine.model(),
            r_squared: engine.r_squared(),
            assessment,
        }
    }

    /// Aligned text table followed by means, F-statistic and the verdict
    pub fn to_text(&self, config: &AnalysisConfig) -> String {
        let prec = config.precision;
        let delimiter = format!("{}\n", "=".repeat(config.delimiter_width));

        let mut header = vec!["N".to_string()];
        header.extend(Series::ALL.iter().map(|s| s.label().to_string()));

        let mut table: Vec<Vec<String>> = vec![header];
        for row in &self.rows {
            let mut cells = vec![row.index.to_string()];
            cells.extend(row.values.formatted(prec));
            table.push(cells);
        }
        let mut sum_cells = vec!["sum:".to_string()];
        sum_cells.extend(self.sums.formatted(prec));
        table.push(sum_cells);

        let widths: Vec<usize> = (0..table[0].len())
            .map(|col| table.iter().map(|r| r[col].len()).max().unwrap_or(0))
            .collect();
        let separator: String = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut out = format!("Data source: {}\n", self.source);
        for (i, cells) in table.iter().enumerate() {
            if i == 1 || i == table.len() - 1 {
                out.push_str(&separator);
                out.push('\n');
            }
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
                .collect();
            out.push_str(&line.join(" | "));
            out.push('\n');
        }

        out.push_str(&delimiter);
        out.push_str(&format!("Expected value of x: {:.prec$}\n", self.x_mean, prec = prec));
        out.push_str(&format!("Expected value of y: {:.prec$}\n", self.y_mean, prec = prec));
        out.push_str(&delimiter);
        out.push_str(&format!(
            "Model: y = {:.prec$} * x + {:.prec$}\n",
            self.model.slope,
            self.model.intercept,
            prec = prec
        ));
        if let Some(r2) = self.r_squared {
            out.push_str(&format!("R^2: {:.prec$}\n", r2, prec = prec));
        }
        out.push_str(&format!(
            "F-statistic: {:.prec$}\n",
            self.assessment.f_statistic,
            prec = prec
        ));
        out.push_str(&delimiter);
        out.push_str(&format!("{}\n", self.assessment.comparison_string(prec)));
        out.push_str(match self.assessment.verdict {
            AdequacyVerdict::Adequate => "Model is adequate\n",
            AdequacyVerdict::Inadequate => "Model is inadequate\n",
        });
        out.push_str(&delimiter);

        out
    }

    /// Pretty-printed JSON array, one object per report
    pub fn to_json(reports: &[Self]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(reports)
    }

    /// CSV block for one dataset
    ///
    /// A `# source: <name>` line, the per-sample rows and a `sum` row, then a
    /// two-line F-test section (`f_statistic,critical_value,...` header and values).
    pub fn to_csv(&self, precision: usize) -> String {
        let mut header = vec!["n"];
        header.extend(Series::ALL.iter().map(Series::label));

        let mut out = format!("# source: {}\n", self.source);
        out.push_str(&header.join(","));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&row.index.to_string());
            for cell in row.values.formatted(precision) {
                out.push(',');
                out.push_str(&cell);
            }
            out.push('\n');
        }

        out.push_str("sum");
        for cell in self.sums.formatted(precision) {
            out.push(',');
            out.push_str(&cell);
        }
        out.push('\n');

        let a = &self.assessment;
        out.push_str("f_statistic,critical_value,numerator_df,denominator_df,verdict\n");
        out.push_str(&format!(
            "{:.prec$},{:.prec$},{},{},{}\n",
            a.f_statistic,
            a.critical_value,
            a.degrees_of_freedom.numerator,
            a.degrees_of_freedom.denominator,
            a.verdict.as_str(),
            prec = precision
        ));

        out
    }
}
