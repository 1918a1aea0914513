// Critical values of the F-distribution for single-predictor models
//
// Values are upper-tail critical points F(α; 1, d) from the standard
// published F tables, for α ∈ {0.05, 0.10, 0.25} and d = 1..=30, 40, 60, 120, ∞.
// Lookups never interpolate: the requested df pair must be tabulated.

use crate::error::{FitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance absorbing representation error in derived significance levels
/// (e.g. `1.0 - 0.95` is slightly above `0.05`)
pub const LEVEL_EPSILON: f64 = 1e-9;

/// Denominator degrees of freedom of a tabulated critical value
///
/// Variant order matters: every finite value sorts before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DenominatorDf {
    Finite(u32),
    Infinite,
}

impl From<u32> for DenominatorDf {
    fn from(df: u32) -> Self {
        DenominatorDf::Finite(df)
    }
}

impl fmt::Display for DenominatorDf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenominatorDf::Finite(df) => write!(f, "{}", df),
            DenominatorDf::Infinite => write!(f, "inf"),
        }
    }
}

/// Critical values for one significance level
#[derive(Debug)]
pub struct LevelRow {
    pub significance_level: f64,
    pub numerator_df: u32,
    /// Sorted by denominator df
    pub values: &'static [(DenominatorDf, f64)],
}

/// Immutable table of critical F-values, sorted by significance level
#[derive(Debug)]
pub struct CriticalValueTable {
    levels: &'static [LevelRow],
}

use DenominatorDf::{Finite as D, Infinite as INF};

const ALPHA_0_05: [(DenominatorDf, f64); 34] = [
    (D(1), 161.4),
    (D(2), 18.51),
    (D(3), 10.13),
    (D(4), 7.71),
    (D(5), 6.61),
    (D(6), 5.99),
    (D(7), 5.59),
    (D(8), 5.32),
    (D(9), 5.12),
    (D(10), 4.96),
    (D(11), 4.84),
    (D(12), 4.75),
    (D(13), 4.67),
    (D(14), 4.60),
    (D(15), 4.54),
    (D(16), 4.49),
    (D(17), 4.45),
    (D(18), 4.41),
    (D(19), 4.38),
    (D(20), 4.35),
    (D(21), 4.32),
    (D(22), 4.30),
    (D(23), 4.28),
    (D(24), 4.26),
    (D(25), 4.24),
    (D(26), 4.23),
    (D(27), 4.21),
    (D(28), 4.20),
    (D(29), 4.18),
    (D(30), 4.17),
    (D(40), 4.08),
    (D(60), 4.00),
    (D(120), 3.92),
    (INF, 3.84),
];

const ALPHA_0_10: [(DenominatorDf, f64); 34] = [
    (D(1), 39.86),
    (D(2), 8.53),
    (D(3), 5.54),
    (D(4), 4.54),
    (D(5), 4.06),
    (D(6), 3.78),
    (D(7), 3.59),
    (D(8), 3.46),
    (D(9), 3.36),
    (D(10), 3.29),
    (D(11), 3.23),
    (D(12), 3.18),
    (D(13), 3.14),
    (D(14), 3.10),
    (D(15), 3.07),
    (D(16), 3.05),
    (D(17), 3.03),
    (D(18), 3.01),
    (D(19), 2.99),
    (D(20), 2.97),
    (D(21), 2.96),
    (D(22), 2.95),
    (D(23), 2.94),
    (D(24), 2.93),
    (D(25), 2.92),
    (D(26), 2.91),
    (D(27), 2.90),
    (D(28), 2.89),
    (D(29), 2.89),
    (D(30), 2.88),
    (D(40), 2.84),
    (D(60), 2.79),
    (D(120), 2.75),
    (INF, 2.71),
];

const ALPHA_0_25: [(DenominatorDf, f64); 34] = [
    (D(1), 5.83),
    (D(2), 2.57),
    (D(3), 2.02),
    (D(4), 1.81),
    (D(5), 1.69),
    (D(6), 1.62),
    (D(7), 1.57),
    (D(8), 1.54),
    (D(9), 1.51),
    (D(10), 1.49),
    (D(11), 1.47),
    (D(12), 1.46),
    (D(13), 1.45),
    (D(14), 1.44),
    (D(15), 1.43),
    (D(16), 1.42),
    (D(17), 1.42),
    (D(18), 1.41),
    (D(19), 1.41),
    (D(20), 1.40),
    (D(21), 1.40),
    (D(22), 1.40),
    (D(23), 1.39),
    (D(24), 1.39),
    (D(25), 1.39),
    (D(26), 1.38),
    (D(27), 1.38),
    (D(28), 1.38),
    (D(29), 1.38),
    (D(30), 1.38),
    (D(40), 1.36),
    (D(60), 1.35),
    (D(120), 1.34),
    (INF, 1.32),
];

static STANDARD_LEVELS: [LevelRow; 3] = [
    LevelRow {
        significance_level: 0.05,
        numerator_df: 1,
        values: &ALPHA_0_05,
    },
    LevelRow {
        significance_level: 0.10,
        numerator_df: 1,
        values: &ALPHA_0_10,
    },
    LevelRow {
        significance_level: 0.25,
        numerator_df: 1,
        values: &ALPHA_0_25,
    },
];

static STANDARD_TABLE: CriticalValueTable = CriticalValueTable {
    levels: &STANDARD_LEVELS,
};

impl CriticalValueTable {
    /// The published table for α = 0.05, 0.10 and 0.25
    pub fn standard() -> &'static CriticalValueTable {
        &STANDARD_TABLE
    }

    /// Tabulated significance levels, ascending
    pub fn significance_levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().map(|row| row.significance_level)
    }

    /// Critical F-value for `(numerator_df, denominator_df)` at the smallest
    /// tabulated level ≥ `significance_level` (within [`LEVEL_EPSILON`])
    ///
    /// # Errors
    /// [`FitError::CriticalValueNotFound`] when the level exceeds every
    /// tabulated level or the df pair is not tabulated at the selected level.
    ///
    /// # Example
    /// ```
    /// use fisherfit::regression::CriticalValueTable;
    ///
    /// let table = CriticalValueTable::standard();
    /// assert_eq!(table.critical_value(0.05, 1, 4).unwrap(), 7.71);
    /// assert_eq!(table.critical_value(1.0 - 0.95, 1, 4).unwrap(), 7.71);
    /// assert!(table.critical_value(0.05, 1, 31).is_err());
    /// ```
    pub fn critical_value(
        &self,
        significance_level: f64,
        numerator_df: u32,
        denominator_df: u32,
    ) -> Result<f64> {
        self.lookup(
            significance_level,
            numerator_df,
            DenominatorDf::Finite(denominator_df),
        )
    }

    /// Same as [`critical_value`](Self::critical_value), also reaching the ∞ row
    pub fn lookup(
        &self,
        significance_level: f64,
        numerator_df: u32,
        denominator_df: DenominatorDf,
    ) -> Result<f64> {
        let not_found = || FitError::CriticalValueNotFound {
            significance_level,
            numerator_df,
            denominator_df,
        };

        let row = self.level_row(significance_level).ok_or_else(not_found)?;
        if row.numerator_df != numerator_df {
            return Err(not_found());
        }

        row.values
            .binary_search_by(|(df, _)| df.cmp(&denominator_df))
            .map(|idx| row.values[idx].1)
            .map_err(|_| not_found())
    }

    /// Ceiling search: first level not below `significance_level - LEVEL_EPSILON`
    fn level_row(&self, significance_level: f64) -> Option<&LevelRow> {
        if significance_level.is_nan() {
            return None;
        }
        let bound = significance_level - LEVEL_EPSILON;
        let idx = self
            .levels
            .partition_point(|row| row.significance_level < bound);
        self.levels.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static CriticalValueTable {
        CriticalValueTable::standard()
    }

    #[test]
    fn test_published_values() {
        assert_eq!(table().critical_value(0.05, 1, 1).unwrap(), 161.4);
        assert_eq!(table().critical_value(0.05, 1, 30).unwrap(), 4.17);
        assert_eq!(table().critical_value(0.10, 1, 4).unwrap(), 4.54);
        assert_eq!(table().critical_value(0.25, 1, 120).unwrap(), 1.34);
    }

    #[test]
    fn test_infinite_row() {
        assert_eq!(
            table().lookup(0.05, 1, DenominatorDf::Infinite).unwrap(),
            3.84
        );
        assert_eq!(
            table().lookup(0.10, 1, DenominatorDf::Infinite).unwrap(),
            2.71
        );
    }

    #[test]
    fn test_absent_denominator_not_found() {
        for df in [0, 31, 39, 41, 121, 1000] {
            assert!(matches!(
                table().critical_value(0.05, 1, df),
                Err(FitError::CriticalValueNotFound { .. })
            ));
        }
    }

    #[test]
    fn test_absent_numerator_not_found() {
        assert!(matches!(
            table().critical_value(0.05, 2, 4),
            Err(FitError::CriticalValueNotFound { .. })
        ));
    }

    #[test]
    fn test_level_above_table_not_found() {
        assert!(table().critical_value(0.30, 1, 4).is_err());
        assert!(table().critical_value(0.9, 1, 4).is_err());
        assert!(table().critical_value(f64::NAN, 1, 4).is_err());
    }

    #[test]
    fn test_level_ceiling_between_rows() {
        // 0.07 resolves to the 0.10 row, 0.01 to the 0.05 row
        assert_eq!(table().critical_value(0.07, 1, 4).unwrap(), 4.54);
        assert_eq!(table().critical_value(0.01, 1, 4).unwrap(), 7.71);
        assert_eq!(table().critical_value(0.2, 1, 4).unwrap(), 1.81);
    }

    #[test]
    fn test_level_epsilon_tolerance() {
        // 1 - 0.95 = 0.05000000000000004 must still hit the 0.05 row
        assert_eq!(table().critical_value(1.0 - 0.95, 1, 4).unwrap(), 7.71);
        assert_eq!(table().critical_value(0.049_999_999, 1, 4).unwrap(), 7.71);
        assert_eq!(table().critical_value(1.0 - 0.9, 1, 4).unwrap(), 4.54);
        assert_eq!(table().critical_value(1.0 - 0.75, 1, 4).unwrap(), 1.81);
    }

    #[test]
    fn test_levels_and_rows_sorted() {
        let levels: Vec<f64> = table().significance_levels().collect();
        assert_eq!(levels, vec![0.05, 0.10, 0.25]);
        for row in STANDARD_LEVELS.iter() {
            assert!(row.values.windows(2).all(|w| w[0].0 < w[1].0));
            assert_eq!(row.values.len(), 34);
        }
    }

    #[test]
    fn test_values_decrease_with_denominator() {
        for row in STANDARD_LEVELS.iter() {
            assert!(row.values.windows(2).all(|w| w[0].1 >= w[1].1));
        }
    }

    #[test]
    fn test_denominator_display() {
        assert_eq!(DenominatorDf::Finite(4).to_string(), "4");
        assert_eq!(DenominatorDf::Infinite.to_string(), "inf");
    }
}
