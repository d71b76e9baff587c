//! Coefficient-of-variation based consistency labels.

use crate::averages::metric_values;
use crate::stats::{max, mean, min, population_std_dev};
use bulls_common::{Metric, PlayerGame};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stability label for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyCategory {
    /// CV below the first band
    VeryConsistent,
    /// CV below the second band
    Consistent,
    /// CV below the third band
    Moderate,
    /// CV at or above the third band
    Volatile,
    /// Mean of zero, CV undefined
    ZeroMean,
}

impl ConsistencyCategory {
    /// Snake case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryConsistent => "very_consistent",
            Self::Consistent => "consistent",
            Self::Moderate => "moderate",
            Self::Volatile => "volatile",
            Self::ZeroMean => "zero_mean",
        }
    }
}

impl fmt::Display for ConsistencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper CV bounds (ratios) for each label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyBands {
    /// Below this, very consistent
    pub very_consistent: f64,
    /// Below this, consistent
    pub consistent: f64,
    /// Below this, moderate; otherwise volatile
    pub moderate: f64,
}

impl Default for ConsistencyBands {
    fn default() -> Self {
        Self {
            very_consistent: 0.20,
            consistent: 0.35,
            moderate: 0.50,
        }
    }
}

impl ConsistencyBands {
    /// Label for a coefficient of variation.
    #[must_use]
    pub fn categorize(&self, cv: f64) -> ConsistencyCategory {
        if cv < self.very_consistent {
            ConsistencyCategory::VeryConsistent
        } else if cv < self.consistent {
            ConsistencyCategory::Consistent
        } else if cv < self.moderate {
            ConsistencyCategory::Moderate
        } else {
            ConsistencyCategory::Volatile
        }
    }
}

/// Spread of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consistency {
    /// Mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// `std_dev / |mean|`, 0.0 when the mean is zero
    pub cv: f64,
    /// Label derived from `cv`
    pub category: ConsistencyCategory,
    /// Highest value
    pub high: f64,
    /// Lowest value
    pub low: f64,
}

impl Consistency {
    /// Score a plain series. Returns `None` when it is empty.
    #[must_use]
    pub fn from_values(values: &[f64], bands: &ConsistencyBands) -> Option<Self> {
        let mean = mean(values)?;
        let std_dev = population_std_dev(values)?;
        let (cv, category) = if mean == 0.0 {
            (0.0, ConsistencyCategory::ZeroMean)
        } else {
            let cv = std_dev / mean.abs();
            (cv, bands.categorize(cv))
        };
        Some(Self {
            mean,
            std_dev,
            cv,
            category,
            high: max(values)?,
            low: min(values)?,
        })
    }

    /// Coefficient of variation as a percentage.
    #[must_use]
    pub fn cv_pct(&self) -> f64 {
        self.cv * 100.0
    }
}

/// Score each metric over `games`. Empty input yields an empty map.
#[must_use]
pub fn consistency_score(
    games: &[PlayerGame],
    metrics: &[Metric],
    bands: &ConsistencyBands,
) -> BTreeMap<Metric, Consistency> {
    metrics
        .iter()
        .filter_map(|&metric| {
            Consistency::from_values(&metric_values(games, metric), bands)
                .map(|score| (metric, score))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_common::test_utils::{assert_approx_eq, fixtures};

    fn score(values: &[f64]) -> Consistency {
        Consistency::from_values(values, &ConsistencyBands::default()).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(consistency_score(&[], &crate::DEFAULT_METRICS, &ConsistencyBands::default())
            .is_empty());
        assert!(Consistency::from_values(&[], &ConsistencyBands::default()).is_none());
    }

    #[test]
    fn test_very_consistent() {
        let result = score(&[20.0, 21.0, 20.0, 19.0, 20.0]);
        assert_eq!(result.category, ConsistencyCategory::VeryConsistent);
        assert_approx_eq(result.mean, 20.0, 1e-12);
        assert_approx_eq(result.std_dev, 0.4_f64.sqrt(), 1e-12);
        assert_approx_eq(result.high, 21.0, 0.0);
        assert_approx_eq(result.low, 19.0, 0.0);
    }

    #[test]
    fn test_volatile() {
        let result = score(&[5.0, 40.0, 8.0, 35.0, 10.0]);
        assert_eq!(result.category, ConsistencyCategory::Volatile);
        assert!(result.cv_pct() > 50.0);
    }

    #[test]
    fn test_zero_mean_sentinel() {
        let result = score(&[0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(result.category, ConsistencyCategory::ZeroMean);
        assert!(result.cv.abs() < f64::EPSILON);

        let balanced = score(&[-5.0, 5.0]);
        assert_eq!(balanced.category, ConsistencyCategory::ZeroMean);
    }

    #[test]
    fn test_band_edges() {
        let bands = ConsistencyBands::default();
        assert_eq!(bands.categorize(0.19), ConsistencyCategory::VeryConsistent);
        assert_eq!(bands.categorize(0.20), ConsistencyCategory::Consistent);
        assert_eq!(bands.categorize(0.35), ConsistencyCategory::Moderate);
        assert_eq!(bands.categorize(0.50), ConsistencyCategory::Volatile);
    }

    #[test]
    fn test_metric_selection() {
        let games = fixtures::sample_player_games();
        let result = consistency_score(
            &games,
            &[Metric::Points, Metric::Blocks],
            &ConsistencyBands::default(),
        );
        assert_eq!(result.len(), 2);
        assert!(result.contains_key(&Metric::Points));
        assert!(!result.contains_key(&Metric::Rebounds));
        assert_eq!(
            result[&Metric::Points].category,
            ConsistencyCategory::VeryConsistent
        );
    }
}
