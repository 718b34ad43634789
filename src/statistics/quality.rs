//! Data-quality scoring for raw time-series input

use crate::models::TimeSeriesPoint;
use crate::statistics::descriptive::quartiles;
use crate::statistics::distribution::{kurtosis, skewness};
use serde::{Deserialize, Serialize};

/// Points below which a series is considered too short to trust
pub const MIN_RELIABLE_POINTS: usize = 30;

/// Fence multiplier used when counting outliers for the score
const OUTLIER_FENCE: f64 = 1.5;

/// Something wrong with a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    NonFiniteValues { count: usize },
    InsufficientHistory { points: usize, minimum: usize },
    UnorderedTimestamps,
    DuplicateTimestamps { count: usize },
}

/// Score in [0, 100] plus the issues found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub score: f64,
    pub point_count: usize,
    /// Share of finite values outside the 1.5 IQR fences, in percent
    pub outlier_percentage: f64,
    pub issues: Vec<DataQualityIssue>,
}

impl DataQualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Score a sequence of points in the order they were received
///
/// Starts at 100 and subtracts 2 per outlier percent, 5 per unit of absolute
/// skewness, 3 per unit of absolute excess kurtosis, 2 per point short of
/// [`MIN_RELIABLE_POINTS`] and 2 per non-finite percent. Unordered or duplicate
/// timestamps cost 10 each.
pub fn assess_quality(points: &[TimeSeriesPoint]) -> DataQualityReport {
    let mut issues = Vec::new();
    let point_count = points.len();

    let finite: Vec<f64> = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .collect();
    let non_finite = point_count - finite.len();
    if non_finite > 0 {
        issues.push(DataQualityIssue::NonFiniteValues { count: non_finite });
    }

    if point_count < MIN_RELIABLE_POINTS {
        issues.push(DataQualityIssue::InsufficientHistory {
            points: point_count,
            minimum: MIN_RELIABLE_POINTS,
        });
    }

    let unordered = points
        .windows(2)
        .any(|pair| pair[1].timestamp < pair[0].timestamp);
    if unordered {
        issues.push(DataQualityIssue::UnorderedTimestamps);
    }

    let mut timestamps: Vec<_> = points.iter().map(|p| p.timestamp).collect();
    timestamps.sort();
    let duplicates = timestamps.windows(2).filter(|pair| pair[0] == pair[1]).count();
    if duplicates > 0 {
        issues.push(DataQualityIssue::DuplicateTimestamps { count: duplicates });
    }

    let outlier_percentage = outlier_percentage(&finite);

    let mut score = distribution_score(&finite, point_count, outlier_percentage);
    if point_count > 0 {
        score -= non_finite as f64 / point_count as f64 * 100.0 * 2.0;
    }
    if unordered {
        score -= 10.0;
    }
    if duplicates > 0 {
        score -= 10.0;
    }

    DataQualityReport {
        score: score.clamp(0.0, 100.0),
        point_count,
        outlier_percentage,
        issues,
    }
}

/// Unclamped score from the distribution shape and sample size alone
pub(crate) fn distribution_score(values: &[f64], point_count: usize, outlier_percentage: f64) -> f64 {
    let mut score = 100.0;
    score -= outlier_percentage * 2.0;
    score -= skewness(values).abs() * 5.0;
    score -= kurtosis(values).abs() * 3.0;
    if point_count < MIN_RELIABLE_POINTS {
        score -= (MIN_RELIABLE_POINTS - point_count) as f64 * 2.0;
    }
    score
}

/// Share of values outside the 1.5 IQR fences, 0-100
pub(crate) fn outlier_percentage(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let q = quartiles(values);
    let lower = q.q1 - OUTLIER_FENCE * q.iqr();
    let upper = q.q3 + OUTLIER_FENCE * q.iqr();
    let count = values.iter().filter(|&&v| v < lower || v > upper).count();

    count as f64 / values.len() as f64 * 100.0
}
