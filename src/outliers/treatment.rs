//! Outlier treatment: removal, imputation and capping, plus a before/after check

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::outliers::detector::{OutlierResult, OutlierThresholds};
use crate::statistics::{
    distribution_score, kurtosis, mean, median, outlier_percentage, percentile_sorted, skewness,
    sorted_copy, std_dev, MIN_RELIABLE_POINTS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};
use tracing::debug;

/// Share of the original points that must survive treatment
const MIN_RETAINED_RATIO: f64 = 0.7;

/// Std dev below this fraction of the original suggests over-smoothing
const MIN_RETAINED_SPREAD: f64 = 0.5;

/// Replacement strategy for flagged values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImputationMethod {
    /// Interpolate between the nearest unflagged neighbours
    #[default]
    Linear,
    /// Mean of the unflagged values
    Mean,
    /// Median of the unflagged values
    Median,
}

/// What to do with the points a detection run flagged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlierTreatment {
    Remove,
    Impute { method: ImputationMethod },
    /// Clamp every value into the detector's thresholds
    Cap,
}

/// Values after treatment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatedSeries {
    pub values: Vec<f64>,
    pub records_removed: usize,
    pub records_modified: usize,
}

/// Apply `treatment` to the points flagged in `result`
pub fn treat_outliers(data: &[f64], result: &OutlierResult, treatment: OutlierTreatment) -> TreatedSeries {
    let treated = match treatment {
        OutlierTreatment::Remove => remove_points(data, &result.indices),
        OutlierTreatment::Impute { method } => impute_points(data, &result.indices, method),
        OutlierTreatment::Cap => match result.thresholds {
            Some(thresholds) => cap_to_thresholds(data, &thresholds),
            None => TreatedSeries {
                values: data.to_vec(),
                records_removed: 0,
                records_modified: 0,
            },
        },
    };

    debug!(
        method = %result.method,
        flagged = result.count(),
        removed = treated.records_removed,
        modified = treated.records_modified,
        "Outliers treated"
    );
    treated
}

/// Drop the values at `indices`; out-of-range indices are ignored
pub fn remove_points(data: &[f64], indices: &[usize]) -> TreatedSeries {
    let drop: BTreeSet<usize> = indices.iter().copied().collect();
    let values: Vec<f64> = data
        .iter()
        .enumerate()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, &v)| v)
        .collect();

    TreatedSeries {
        records_removed: data.len() - values.len(),
        records_modified: 0,
        values,
    }
}

/// Replace the values at `indices` using only the unflagged values
///
/// Linear interpolation falls back to the nearest unflagged neighbour at either
/// end. With nothing unflagged left, every method uses the median of the whole
/// sample.
pub fn impute_points(data: &[f64], indices: &[usize], method: ImputationMethod) -> TreatedSeries {
    let flagged: BTreeSet<usize> = indices.iter().copied().filter(|&i| i < data.len()).collect();
    let clean: Vec<f64> = data
        .iter()
        .enumerate()
        .filter(|(i, _)| !flagged.contains(i))
        .map(|(_, &v)| v)
        .collect();

    let mut values = data.to_vec();
    if clean.is_empty() {
        let fallback = median(data);
        for &index in &flagged {
            values[index] = fallback;
        }
    } else {
        let fill = match method {
            ImputationMethod::Mean => Some(mean(&clean)),
            ImputationMethod::Median => Some(median(&clean)),
            ImputationMethod::Linear => None,
        };
        for &index in &flagged {
            values[index] = match fill {
                Some(value) => value,
                None => interpolate(data, &flagged, index),
            };
        }
    }

    TreatedSeries {
        values,
        records_removed: 0,
        records_modified: flagged.len(),
    }
}

fn interpolate(data: &[f64], flagged: &BTreeSet<usize>, index: usize) -> f64 {
    let previous = (0..index).rev().find(|i| !flagged.contains(i));
    let next = (index + 1..data.len()).find(|i| !flagged.contains(i));

    match (previous, next) {
        (Some(p), Some(n)) => {
            let weight = (index - p) as f64 / (n - p) as f64;
            data[p] * (1.0 - weight) + data[n] * weight
        }
        (Some(p), None) => data[p],
        (None, Some(n)) => data[n],
        (None, None) => median(data),
    }
}

/// Winsorize into `thresholds`
pub fn cap_to_thresholds(data: &[f64], thresholds: &OutlierThresholds) -> TreatedSeries {
    cap(data, thresholds.lower, thresholds.upper)
}

/// Winsorize into the `[lower_pct, upper_pct]` percentile band of `data`
pub fn cap_to_percentiles(data: &[f64], lower_pct: f64, upper_pct: f64) -> AnalyticsResult<TreatedSeries> {
    let in_range = |p: f64| (0.0..=100.0).contains(&p);
    if !in_range(lower_pct) || !in_range(upper_pct) || lower_pct > upper_pct {
        return Err(AnalyticsError::InvalidInput(format!(
            "Capping percentiles must satisfy 0 <= lower <= upper <= 100 (got {} and {})",
            lower_pct, upper_pct
        )));
    }

    let sorted = sorted_copy(data);
    Ok(cap(
        data,
        percentile_sorted(&sorted, lower_pct),
        percentile_sorted(&sorted, upper_pct),
    ))
}

fn cap(data: &[f64], lower: f64, upper: f64) -> TreatedSeries {
    let mut records_modified = 0;
    let values: Vec<f64> = data
        .iter()
        .map(|&v| {
            if v < lower {
                records_modified += 1;
                lower
            } else if v > upper {
                records_modified += 1;
                upper
            } else {
                v
            }
        })
        .collect();

    TreatedSeries {
        values,
        records_removed: 0,
        records_modified,
    }
}

/// Snapshot of one side of a treatment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreatmentStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Values outside the 1.5 IQR fences
    pub outlier_count: usize,
    pub outlier_percentage: f64,
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
}

impl TreatmentStats {
    pub fn from_values(values: &[f64]) -> Self {
        let outlier_percentage = outlier_percentage(values);
        let (min, max) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };

        Self {
            count: values.len(),
            mean: mean(values),
            median: median(values),
            std_dev: std_dev(values),
            min,
            max,
            outlier_count: (outlier_percentage * values.len() as f64 / 100.0).round() as usize,
            outlier_percentage,
            skewness: skewness(values),
            kurtosis: kurtosis(values),
        }
    }

    /// 0-100, same weighting as the data-quality score
    pub fn quality_score(&self, values: &[f64]) -> f64 {
        distribution_score(values, self.count, self.outlier_percentage).clamp(0.0, 100.0)
    }
}

/// Reason to distrust a treatment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreatmentConcern {
    /// More than 30% of the points were removed
    ExcessiveRemoval { removed: usize, original: usize },
    /// Standard deviation fell below half of the original
    OverSmoothed { original_std_dev: f64, processed_std_dev: f64 },
    /// Fewer points than a reliable analysis needs
    InsufficientHistory { points: usize, minimum: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Readiness {
    /// Quality score above 80
    Ready,
    /// Quality score above 60
    Acceptable,
    NeedsWork,
}

/// Before/after comparison of a treatment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentValidation {
    pub original: TreatmentStats,
    pub processed: TreatmentStats,
    /// Drop in outlier percentage points
    pub outlier_reduction: f64,
    /// Drop in standard deviation, percent of the original
    pub variance_reduction: f64,
    /// `30 * skewness gain + 20 * excess-kurtosis gain`, never negative per term
    pub normality_improvement: f64,
    /// Quality score of the processed values
    pub quality_score: f64,
    /// `min(100, 2 * max(0, outlier_reduction) + max(0, variance_reduction) / 2)`
    pub quality_improvement: f64,
    pub concerns: Vec<TreatmentConcern>,
    pub readiness: Readiness,
    /// No concerns and a quality score above 50
    pub is_valid: bool,
}

/// Compare a sample before and after treatment
pub fn validate_treatment(original: &[f64], processed: &[f64]) -> TreatmentValidation {
    let before = TreatmentStats::from_values(original);
    let after = TreatmentStats::from_values(processed);

    let outlier_reduction = before.outlier_percentage - after.outlier_percentage;
    let variance_reduction = if before.std_dev > 0.0 {
        (before.std_dev - after.std_dev) / before.std_dev * 100.0
    } else {
        0.0
    };
    let normality_improvement = (before.skewness.abs() - after.skewness.abs()).max(0.0) * 30.0
        + (before.kurtosis.abs() - after.kurtosis.abs()).max(0.0) * 20.0;
    let quality_score = after.quality_score(processed);
    let quality_improvement =
        (outlier_reduction.max(0.0) * 2.0 + variance_reduction.max(0.0) / 2.0).min(100.0);

    let mut concerns = Vec::new();
    if (after.count as f64) < before.count as f64 * MIN_RETAINED_RATIO {
        concerns.push(TreatmentConcern::ExcessiveRemoval {
            removed: before.count.saturating_sub(after.count),
            original: before.count,
        });
    }
    if after.std_dev < before.std_dev * MIN_RETAINED_SPREAD {
        concerns.push(TreatmentConcern::OverSmoothed {
            original_std_dev: before.std_dev,
            processed_std_dev: after.std_dev,
        });
    }
    if after.count < MIN_RELIABLE_POINTS {
        concerns.push(TreatmentConcern::InsufficientHistory {
            points: after.count,
            minimum: MIN_RELIABLE_POINTS,
        });
    }

    let readiness = if quality_score > 80.0 {
        Readiness::Ready
    } else if quality_score > 60.0 {
        Readiness::Acceptable
    } else {
        Readiness::NeedsWork
    };

    TreatmentValidation {
        original: before,
        processed: after,
        outlier_reduction,
        variance_reduction,
        normality_improvement,
        quality_score,
        quality_improvement,
        is_valid: concerns.is_empty() && quality_score > 50.0,
        concerns,
        readiness,
    }
}
