//! Descriptive statistics: location, spread, percentiles and mode

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::statistics::distribution::{kurtosis, normal_quantile_two_sided, normality, skewness, NormalityTest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Confidence levels reported for the mean
pub const CONFIDENCE_LEVELS: [f64; 3] = [0.90, 0.95, 0.99];

/// First, second and third quartile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Location and spread of a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub median: f64,
    /// Most frequent values, ascending; empty when every value is unique
    pub mode: Vec<f64>,
    /// Population standard deviation
    pub std_dev: f64,
    /// Population variance
    pub variance: f64,
    pub quartiles: Quartiles,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Shape of a sample's distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionShape {
    pub skewness: f64,
    /// Excess kurtosis (0 for a normal distribution)
    pub kurtosis: f64,
    pub normality: NormalityTest,
}

/// Normal-approximation interval for the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Descriptive block plus distribution block for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub descriptive: DescriptiveStats,
    pub distribution: DistributionShape,
    pub confidence_intervals: Vec<ConfidenceInterval>,
}

impl StatisticalSummary {
    /// Coefficient of variation (std dev relative to the mean, 0 when the mean is 0)
    pub fn coefficient_of_variation(&self) -> f64 {
        coefficient_of_variation(self.descriptive.mean, self.descriptive.std_dev)
    }
}

/// Summarize a sample
///
/// Fails only for an empty sample or one containing NaN/infinite values.
pub fn calculate_statistical_summary(data: &[f64]) -> AnalyticsResult<StatisticalSummary> {
    if data.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "Cannot summarize an empty dataset".to_string(),
        ));
    }
    if let Some(index) = data.iter().position(|v| !v.is_finite()) {
        return Err(AnalyticsError::InvalidInput(format!(
            "Non-finite value at index {}",
            index
        )));
    }

    let sorted = sorted_copy(data);
    let count = data.len();
    let mean = mean(data);
    let variance = variance(data);
    let std_dev = variance.sqrt();

    let quartiles = Quartiles {
        q1: percentile_sorted(&sorted, 25.0),
        q2: percentile_sorted(&sorted, 50.0),
        q3: percentile_sorted(&sorted, 75.0),
    };

    let descriptive = DescriptiveStats {
        mean,
        median: quartiles.q2,
        mode: mode(data),
        std_dev,
        variance,
        quartiles,
        min: sorted[0],
        max: sorted[count - 1],
        count,
    };

    let distribution = DistributionShape {
        skewness: skewness(data),
        kurtosis: kurtosis(data),
        normality: normality(data),
    };

    Ok(StatisticalSummary {
        descriptive,
        distribution,
        confidence_intervals: mean_confidence_intervals(data),
    })
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population variance
pub fn variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample (n - 1) standard deviation, 0 below two points
pub fn sample_std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let ss = data.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    (ss / (data.len() - 1) as f64).sqrt()
}

pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> f64 {
    if mean == 0.0 {
        0.0
    } else {
        std_dev / mean
    }
}

/// Percentile of unsorted data, linear interpolation between order statistics
pub fn percentile(data: &[f64], percentile_value: f64) -> f64 {
    percentile_sorted(&sorted_copy(data), percentile_value)
}

/// Percentile of already sorted data
pub fn percentile_sorted(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let index = (percentile.clamp(0.0, 100.0) / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

pub fn median(data: &[f64]) -> f64 {
    percentile(data, 50.0)
}

pub fn quartiles(data: &[f64]) -> Quartiles {
    let sorted = sorted_copy(data);
    Quartiles {
        q1: percentile_sorted(&sorted, 25.0),
        q2: percentile_sorted(&sorted, 50.0),
        q3: percentile_sorted(&sorted, 75.0),
    }
}

/// Every value sharing the highest frequency, ascending
///
/// Values are compared exactly. Returns an empty vector when no value repeats.
pub fn mode(data: &[f64]) -> Vec<f64> {
    let mut frequency: HashMap<u64, (f64, usize)> = HashMap::new();

    for &value in data {
        // -0.0 and 0.0 count as the same value
        let value = if value == 0.0 { 0.0 } else { value };
        frequency.entry(value.to_bits()).or_insert((value, 0)).1 += 1;
    }

    let max_frequency = frequency.values().map(|(_, count)| *count).max().unwrap_or(0);
    if max_frequency <= 1 {
        return Vec::new();
    }

    let mut modes: Vec<f64> = frequency
        .into_values()
        .filter(|(_, count)| *count == max_frequency)
        .map(|(value, _)| value)
        .collect();
    modes.sort_by(|a, b| a.total_cmp(b));
    modes
}

/// Intervals for the mean at each of [`CONFIDENCE_LEVELS`]
pub fn mean_confidence_intervals(data: &[f64]) -> Vec<ConfidenceInterval> {
    let m = mean(data);
    let standard_error = if data.is_empty() {
        0.0
    } else {
        sample_std_dev(data) / (data.len() as f64).sqrt()
    };

    CONFIDENCE_LEVELS
        .iter()
        .map(|&level| {
            let margin = normal_quantile_two_sided(level) * standard_error;
            ConfidenceInterval {
                level,
                lower: m - margin,
                upper: m + margin,
            }
        })
        .collect()
}

pub(crate) fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
