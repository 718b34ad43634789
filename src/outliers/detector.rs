//! IQR, Z-score and MAD outlier detection

use crate::statistics::{mean, percentile_sorted, sorted_copy, std_dev};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Scale floor so constant samples never divide by zero
pub const SCALE_EPSILON: f64 = 1e-9;

/// Consistency constant relating MAD to the standard deviation of a normal
pub const MAD_CONSISTENCY: f64 = 0.6745;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutlierMethod {
    /// Tukey fences around the interquartile range
    #[default]
    Iqr,
    /// Distance from the mean in population standard deviations
    ZScore,
    /// Modified z-score around the median
    Mad,
}

/// How eagerly values are flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

/// Thresholds for every method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierParams {
    /// Fence distance in IQRs
    pub iqr_multiplier: f64,
    /// Absolute z-score above which a value is flagged
    pub zscore_threshold: f64,
    /// Absolute modified z-score above which a value is flagged
    pub mad_threshold: f64,
}

impl Default for OutlierParams {
    fn default() -> Self {
        Self::from_sensitivity(Sensitivity::Medium)
    }
}

impl OutlierParams {
    /// Preset thresholds; the MAD cut-off stays at 3.5 for every level
    pub fn from_sensitivity(sensitivity: Sensitivity) -> Self {
        let (iqr_multiplier, zscore_threshold) = match sensitivity {
            Sensitivity::Low => (3.0, 3.5),
            Sensitivity::Medium => (1.5, 3.0),
            Sensitivity::High => (1.0, 2.5),
        };

        Self {
            iqr_multiplier,
            zscore_threshold,
            mad_threshold: 3.5,
        }
    }

    /// Threshold applied by `method`, in that method's score units
    pub fn score_threshold(&self, method: OutlierMethod) -> f64 {
        match method {
            OutlierMethod::Iqr => self.iqr_multiplier,
            OutlierMethod::ZScore => self.zscore_threshold,
            OutlierMethod::Mad => self.mad_threshold,
        }
    }
}

/// Value range outside which points are flagged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierThresholds {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierThresholds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// How far `value` lies beyond the bound it violates, 0 inside the range
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower - value
        } else if value > self.upper {
            value - self.upper
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierResult {
    pub method: OutlierMethod,
    /// Positions of flagged values in the input, ascending
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    /// Flagging range in value units; `None` for empty input
    pub thresholds: Option<OutlierThresholds>,
    pub score_threshold: f64,
}

impl OutlierResult {
    pub fn count(&self) -> usize {
        self.indices.len()
    }
}

/// Flag outliers in `data` with `method`
///
/// IQR flags values outside the Tukey fences. Z-score and MAD flag values whose
/// absolute score exceeds the threshold; their `thresholds` are the equivalent
/// value range, reported for display.
pub fn detect(method: OutlierMethod, data: &[f64], params: &OutlierParams) -> OutlierResult {
    let score_threshold = params.score_threshold(method);
    let thresholds = fences(method, data, params);

    let flagged: Vec<bool> = match (method, thresholds) {
        (_, None) => Vec::new(),
        (OutlierMethod::Iqr, Some(range)) => data.iter().map(|&v| !range.contains(v)).collect(),
        (OutlierMethod::ZScore, Some(_)) => z_scores(data)
            .iter()
            .map(|z| z.abs() > score_threshold)
            .collect(),
        (OutlierMethod::Mad, Some(_)) => modified_z_scores(data)
            .iter()
            .map(|z| z.abs() > score_threshold)
            .collect(),
    };

    let (indices, values) = data
        .iter()
        .zip(&flagged)
        .enumerate()
        .filter(|(_, (_, is_outlier))| **is_outlier)
        .map(|(i, (&v, _))| (i, v))
        .unzip();

    OutlierResult {
        method,
        indices,
        values,
        thresholds,
        score_threshold,
    }
}

/// Value-unit range for `method`
///
/// `|z| > t` around the mean and `|0.6745 (x - median) / MAD| > t` around the
/// median both reduce to a symmetric interval, so every method is answered
/// with a lower and upper bound. Score-based methods may disagree with their
/// interval by rounding at the exact boundary; [`detect`] follows the score.
pub fn fences(method: OutlierMethod, data: &[f64], params: &OutlierParams) -> Option<OutlierThresholds> {
    if data.is_empty() {
        return None;
    }

    let thresholds = match method {
        OutlierMethod::Iqr => {
            let sorted = sorted_copy(data);
            let q1 = percentile_sorted(&sorted, 25.0);
            let q3 = percentile_sorted(&sorted, 75.0);
            let reach = params.iqr_multiplier * (q3 - q1);
            OutlierThresholds {
                lower: q1 - reach,
                upper: q3 + reach,
            }
        }
        OutlierMethod::ZScore => {
            let center = mean(data);
            let reach = params.zscore_threshold * floored(std_dev(data));
            OutlierThresholds {
                lower: center - reach,
                upper: center + reach,
            }
        }
        OutlierMethod::Mad => {
            let (center, mad) = median_absolute_deviation(data);
            let reach = params.mad_threshold * floored(mad) / MAD_CONSISTENCY;
            OutlierThresholds {
                lower: center - reach,
                upper: center + reach,
            }
        }
    };

    Some(thresholds)
}

/// Z-score of every value against the population mean and deviation
pub fn z_scores(data: &[f64]) -> Vec<f64> {
    let center = mean(data);
    let scale = floored(std_dev(data));
    data.iter().map(|v| (v - center) / scale).collect()
}

/// Modified z-score `0.6745 (x - median) / MAD` of every value
pub fn modified_z_scores(data: &[f64]) -> Vec<f64> {
    let (center, mad) = median_absolute_deviation(data);
    let mad = floored(mad);
    data.iter().map(|v| MAD_CONSISTENCY * (v - center) / mad).collect()
}

/// Median and median absolute deviation
pub(crate) fn median_absolute_deviation(data: &[f64]) -> (f64, f64) {
    let center = percentile_sorted(&sorted_copy(data), 50.0);
    let deviations: Vec<f64> = data.iter().map(|v| (v - center).abs()).collect();
    let mad = percentile_sorted(&sorted_copy(&deviations), 50.0);
    (center, mad)
}

pub(crate) fn floored(scale: f64) -> f64 {
    scale.max(SCALE_EPSILON)
}
