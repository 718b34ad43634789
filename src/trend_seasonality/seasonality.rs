//! Autocorrelation-based seasonality detection

use crate::statistics::mean;
use serde::{Deserialize, Serialize};

/// Weekly, bi-weekly, monthly, bi-monthly and quarterly cycles for daily data
pub const DEFAULT_CANDIDATE_PERIODS: [usize; 5] = [7, 14, 30, 60, 90];

/// One candidate period whose autocorrelation qualified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPeriod {
    pub period: usize,
    /// Autocorrelation at this lag
    pub strength: f64,
    /// Mean pairwise correlation between complete cycles
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityAnalysis {
    pub detected: bool,
    pub dominant_period: Option<usize>,
    /// Strength of the dominant period, 0 when nothing was detected
    pub strength: f64,
    /// Qualifying periods, strongest first
    pub periods: Vec<SeasonalPeriod>,
}

/// Candidate periods and thresholds for seasonality detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityOptions {
    pub candidate_periods: Vec<usize>,

    /// Autocorrelation a period needs to be listed
    pub min_autocorrelation: f64,

    /// Autocorrelation the strongest period needs for `detected`
    pub detection_threshold: f64,
}

impl Default for SeasonalityOptions {
    fn default() -> Self {
        Self {
            candidate_periods: DEFAULT_CANDIDATE_PERIODS.to_vec(),
            min_autocorrelation: 0.2,
            detection_threshold: 0.3,
        }
    }
}

/// Detect seasonality with the default candidate periods
pub fn analyze_seasonality(values: &[f64]) -> SeasonalityAnalysis {
    analyze_seasonality_with(values, &SeasonalityOptions::default())
}

/// Test each candidate period shorter than half the series
pub fn analyze_seasonality_with(values: &[f64], options: &SeasonalityOptions) -> SeasonalityAnalysis {
    let n = values.len();

    let mut periods: Vec<SeasonalPeriod> = options
        .candidate_periods
        .iter()
        .filter(|&&period| period > 0 && period * 2 < n)
        .filter_map(|&period| {
            let strength = autocorrelation(values, period);
            (strength > options.min_autocorrelation).then(|| SeasonalPeriod {
                period,
                strength,
                confidence: cycle_confidence(values, period),
            })
        })
        .collect();

    periods.sort_by(|a, b| b.strength.total_cmp(&a.strength));

    let dominant = periods
        .first()
        .filter(|p| p.strength > options.detection_threshold);

    SeasonalityAnalysis {
        detected: dominant.is_some(),
        dominant_period: dominant.map(|p| p.period),
        strength: dominant.map_or(0.0, |p| p.strength),
        periods,
    }
}

/// Sample autocorrelation at `lag`, 0 when undefined
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if lag == 0 || lag >= n {
        return 0.0;
    }

    let m = mean(values);

    let numerator: f64 = values
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - m) * (b - m))
        .sum();
    let denominator: f64 = values.iter().map(|v| (v - m).powi(2)).sum();

    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Pearson correlation over the common prefix of two samples
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut numerator = 0.0;
    let mut sum_x_sq = 0.0;
    let mut sum_y_sq = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_x_sq += dx * dx;
        sum_y_sq += dy * dy;
    }

    let denominator = (sum_x_sq * sum_y_sq).sqrt();
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Mean pairwise correlation between the complete cycles of `period`
///
/// Needs at least two full cycles, otherwise 0.
pub fn cycle_confidence(values: &[f64], period: usize) -> f64 {
    if period == 0 {
        return 0.0;
    }
    let cycles: Vec<&[f64]> = values.chunks_exact(period).collect();
    if cycles.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut count = 0usize;
    for (i, first) in cycles.iter().enumerate() {
        for second in &cycles[i + 1..] {
            total += pearson_correlation(first, second);
            count += 1;
        }
    }

    total / count as f64
}
