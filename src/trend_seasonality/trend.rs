//! Linear trend and Mann-Kendall significance

use crate::statistics::{mean, normal_cdf};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Direction of the fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Verdict of the Mann-Kendall test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MannKendallTrend {
    Increasing,
    Decreasing,
    NoTrend,
}

/// Ordinary least squares fit of value against index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannKendallResult {
    /// S statistic: concordant minus discordant pairs
    pub s: i64,
    pub z: f64,
    pub tau: f64,
    pub p_value: f64,
    pub trend: MannKendallTrend,
}

/// Thresholds used to classify a trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendOptions {
    /// Slopes within this fraction of `|mean|` count as stable
    pub stable_slope_ratio: f64,

    /// Mann-Kendall p-value below which the trend is significant
    pub significance_level: f64,
}

impl Default for TrendOptions {
    fn default() -> Self {
        Self {
            stable_slope_ratio: 0.01,
            significance_level: 0.05,
        }
    }
}

/// Trend analysis results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,

    /// Slope relative to the mean level
    pub strength: f64,

    /// `r_squared * (1 - mann_kendall.p_value)`
    pub confidence: f64,

    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub mann_kendall: MannKendallResult,
}

impl TrendAnalysis {
    /// Extrapolate the fitted line to a (possibly future) index
    pub fn forecast(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }

    /// Both the regression and Mann-Kendall agree on a direction
    pub fn is_significant(&self) -> bool {
        matches!(
            (self.direction, self.mann_kendall.trend),
            (TrendDirection::Increasing, MannKendallTrend::Increasing)
                | (TrendDirection::Decreasing, MannKendallTrend::Decreasing)
        )
    }
}

/// Analyze the trend of evenly spaced values with default thresholds
pub fn analyze_trend(values: &[f64]) -> TrendAnalysis {
    analyze_trend_with(values, &TrendOptions::default())
}

pub fn analyze_trend_with(values: &[f64], options: &TrendOptions) -> TrendAnalysis {
    let fit = linear_regression(values);
    let mann_kendall = mann_kendall_test_with(values, options.significance_level);
    let level = mean(values);

    let direction = if fit.slope == 0.0 || fit.slope.abs() < level.abs() * options.stable_slope_ratio {
        TrendDirection::Stable
    } else if fit.slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let scale = if level == 0.0 { 1.0 } else { level.abs() };

    TrendAnalysis {
        direction,
        strength: fit.slope.abs() / scale,
        confidence: fit.r_squared * (1.0 - mann_kendall.p_value),
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared: fit.r_squared,
        mann_kendall,
    }
}

/// Least squares line through `(i, values[i])`
///
/// Fewer than two points give a flat line through the mean with `r_squared` 0.
pub fn linear_regression(values: &[f64]) -> LinearFit {
    let n = values.len();
    let mean_y = mean(values);
    if n < 2 {
        return LinearFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: 0.0,
        };
    }

    let mean_x = (n - 1) as f64 / 2.0;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x_diff = i as f64 - mean_x;
        numerator += x_diff * (y - mean_y);
        denominator += x_diff * x_diff;
    }

    let slope = numerator / denominator;
    let intercept = mean_y - slope * mean_x;

    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        ss_tot += (y - mean_y).powi(2);
        ss_res += (y - predicted).powi(2);
    }

    let r_squared = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    };

    LinearFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Mann-Kendall trend test at the 5% level
pub fn mann_kendall_test(values: &[f64]) -> MannKendallResult {
    mann_kendall_test_with(values, 0.05)
}

/// Mann-Kendall trend test with an explicit significance level
///
/// Uses the no-ties variance `n(n-1)(2n+5)/18`, a continuity correction of 1
/// and a two-tailed p-value.
pub fn mann_kendall_test_with(values: &[f64], significance_level: f64) -> MannKendallResult {
    let n = values.len();
    if n < 2 {
        return MannKendallResult {
            s: 0,
            z: 0.0,
            tau: 0.0,
            p_value: 1.0,
            trend: MannKendallTrend::NoTrend,
        };
    }

    let mut s: i64 = 0;
    for i in 0..n - 1 {
        for j in i + 1..n {
            let diff = values[j] - values[i];
            if diff > 0.0 {
                s += 1;
            } else if diff < 0.0 {
                s -= 1;
            }
        }
    }

    let nf = n as f64;
    let variance = nf * (nf - 1.0) * (2.0 * nf + 5.0) / 18.0;
    let z = match s {
        s if s > 0 => (s - 1) as f64 / variance.sqrt(),
        s if s < 0 => (s + 1) as f64 / variance.sqrt(),
        _ => 0.0,
    };

    let p_value = (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0);
    let tau = 2.0 * s as f64 / (nf * (nf - 1.0));

    let trend = if p_value < significance_level {
        if tau > 0.0 {
            MannKendallTrend::Increasing
        } else {
            MannKendallTrend::Decreasing
        }
    } else {
        MannKendallTrend::NoTrend
    };

    MannKendallResult {
        s,
        z,
        tau,
        p_value,
        trend,
    }
}
