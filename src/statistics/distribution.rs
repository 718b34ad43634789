//! Distribution shape: skewness, kurtosis and a normality check

use crate::statistics::descriptive::{mean, sample_std_dev, sorted_copy, std_dev};
use serde::{Deserialize, Serialize};

/// Standard deviations below this are treated as zero
const VARIANCE_EPSILON: f64 = 1e-12;

/// p-value above which a sample is reported as normal
pub const NORMALITY_ALPHA: f64 = 0.05;

/// Result of the simplified Anderson-Darling style normality check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityTest {
    pub statistic: f64,
    pub p_value: f64,
    pub is_normal: bool,
}

/// Bias-corrected sample skewness, 0 below three points or without variance
///
/// Deviations are standardized by the sample (n - 1) standard deviation, so
/// results run slightly below formulas that divide by the population one.
pub fn skewness(data: &[f64]) -> f64 {
    let n = data.len();
    let s = sample_std_dev(data);
    if n < 3 || s < VARIANCE_EPSILON {
        return 0.0;
    }

    let m = mean(data);
    let n = n as f64;
    let sum: f64 = data.iter().map(|x| ((x - m) / s).powi(3)).sum();

    (n / ((n - 1.0) * (n - 2.0))) * sum
}

/// Bias-corrected excess kurtosis, 0 below four points or without variance
///
/// Standardized by the sample standard deviation, like [`skewness`].
pub fn kurtosis(data: &[f64]) -> f64 {
    let n = data.len();
    let s = sample_std_dev(data);
    if n < 4 || s < VARIANCE_EPSILON {
        return 0.0;
    }

    let m = mean(data);
    let n = n as f64;
    let sum: f64 = data.iter().map(|x| ((x - m) / s).powi(4)).sum();

    let scaled = (n * (n + 1.0)) / ((n - 1.0) * (n - 2.0) * (n - 3.0)) * sum;
    let correction = (3.0 * (n - 1.0).powi(2)) / ((n - 2.0) * (n - 3.0));

    scaled - correction
}

/// Compare standardized order statistics against the normal CDF
///
/// Statistic is `sum((Phi(z_i) - (i + 0.5)/n)^2) / n`, its p-value is
/// approximated as `exp(-10 * n * statistic)`. Fewer than three points are
/// reported as normal.
pub fn normality(data: &[f64]) -> NormalityTest {
    let n = data.len();
    if n < 3 {
        return NormalityTest {
            statistic: 0.0,
            p_value: 1.0,
            is_normal: true,
        };
    }

    let m = mean(data);
    let sd = std_dev(data);
    let scale = if sd < VARIANCE_EPSILON { 1.0 } else { sd };

    let standardized: Vec<f64> = data.iter().map(|v| (v - m) / scale).collect();
    let sorted = sorted_copy(&standardized);

    let nf = n as f64;
    let mut statistic = 0.0;
    for (i, &z) in sorted.iter().enumerate() {
        let phi = normal_cdf(z);
        if phi > 0.0 && phi < 1.0 {
            statistic += (phi - (i as f64 + 0.5) / nf).powi(2);
        }
    }
    statistic /= nf;

    let p_value = (-statistic * nf * 10.0).exp();

    NormalityTest {
        statistic,
        p_value,
        is_normal: p_value > NORMALITY_ALPHA,
    }
}

/// Standard normal CDF (Abramowitz & Stegun 26.2.17)
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let prob = d
        * t
        * (0.3193815
            + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));

    if x > 0.0 {
        1.0 - prob
    } else {
        prob
    }
}

/// z such that `P(|Z| <= z) = level` (Abramowitz & Stegun 26.2.23)
pub fn normal_quantile_two_sided(level: f64) -> f64 {
    if level <= 0.0 {
        return 0.0;
    }
    let tail = ((1.0 - level) / 2.0).max(f64::MIN_POSITIVE);

    let t = (-2.0 * tail.ln()).sqrt();
    let numerator = 2.515517 + 0.802853 * t + 0.010328 * t * t;
    let denominator = 1.0 + 1.432788 * t + 0.189269 * t * t + 0.001308 * t * t * t;

    t - numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_cdf() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-4);
    }

    #[test]
    fn test_normal_cdf_zero_uses_lower_tail() {
        let at_zero = normal_cdf(0.0);
        assert!(at_zero < 0.5);
        assert!(at_zero > 0.5 - 1e-6);
        assert!(normal_cdf(1e-12) > 0.5);
    }

    #[test]
    fn test_skewness_uses_sample_deviation() {
        let data = [1.0_f64, 2.0, 10.0];
        let m = 13.0 / 3.0;
        let s = (data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / 2.0).sqrt();
        let expected = 1.5 * data.iter().map(|x| ((x - m) / s).powi(3)).sum::<f64>();

        assert!((skewness(&data) - expected).abs() < 1e-12);
        assert!((skewness(&data) - 1.6524).abs() < 1e-3);
    }

    #[test]
    fn test_two_sided_quantiles() {
        assert!((normal_quantile_two_sided(0.95) - 1.96).abs() < 1e-3);
        assert!((normal_quantile_two_sided(0.90) - 1.645).abs() < 1e-3);
        assert!((normal_quantile_two_sided(0.99) - 2.576).abs() < 1e-3);
    }

    #[test]
    fn test_symmetric_data_has_no_skew() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert!(skewness(&data).abs() < 1e-12);
    }

    #[test]
    fn test_right_tail_is_positive_skew() {
        let data = vec![1.0, 1.0, 2.0, 2.0, 3.0, 10.0];
        assert!(skewness(&data) > 1.0);
    }

    #[test]
    fn test_kurtosis_of_uniform_is_negative() {
        let data: Vec<f64> = (0..100).map(|x| x as f64).collect();
        // Uniform excess kurtosis is -1.2
        assert!((kurtosis(&data) + 1.2).abs() < 0.05);
    }

    #[test]
    fn test_constant_data() {
        let data = vec![4.0; 10];
        assert_eq!(skewness(&data), 0.0);
        assert_eq!(kurtosis(&data), 0.0);
        let test = normality(&data);
        assert!(test.statistic.is_finite());
    }

    #[test]
    fn test_small_sample_is_normal() {
        let test = normality(&[1.0, 100.0]);
        assert!(test.is_normal);
        assert_eq!(test.p_value, 1.0);
    }
}
