//! Descriptive statistics, distribution shape and data quality
//!
//! Everything here works on plain `&[f64]` samples and never fails on finite
//! input; ill-conditioned samples (too short, zero variance) fall back to
//! neutral values instead.

mod descriptive;
mod distribution;
mod quality;

pub use descriptive::{
    calculate_statistical_summary, coefficient_of_variation, mean, mean_confidence_intervals,
    median, mode, percentile, percentile_sorted, quartiles, sample_std_dev, std_dev, variance,
    ConfidenceInterval, DescriptiveStats, DistributionShape, Quartiles, StatisticalSummary,
    CONFIDENCE_LEVELS,
};
pub use distribution::{
    kurtosis, normal_cdf, normal_quantile_two_sided, normality, skewness, NormalityTest,
    NORMALITY_ALPHA,
};
pub use quality::{assess_quality, DataQualityIssue, DataQualityReport, MIN_RELIABLE_POINTS};

pub(crate) use descriptive::sorted_copy;
pub(crate) use quality::{distribution_score, outlier_percentage};
