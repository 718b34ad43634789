//! Outlier detection
//!
//! [`detect`] flags values with one method and explicit thresholds;
//! [`analyze_outliers`] grades each flagged value by severity;
//! [`treat_outliers`] removes, imputes or caps them.
//!
//! ```
//! use wfm_analytics::outliers::{detect, OutlierMethod, OutlierParams};
//!
//! let result = detect(OutlierMethod::Iqr, &[10.0, 10.0, 10.0, 10.0, 1000.0], &OutlierParams::default());
//! assert_eq!(result.indices, vec![4]);
//! ```

mod detector;
mod severity;
mod treatment;

pub use detector::{
    detect, fences, modified_z_scores, z_scores, OutlierMethod, OutlierParams, OutlierResult,
    OutlierThresholds, Sensitivity, MAD_CONSISTENCY, SCALE_EPSILON,
};
pub use severity::{
    analyze_outliers, analyze_outliers_with, OutlierPoint, OutlierReport, OutlierSeverity,
    SeverityBreakdown,
};
pub use treatment::{
    cap_to_percentiles, cap_to_thresholds, impute_points, remove_points, treat_outliers,
    validate_treatment, ImputationMethod, OutlierTreatment, Readiness, TreatedSeries,
    TreatmentConcern, TreatmentStats, TreatmentValidation,
};
