//! Integration tests for outlier detection and severity grading

mod common;

use common::assert_close;
use std::str::FromStr;
use wfm_analytics::outliers::*;

/// 99, 100, 101 repeated ten times, then a spike at index 30
fn spiked() -> Vec<f64> {
    let mut data: Vec<f64> = (0..30).map(|i| 99.0 + (i % 3) as f64).collect();
    data.push(160.0);
    data
}

#[test]
fn test_iqr_flags_single_spike() {
    let result = detect(OutlierMethod::Iqr, &[10.0, 10.0, 10.0, 10.0, 1000.0], &OutlierParams::default());

    assert_eq!(result.indices, vec![4]);
    assert_eq!(result.values, vec![1000.0]);
    assert_eq!(result.score_threshold, 1.5);
    let thresholds = result.thresholds.unwrap();
    assert_eq!((thresholds.lower, thresholds.upper), (10.0, 10.0));
}

#[test]
fn test_clean_data_has_no_outliers() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    for method in [OutlierMethod::Iqr, OutlierMethod::ZScore, OutlierMethod::Mad] {
        let result = detect(method, &data, &OutlierParams::default());
        assert_eq!(result.count(), 0, "{} flagged clean data", method);
    }
}

#[test]
fn test_every_method_finds_the_spike() {
    let data = spiked();
    for method in [OutlierMethod::Iqr, OutlierMethod::ZScore, OutlierMethod::Mad] {
        let result = detect(method, &data, &OutlierParams::default());
        assert_eq!(result.indices, vec![30], "{}", method);
    }
}

#[test]
fn test_empty_input() {
    let report = analyze_outliers(OutlierMethod::Mad, &[], Sensitivity::High);

    assert_eq!(report.total_points, 0);
    assert_eq!(report.outlier_count, 0);
    assert_eq!(report.outlier_percentage, 0.0);
    assert!(report.thresholds.is_none());
    assert_eq!(report.worst_severity(), None);
}

#[test]
fn test_sensitivity_widens_and_narrows_fences() {
    let data = spiked();
    let low = fences(OutlierMethod::Iqr, &data, &OutlierParams::from_sensitivity(Sensitivity::Low)).unwrap();
    let high = fences(OutlierMethod::Iqr, &data, &OutlierParams::from_sensitivity(Sensitivity::High)).unwrap();

    assert!(low.lower < high.lower);
    assert!(low.upper > high.upper);
    assert_eq!(OutlierParams::from_sensitivity(Sensitivity::Low).mad_threshold, 3.5);
    assert_eq!(OutlierParams::from_sensitivity(Sensitivity::High).mad_threshold, 3.5);
}

#[test]
fn test_report_grades_severity() {
    let data = spiked();
    let report = analyze_outliers(OutlierMethod::ZScore, &data, Sensitivity::Medium);

    assert_eq!(report.total_points, 31);
    assert_eq!(report.outlier_count, 1);
    assert_close(report.outlier_percentage, 100.0 / 31.0, 1e-9);

    let point = report.points[0];
    assert_eq!(point.index, 30);
    assert!(point.z_score > 4.0);
    assert!(point.distance > 0.0);
    assert_eq!(point.severity, OutlierSeverity::Critical);
    assert_eq!(report.breakdown.critical, 1);
    assert_eq!(report.worst_severity(), Some(OutlierSeverity::Critical));
}

#[test]
fn test_severity_ladder() {
    assert_eq!(OutlierSeverity::classify(1.0, 0.5, 1.0), OutlierSeverity::Low);
    assert_eq!(OutlierSeverity::classify(2.5, 0.0, 1.0), OutlierSeverity::Medium);
    assert_eq!(OutlierSeverity::classify(0.0, 2.5, 1.0), OutlierSeverity::High);
    assert_eq!(OutlierSeverity::classify(-4.5, 0.0, 1.0), OutlierSeverity::Critical);
    assert!(OutlierSeverity::Critical > OutlierSeverity::High);
}

#[test]
fn test_scores_and_names() {
    let modified = modified_z_scores(&spiked());
    assert_close(modified[30], MAD_CONSISTENCY * 60.0, 1e-9);
    assert_close(z_scores(&[1.0, 3.0])[1], 1.0, 1e-12);

    assert_eq!(OutlierMethod::from_str("zscore").unwrap(), OutlierMethod::ZScore);
    assert_eq!(OutlierMethod::Mad.to_string(), "mad");
    assert_eq!(serde_json::to_string(&Sensitivity::High).unwrap(), "\"high\"");
}

#[test]
fn test_treatments_of_detected_spike() {
    let data = spiked();
    let result = detect(OutlierMethod::Iqr, &data, &OutlierParams::default());
    assert_eq!(result.indices, vec![30]);

    let removed = treat_outliers(&data, &result, OutlierTreatment::Remove);
    assert_eq!(removed.values, data[..30].to_vec());
    assert_eq!(removed.records_removed, 1);

    let imputed = treat_outliers(&data, &result, OutlierTreatment::Impute { method: ImputationMethod::Linear });
    assert_eq!(imputed.values.len(), data.len());
    assert_eq!(imputed.values[30], data[29]);
    assert_eq!(imputed.records_modified, 1);

    let capped = treat_outliers(&data, &result, OutlierTreatment::Cap);
    assert_eq!(capped.values[30], result.thresholds.unwrap().upper);
    assert_eq!(capped.values[..30], data[..30]);
}

#[test]
fn test_cap_without_thresholds_is_a_no_op() {
    let result = detect(OutlierMethod::Iqr, &[], &OutlierParams::default());
    let treated = treat_outliers(&[], &result, OutlierTreatment::Cap);
    assert!(treated.values.is_empty());
    assert_eq!(treated.records_modified, 0);
}

#[test]
fn test_validation_reports_before_and_after() {
    let data = spiked();
    let result = detect(OutlierMethod::Iqr, &data, &OutlierParams::default());
    let capped = treat_outliers(&data, &result, OutlierTreatment::Cap);
    let validation = validate_treatment(&data, &capped.values);

    assert_eq!(validation.original.count, 31);
    assert_eq!(validation.original.outlier_count, 1);
    assert_eq!(validation.processed.outlier_count, 0);
    assert_eq!(validation.original.max, 160.0);
    assert_close(validation.outlier_reduction, 100.0 / 31.0, 1e-9);
    assert!(validation.variance_reduction > 50.0);
    assert!(validation.normality_improvement > 0.0);
    assert!(validation.quality_improvement > 0.0 && validation.quality_improvement <= 100.0);

    // Capping one extreme value out of 31 shrinks the spread far below half
    assert!(validation
        .concerns
        .iter()
        .any(|c| matches!(c, TreatmentConcern::OverSmoothed { .. })));
    assert!(!validation.is_valid);
}

#[test]
fn test_validation_of_mild_imputation_is_valid() {
    let data: Vec<f64> = (0..60).map(|i| 100.0 + ((i * 7) % 13) as f64).collect();
    let mut noisy = data.clone();
    noisy[20] = 108.0;
    let treated = impute_points(&noisy, &[20], ImputationMethod::Median);
    let validation = validate_treatment(&noisy, &treated.values);

    assert!(validation.concerns.is_empty());
    assert!(validation.quality_score > 50.0);
    assert!(validation.is_valid);
    assert_ne!(validation.readiness, Readiness::NeedsWork);
}

#[test]
fn test_treatment_serde_and_parsing() {
    let treatment: OutlierTreatment = serde_json::from_str(r#"{"kind":"impute","method":"median"}"#).unwrap();
    assert_eq!(treatment, OutlierTreatment::Impute { method: ImputationMethod::Median });
    assert_eq!(serde_json::to_string(&OutlierTreatment::Cap).unwrap(), r#"{"kind":"cap"}"#);

    assert_eq!(ImputationMethod::from_str("linear").unwrap(), ImputationMethod::Linear);
    assert_eq!(ImputationMethod::default(), ImputationMethod::Linear);
    assert_eq!(Readiness::NeedsWork.to_string(), "needs_work");
}
