//! Per-point severity and summary of a detection run

use crate::outliers::detector::{
    detect, floored, median_absolute_deviation, z_scores, OutlierMethod, OutlierParams,
    OutlierThresholds, Sensitivity, MAD_CONSISTENCY,
};
use crate::statistics::{quartiles, std_dev};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutlierSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OutlierSeverity {
    /// Classify by absolute z-score or by distance past the fence in units of `scale`
    pub fn classify(z_score: f64, distance: f64, scale: f64) -> Self {
        let z = z_score.abs();
        let normalized = distance / floored(scale);

        if z > 4.0 || normalized > 3.0 {
            OutlierSeverity::Critical
        } else if z > 3.0 || normalized > 2.0 {
            OutlierSeverity::High
        } else if z > 2.0 || normalized > 1.0 {
            OutlierSeverity::Medium
        } else {
            OutlierSeverity::Low
        }
    }
}

/// A flagged value with its severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierPoint {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
    /// Distance beyond the violated bound
    pub distance: f64,
    pub severity: OutlierSeverity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityBreakdown {
    fn record(&mut self, severity: OutlierSeverity) {
        match severity {
            OutlierSeverity::Low => self.low += 1,
            OutlierSeverity::Medium => self.medium += 1,
            OutlierSeverity::High => self.high += 1,
            OutlierSeverity::Critical => self.critical += 1,
        }
    }
}

/// Detection result enriched with severities and totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub method: OutlierMethod,
    pub points: Vec<OutlierPoint>,
    pub total_points: usize,
    pub outlier_count: usize,
    /// Share of points flagged, 0-100
    pub outlier_percentage: f64,
    pub breakdown: SeverityBreakdown,
    pub thresholds: Option<OutlierThresholds>,
    pub score_threshold: f64,
}

impl OutlierReport {
    /// Most severe level present, if any point was flagged
    pub fn worst_severity(&self) -> Option<OutlierSeverity> {
        self.points.iter().map(|p| p.severity).max()
    }
}

/// Detect with a sensitivity preset and grade every flagged point
pub fn analyze_outliers(method: OutlierMethod, data: &[f64], sensitivity: Sensitivity) -> OutlierReport {
    analyze_outliers_with(method, data, &OutlierParams::from_sensitivity(sensitivity))
}

/// Detect with explicit thresholds and grade every flagged point
///
/// Distances are scaled by the spread the method works in: the IQR for
/// [`OutlierMethod::Iqr`], the standard deviation for
/// [`OutlierMethod::ZScore`] and `MAD / 0.6745` for [`OutlierMethod::Mad`].
pub fn analyze_outliers_with(method: OutlierMethod, data: &[f64], params: &OutlierParams) -> OutlierReport {
    let result = detect(method, data, params);
    let scores = z_scores(data);
    let scale = spread(method, data);

    let mut breakdown = SeverityBreakdown::default();
    let points: Vec<OutlierPoint> = result
        .indices
        .iter()
        .zip(&result.values)
        .map(|(&index, &value)| {
            let distance = result.thresholds.map_or(0.0, |t| t.distance(value));
            let z_score = scores[index];
            let severity = OutlierSeverity::classify(z_score, distance, scale);
            breakdown.record(severity);

            OutlierPoint {
                index,
                value,
                z_score,
                distance,
                severity,
            }
        })
        .collect();

    let total_points = data.len();
    let outlier_count = points.len();
    let outlier_percentage = if total_points == 0 {
        0.0
    } else {
        outlier_count as f64 / total_points as f64 * 100.0
    };

    OutlierReport {
        method,
        points,
        total_points,
        outlier_count,
        outlier_percentage,
        breakdown,
        thresholds: result.thresholds,
        score_threshold: result.score_threshold,
    }
}

fn spread(method: OutlierMethod, data: &[f64]) -> f64 {
    match method {
        OutlierMethod::Iqr => quartiles(data).iqr(),
        OutlierMethod::ZScore => std_dev(data),
        OutlierMethod::Mad => median_absolute_deviation(data).1 / MAD_CONSISTENCY,
    }
}
