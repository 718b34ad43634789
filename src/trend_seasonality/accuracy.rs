//! Forecast error measures

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::statistics::mean;
use serde::{Deserialize, Serialize};

/// Error of a forecast against the observed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    /// Mean absolute error
    pub mae: f64,

    /// Root mean squared error
    pub rmse: f64,

    /// Mean absolute percentage error, skipping zero actuals; `None` when
    /// every actual is zero
    pub mape: Option<f64>,

    /// Mean absolute scaled error against the one-step naive forecast; `None`
    /// when the naive forecast is perfect or there is a single point
    pub mase: Option<f64>,

    /// Mean of `actual - predicted`; positive means the forecast runs low
    pub bias: f64,
}

/// Compare `predicted` to `actual` point by point
pub fn forecast_accuracy(actual: &[f64], predicted: &[f64]) -> AnalyticsResult<ForecastAccuracy> {
    if actual.len() != predicted.len() {
        return Err(AnalyticsError::InvalidInput(format!(
            "Actual and predicted lengths differ ({} vs {})",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "Need at least 1 data point to score a forecast".to_string(),
        ));
    }

    let errors: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| a - p).collect();
    let absolute: Vec<f64> = errors.iter().map(|e| e.abs()).collect();

    let mae = mean(&absolute);
    let rmse = mean(&errors.iter().map(|e| e * e).collect::<Vec<_>>()).sqrt();

    let percentage: Vec<f64> = actual
        .iter()
        .zip(&absolute)
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, e)| e / a.abs() * 100.0)
        .collect();
    let mape = (!percentage.is_empty()).then(|| mean(&percentage));

    let naive: Vec<f64> = actual.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let naive_mae = mean(&naive);
    let mase = (naive_mae > 0.0).then(|| mae / naive_mae);

    Ok(ForecastAccuracy {
        mae,
        rmse,
        mape,
        mase,
        bias: mean(&errors),
    })
}
