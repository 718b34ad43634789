//! Trend, seasonality and forecast-accuracy analysis of evenly spaced series

mod accuracy;
mod seasonality;
mod trend;

pub use accuracy::{forecast_accuracy, ForecastAccuracy};
pub use seasonality::{
    analyze_seasonality, analyze_seasonality_with, autocorrelation, cycle_confidence,
    pearson_correlation, SeasonalPeriod, SeasonalityAnalysis, SeasonalityOptions,
    DEFAULT_CANDIDATE_PERIODS,
};
pub use trend::{
    analyze_trend, analyze_trend_with, linear_regression, mann_kendall_test,
    mann_kendall_test_with, LinearFit, MannKendallResult, MannKendallTrend, TrendAnalysis,
    TrendDirection, TrendOptions,
};
