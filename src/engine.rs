//! Analytics pipeline over the individual components

use crate::capacity_planning::{
    CapacityPlan, CapacityPlanner, IntervalStaffing, PlanRequest, TrafficAssumptions,
};
use crate::config::Config;
use crate::error::AnalyticsResult;
use crate::models::TimeSeries;
use crate::outliers::{analyze_outliers_with, OutlierReport};
use crate::statistics::{
    assess_quality, calculate_statistical_summary, DataQualityReport, StatisticalSummary,
};
use crate::trend_seasonality::{
    analyze_seasonality_with, analyze_trend_with, SeasonalityAnalysis, TrendAnalysis,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Full characterization of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub name: String,
    pub quality: DataQualityReport,
    pub summary: StatisticalSummary,
    pub trend: TrendAnalysis,
    pub seasonality: SeasonalityAnalysis,
    pub outliers: OutlierReport,
}

/// Main analytics engine
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    config: Config,
    planner: CapacityPlanner,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new(config: Config) -> Self {
        let planner = CapacityPlanner::new(config.planner_config());
        Self { config, planner }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// Create from [`Config::load`]
    pub fn from_env() -> AnalyticsResult<Self> {
        Ok(Self::new(Config::load()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn planner(&self) -> &CapacityPlanner {
        &self.planner
    }

    /// Statistics, trend, seasonality, outliers and data quality of a series
    ///
    /// Fails for an empty series or one containing non-finite values.
    pub fn analyze_series(&self, series: &TimeSeries) -> AnalyticsResult<SeriesAnalysis> {
        let values = series.values();
        let quality = assess_quality(series.points());
        let summary = calculate_statistical_summary(&values)?;

        let trend = analyze_trend_with(&values, &self.config.trend_options());
        let seasonality = analyze_seasonality_with(&values, &self.config.seasonality_options());
        let outliers = analyze_outliers_with(
            self.config.outliers.method,
            &values,
            &self.config.outlier_params(),
        );

        debug!(
            series = %series.name,
            points = values.len(),
            trend = %trend.direction,
            seasonal = seasonality.detected,
            outliers = outliers.outlier_count,
            quality = quality.score,
            "Series analyzed"
        );

        Ok(SeriesAnalysis {
            name: series.name.clone(),
            quality,
            summary,
            trend,
            seasonality,
            outliers,
        })
    }

    /// Analyze independent series in parallel, preserving input order
    pub fn analyze_many(&self, series: &[TimeSeries]) -> Vec<AnalyticsResult<SeriesAnalysis>> {
        info!(series = series.len(), "Analyzing series batch");
        series.par_iter().map(|s| self.analyze_series(s)).collect()
    }

    pub fn plan_capacity(&self, request: &PlanRequest) -> AnalyticsResult<CapacityPlan> {
        self.planner.plan(request)
    }

    /// Plan independent lines of business in parallel, preserving input order
    pub fn plan_many(&self, requests: &[PlanRequest]) -> Vec<AnalyticsResult<CapacityPlan>> {
        info!(requests = requests.len(), "Planning capacity batch");
        self.planner.plan_many(requests)
    }

    pub fn size_interval(&self, assumptions: &TrafficAssumptions) -> IntervalStaffing {
        self.planner.size_interval(assumptions)
    }
}
