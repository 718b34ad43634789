use crate::capacity_planning::{PlannerConfig, PlanningParameters, DEFAULT_INTERVAL_HOURS};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::outliers::{OutlierMethod, OutlierParams};
use crate::service_level::DEFAULT_AGENT_SEARCH_LIMIT;
use crate::trend_seasonality::{SeasonalityOptions, TrendOptions, DEFAULT_CANDIDATE_PERIODS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming an optional override file
pub const CONFIG_PATH_ENV: &str = "WFM_CONFIG_PATH";

/// Prefix of environment overrides, e.g. `WFM__SOLVER__AGENT_SEARCH_LIMIT`
pub const ENV_PREFIX: &str = "WFM";

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Agent search configuration
    #[serde(default)]
    pub solver: SolverConfig,

    /// Capacity planning configuration
    #[serde(default)]
    pub planning: PlanningConfig,

    /// Trend classification configuration
    #[serde(default)]
    pub trend: TrendConfig,

    /// Seasonality detection configuration
    #[serde(default)]
    pub seasonality: SeasonalityConfig,

    /// Outlier detection configuration
    #[serde(default)]
    pub outliers: OutlierConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, the file named by
    /// `WFM_CONFIG_PATH` (if any) and `WFM__` environment variables
    pub fn load() -> AnalyticsResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        // Override with config file if one is named
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(&path).required(false));
        }

        let config: Config = builder
            // Override with environment variables (prefix: WFM__)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("seasonality.candidate_periods")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load the embedded defaults overridden by one TOML file
    pub fn load_from(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections and keys take their defaults
    pub fn from_toml_str(document: &str) -> AnalyticsResult<Self> {
        let config: Config = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting, reporting all problems together
    pub fn validate(&self) -> AnalyticsResult<()> {
        let mut problems = Vec::new();

        if self.solver.agent_search_limit == 0 {
            problems.push("solver.agent_search_limit must be greater than 0".to_string());
        }
        if !(self.planning.interval_hours > 0.0) {
            problems.push("planning.interval_hours must be greater than 0".to_string());
        }
        if !(self.planning.hours_per_week > 0.0) {
            problems.push("planning.hours_per_week must be greater than 0".to_string());
        }
        if !(self.trend.stable_slope_ratio >= 0.0) {
            problems.push("trend.stable_slope_ratio must not be negative".to_string());
        }
        if !(self.trend.significance_level > 0.0 && self.trend.significance_level < 1.0) {
            problems.push("trend.significance_level must be between 0 and 1".to_string());
        }
        if self.seasonality.candidate_periods.is_empty()
            || self.seasonality.candidate_periods.contains(&0)
        {
            problems.push("seasonality.candidate_periods must be non-empty and positive".to_string());
        }
        for (name, value) in [
            ("seasonality.min_autocorrelation", self.seasonality.min_autocorrelation),
            ("seasonality.detection_threshold", self.seasonality.detection_threshold),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                problems.push(format!("{} must be between -1 and 1", name));
            }
        }
        for (name, value) in [
            ("outliers.iqr_multiplier", self.outliers.iqr_multiplier),
            ("outliers.zscore_threshold", self.outliers.zscore_threshold),
            ("outliers.mad_threshold", self.outliers.mad_threshold),
        ] {
            if !(value > 0.0) {
                problems.push(format!("{} must be greater than 0", name));
            }
        }
        if self.observability.log_level.trim().is_empty() {
            problems.push("observability.log_level must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AnalyticsError::Configuration(problems.join("; ")))
        }
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            interval_hours: self.planning.interval_hours,
            agent_search_limit: self.solver.agent_search_limit,
        }
    }

    pub fn trend_options(&self) -> TrendOptions {
        TrendOptions {
            stable_slope_ratio: self.trend.stable_slope_ratio,
            significance_level: self.trend.significance_level,
        }
    }

    pub fn seasonality_options(&self) -> SeasonalityOptions {
        SeasonalityOptions {
            candidate_periods: self.seasonality.candidate_periods.clone(),
            min_autocorrelation: self.seasonality.min_autocorrelation,
            detection_threshold: self.seasonality.detection_threshold,
        }
    }

    pub fn outlier_params(&self) -> OutlierParams {
        OutlierParams {
            iqr_multiplier: self.outliers.iqr_multiplier,
            zscore_threshold: self.outliers.zscore_threshold,
            mad_threshold: self.outliers.mad_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Agents searched past `ceil(traffic)` before giving up
    #[serde(default = "default_agent_search_limit")]
    pub agent_search_limit: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            agent_search_limit: default_agent_search_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Staffing interval length in hours
    #[serde(default = "default_interval_hours")]
    pub interval_hours: f64,

    /// Paid hours per agent per week
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
            hours_per_week: default_hours_per_week(),
        }
    }
}

impl PlanningConfig {
    /// Default planning parameters with the configured working week
    pub fn default_parameters(&self) -> PlanningParameters {
        PlanningParameters {
            hours_per_week: self.hours_per_week,
            ..PlanningParameters::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_stable_slope_ratio")]
    pub stable_slope_ratio: f64,

    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_slope_ratio: default_stable_slope_ratio(),
            significance_level: default_significance_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityConfig {
    #[serde(default = "default_candidate_periods")]
    pub candidate_periods: Vec<usize>,

    #[serde(default = "default_min_autocorrelation")]
    pub min_autocorrelation: f64,

    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f64,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            candidate_periods: default_candidate_periods(),
            min_autocorrelation: default_min_autocorrelation(),
            detection_threshold: default_detection_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// Method used by the engine's series analysis
    #[serde(default)]
    pub method: OutlierMethod,

    #[serde(default = "default_iqr_multiplier")]
    pub iqr_multiplier: f64,

    #[serde(default = "default_zscore_threshold")]
    pub zscore_threshold: f64,

    #[serde(default = "default_mad_threshold")]
    pub mad_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            method: OutlierMethod::default(),
            iqr_multiplier: default_iqr_multiplier(),
            zscore_threshold: default_zscore_threshold(),
            mad_threshold: default_mad_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_agent_search_limit() -> u32 {
    DEFAULT_AGENT_SEARCH_LIMIT
}

fn default_interval_hours() -> f64 {
    DEFAULT_INTERVAL_HOURS
}

fn default_hours_per_week() -> f64 {
    40.0
}

fn default_stable_slope_ratio() -> f64 {
    0.01
}

fn default_significance_level() -> f64 {
    0.05
}

fn default_candidate_periods() -> Vec<usize> {
    DEFAULT_CANDIDATE_PERIODS.to_vec()
}

fn default_min_autocorrelation() -> f64 {
    0.2
}

fn default_detection_threshold() -> f64 {
    0.3
}

fn default_iqr_multiplier() -> f64 {
    1.5
}

fn default_zscore_threshold() -> f64 {
    3.0
}

fn default_mad_threshold() -> f64 {
    3.5
}

fn default_log_level() -> String {
    "info".to_string()
}
