//! Workforce-capacity and time-series analytics
//!
//! Translates forecasted contact volume into staffing with Erlang B/C queueing
//! models, and characterizes the historical series that feed those forecasts.
//!
//! # Features
//!
//! - **Queueing**: Erlang B and Erlang C with overflow-safe recurrences
//! - **Service Level**: SLA, occupancy and a bounded required-agent search
//! - **Capacity Planning**: shrinkage, validation, weekly headcount and summaries
//! - **Statistics**: descriptive summary, distribution shape, data quality
//! - **Trend & Seasonality**: OLS, Mann-Kendall, autocorrelation, forecast accuracy
//! - **Outliers**: IQR, Z-score and MAD detection with severity grading
//!
//! Every calculation is pure and synchronous. [`AnalyticsEngine`] composes the
//! components and runs independent series or lines of business in parallel.
//!
//! # Example
//!
//! ```
//! use wfm_analytics::service_level::{calculate_agents, calculate_sla};
//!
//! // 10 contacts per hour at 300s, 80% answered within 20s
//! let agents = calculate_agents(0.8, 20.0, 10.0, 300.0);
//! assert_eq!(agents, 3);
//! assert!(calculate_sla(10.0, 300.0, 20.0, agents) >= 0.8);
//! ```

pub mod capacity_planning;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod outliers;
pub mod queueing;
pub mod service_level;
pub mod statistics;
pub mod trend_seasonality;

pub use config::Config;
pub use engine::{AnalyticsEngine, SeriesAnalysis};
pub use error::{AnalyticsError, AnalyticsResult};
pub use models::{TimeSeries, TimeSeriesPoint};
