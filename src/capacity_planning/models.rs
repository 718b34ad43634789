//! Capacity-planning inputs and outputs

use crate::models::TimeSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact traffic and shrinkage for one line of business
///
/// Shrinkage fields are percentages in [0, 100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrafficAssumptions {
    /// Contacts per interval
    #[validate(range(min = 0.0, message = "Volume must not be negative"))]
    pub volume: f64,

    #[validate(range(exclusive_min = 0.0, message = "AHT must be greater than 0"))]
    pub average_handle_time_secs: f64,

    /// Answer-time threshold of the service-level target
    #[validate(range(min = 0.0, message = "Service time threshold must not be negative"))]
    pub service_time_threshold_secs: f64,

    /// Fraction of contacts to answer within the threshold, in (0, 1]
    #[validate(range(
        exclusive_min = 0.0,
        max = 1.0,
        message = "SLA target must be greater than 0 and at most 1"
    ))]
    pub sla_target: f64,

    #[validate(range(
        min = 0.0,
        exclusive_max = 100.0,
        message = "Out-of-Office Shrinkage must be at least 0 and below 100"
    ))]
    pub out_of_office_shrinkage_pct: f64,

    #[validate(range(
        min = 0.0,
        exclusive_max = 100.0,
        message = "In-Office Shrinkage must be at least 0 and below 100"
    ))]
    pub in_office_shrinkage_pct: f64,

    #[validate(range(
        min = 0.0,
        exclusive_max = 100.0,
        message = "Billable Break must be at least 0 and below 100"
    ))]
    pub billable_break_pct: f64,
}

impl TrafficAssumptions {
    /// Named numeric fields, in declaration order
    pub(crate) fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("volume", self.volume),
            ("average_handle_time_secs", self.average_handle_time_secs),
            ("service_time_threshold_secs", self.service_time_threshold_secs),
            ("sla_target", self.sla_target),
            ("out_of_office_shrinkage_pct", self.out_of_office_shrinkage_pct),
            ("in_office_shrinkage_pct", self.in_office_shrinkage_pct),
            ("billable_break_pct", self.billable_break_pct),
        ]
    }
}

/// Weekly headcount drivers, percentages unless noted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlanningParameters {
    #[validate(range(
        exclusive_min = 0.0,
        max = 100.0,
        message = "Occupancy must be greater than 0 and at most 100"
    ))]
    pub occupancy_pct: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "Backlog must be between 0 and 100"))]
    pub backlog_pct: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "Volume Mix must be between 0 and 100"))]
    pub volume_mix_pct: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "Attrition must be between 0 and 100"))]
    pub attrition_pct: f64,

    /// Paid hours per agent per week
    #[validate(range(exclusive_min = 0.0, message = "Hours per week must be greater than 0"))]
    pub hours_per_week: f64,
}

impl Default for PlanningParameters {
    fn default() -> Self {
        Self {
            occupancy_pct: 85.0,
            backlog_pct: 0.0,
            volume_mix_pct: 100.0,
            attrition_pct: 0.0,
            hours_per_week: 40.0,
        }
    }
}

impl PlanningParameters {
    pub(crate) fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("occupancy_pct", self.occupancy_pct),
            ("backlog_pct", self.backlog_pct),
            ("volume_mix_pct", self.volume_mix_pct),
            ("attrition_pct", self.attrition_pct),
            ("hours_per_week", self.hours_per_week),
        ]
    }
}

/// Inclusive planning window; weeks step by 7 days from `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Week starts from `start` through `end`, 7 days apart
    pub fn weeks(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_weeks()
            .take_while(move |week| *week <= self.end)
    }
}

/// Collected validation outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Date-range validation with the weeks assigned to each data source
///
/// A week lands in at most one bucket, historical taking priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub historical_weeks: Vec<NaiveDate>,
    pub forecasted_weeks: Vec<NaiveDate>,
}

impl DateRangeValidation {
    pub fn week_count(&self) -> usize {
        self.historical_weeks.len() + self.forecasted_weeks.len()
    }
}

/// Required headcount for one week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHCResult {
    pub week_start: NaiveDate,
    pub volume: f64,
    pub required_agents: u32,
    /// Volume came from the forecast rather than history
    pub is_forecasted: bool,
}

/// Headcount attached to the week it occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekValue {
    pub week_start: NaiveDate,
    pub value: u32,
}

/// Totals across a set of weekly results
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_hc: u64,
    pub avg_hc: f64,
    /// Highest weekly headcount, earliest week on ties
    pub peak: Option<WeekValue>,
    /// Lowest weekly headcount, earliest week on ties
    pub trough: Option<WeekValue>,
    /// Mean over historical weeks, 0 when there are none
    pub historical_avg: f64,
    /// Mean over forecasted weeks, 0 when there are none
    pub forecasted_avg: f64,
    pub week_count: usize,
}

/// Everything needed to plan one line of business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Line of business
    pub lob: String,
    pub assumptions: TrafficAssumptions,
    pub parameters: PlanningParameters,
    pub date_range: DateRange,
    /// Weekly actual volumes keyed by week start
    pub historical: TimeSeries,
    /// Weekly forecast volumes keyed by week start
    pub forecast: TimeSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPlan {
    pub lob: String,
    pub weeks: Vec<WeeklyHCResult>,
    pub summary: SummaryStats,
    pub historical_weeks: Vec<NaiveDate>,
    pub forecasted_weeks: Vec<NaiveDate>,
    /// Staffing for the request's per-interval assumptions
    pub interval: IntervalStaffing,
}

/// Staffing picture for a single interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalStaffing {
    pub interval_hours: f64,
    pub traffic_intensity: f64,
    pub effective_volume: f64,
    /// Workload-based requirement after shrinkage
    pub shrinkage_agents: f64,
    /// Smallest agent count meeting the SLA target
    pub erlang_agents: u32,
    /// False when the Erlang search gave up before reaching the target
    pub target_met: bool,
    pub service_level: f64,
    /// Percent, 0-100
    pub occupancy: f64,
    /// 0-1
    pub utilization: f64,
    /// Contacts per hour
    pub influx: f64,
}

/// Headcount movement across one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadcountFlow {
    pub starting: f64,
    pub attrition_loss: f64,
    pub after_attrition: f64,
    pub ending: f64,
}

/// Hires and transfers for one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadcountMovement {
    pub new_hires: f64,
    pub move_in: f64,
    pub move_out: f64,
}
