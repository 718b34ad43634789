//! Capacity planning
//!
//! Shrinkage-adjusted workload, input validation, weekly headcount from
//! historical and forecast volumes, and per-interval staffing on top of the
//! Erlang C service-level search.

mod headcount;
mod models;
mod planner;
mod shrinkage;
mod validation;

pub use headcount::{project_headcount, project_headcount_periods};
pub use models::{
    CapacityPlan, DateRange, DateRangeValidation, HeadcountFlow, HeadcountMovement,
    IntervalStaffing, PlanRequest, PlanningParameters, SummaryStats, TrafficAssumptions,
    ValidationResult, WeekValue, WeeklyHCResult,
};
pub use planner::{aggregate_results, calculate_weekly_hc, CapacityPlanner, PlannerConfig};
pub use shrinkage::{
    calculate_agent_distribution_ratio, calculate_agent_work_hours, calculate_call_trend,
    calculate_call_trend_shrinkage, calculate_effective_volume, calculate_influx,
    calculate_required_agents, calculate_staff_hours, calculate_variance,
    DEFAULT_INTERVAL_HOURS,
};
pub use validation::{validate_assumptions, validate_date_range, validate_planning_parameters};
