//! Weekly headcount planning and interval sizing

use crate::capacity_planning::models::{
    CapacityPlan, DateRangeValidation, IntervalStaffing, PlanRequest, PlanningParameters,
    SummaryStats, TrafficAssumptions, WeekValue, WeeklyHCResult,
};
use crate::capacity_planning::shrinkage::{
    calculate_agent_work_hours, calculate_effective_volume, calculate_influx,
    calculate_staff_hours, DEFAULT_INTERVAL_HOURS,
};
use crate::capacity_planning::validation::{
    validate_assumptions, validate_date_range, validate_planning_parameters,
};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::TimeSeries;
use crate::queueing::utilization;
use crate::service_level::{calculate_occupancy, ServiceLevelCalculator, SECONDS_PER_HOUR};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Planner settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Length of one staffing interval
    pub interval_hours: f64,

    /// Agents searched past the starting estimate
    pub agent_search_limit: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            interval_hours: DEFAULT_INTERVAL_HOURS,
            agent_search_limit: crate::service_level::DEFAULT_AGENT_SEARCH_LIMIT,
        }
    }
}

/// Turns validated volumes into weekly headcount and interval staffing
#[derive(Debug, Clone, Copy)]
pub struct CapacityPlanner {
    config: PlannerConfig,
    calculator: ServiceLevelCalculator,
}

impl Default for CapacityPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl CapacityPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            calculator: ServiceLevelCalculator::new(config.agent_search_limit),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validate a request and produce its weekly plan
    ///
    /// Every validation message from the assumptions, the planning parameters
    /// and the date range is returned together in
    /// [`AnalyticsError::Validation`].
    pub fn plan(&self, request: &PlanRequest) -> AnalyticsResult<CapacityPlan> {
        let assumptions = validate_assumptions(&request.assumptions);
        let parameters = validate_planning_parameters(&request.parameters);
        let range = validate_date_range(&request.date_range, &request.historical, &request.forecast);

        let errors: Vec<String> = assumptions
            .errors
            .into_iter()
            .chain(parameters.errors)
            .chain(range.errors.iter().cloned())
            .collect();
        if !errors.is_empty() {
            warn!(lob = %request.lob, error_count = errors.len(), "Capacity plan rejected");
            return Err(AnalyticsError::Validation(errors));
        }

        let weeks = calculate_weekly_hc(
            &request.assumptions,
            &request.parameters,
            &range,
            &request.historical,
            &request.forecast,
        );
        let summary = aggregate_results(&weeks);

        info!(
            lob = %request.lob,
            weeks = summary.week_count,
            total_hc = summary.total_hc,
            "Capacity plan complete"
        );

        Ok(CapacityPlan {
            lob: request.lob.clone(),
            weeks,
            summary,
            historical_weeks: range.historical_weeks,
            forecasted_weeks: range.forecasted_weeks,
            interval: self.size_interval(&request.assumptions),
        })
    }

    /// Plan independent requests in parallel, preserving input order
    pub fn plan_many(&self, requests: &[PlanRequest]) -> Vec<AnalyticsResult<CapacityPlan>> {
        debug!(requests = requests.len(), "Planning batch");
        requests.par_iter().map(|request| self.plan(request)).collect()
    }

    /// Staffing for one interval of `assumptions.volume` contacts
    pub fn size_interval(&self, assumptions: &TrafficAssumptions) -> IntervalStaffing {
        let interval_hours = self.config.interval_hours;
        let aht = assumptions.average_handle_time_secs;

        let influx = calculate_influx(assumptions.volume, interval_hours);
        let traffic = if aht > 0.0 {
            influx * aht / SECONDS_PER_HOUR
        } else {
            0.0
        };

        let effective_volume = calculate_effective_volume(
            assumptions.volume,
            assumptions.out_of_office_shrinkage_pct,
            assumptions.in_office_shrinkage_pct,
            assumptions.billable_break_pct,
        );
        let work_hours = calculate_agent_work_hours(
            interval_hours,
            assumptions.out_of_office_shrinkage_pct,
            assumptions.in_office_shrinkage_pct,
            assumptions.billable_break_pct,
        );
        let shrinkage_agents = if assumptions.volume > 0.0 && aht > 0.0 && work_hours > 0.0 {
            calculate_staff_hours(effective_volume, aht) / work_hours
        } else {
            0.0
        };

        let search = self.calculator.required_agents_for_traffic(
            assumptions.sla_target,
            assumptions.service_time_threshold_secs,
            traffic,
            aht,
        );

        IntervalStaffing {
            interval_hours,
            traffic_intensity: traffic,
            effective_volume,
            shrinkage_agents,
            erlang_agents: search.agents,
            target_met: search.target_met,
            service_level: search.service_level,
            occupancy: calculate_occupancy(assumptions.volume, aht, search.agents as f64, interval_hours),
            utilization: utilization(traffic, search.agents),
            influx,
        }
    }
}

/// Required headcount for every selected week with positive volume
///
/// `workload = volume * mix * aht / 3600 * (1 + backlog)` hours and
/// `productive = hours_per_week * occupancy * (1 - ooo) * (1 - io) * (1 - bb)`
/// hours per agent; the headcount is their ratio rounded to the nearest agent.
/// Results are ordered by week.
pub fn calculate_weekly_hc(
    assumptions: &TrafficAssumptions,
    parameters: &PlanningParameters,
    validation: &DateRangeValidation,
    historical: &TimeSeries,
    forecast: &TimeSeries,
) -> Vec<WeeklyHCResult> {
    let productive_hours = parameters.hours_per_week
        * (parameters.occupancy_pct / 100.0)
        * calculate_agent_work_hours(
            1.0,
            assumptions.out_of_office_shrinkage_pct,
            assumptions.in_office_shrinkage_pct,
            assumptions.billable_break_pct,
        );
    if productive_hours <= 0.0 || !productive_hours.is_finite() {
        warn!(productive_hours, "No productive hours per agent; weekly headcount skipped");
        return Vec::new();
    }

    let historical_weeks = validation
        .historical_weeks
        .iter()
        .map(|&week| (week, historical.value_at(week), false));
    let forecasted_weeks = validation
        .forecasted_weeks
        .iter()
        .map(|&week| (week, forecast.value_at(week), true));

    let mut results: Vec<WeeklyHCResult> = historical_weeks
        .chain(forecasted_weeks)
        .filter_map(|(week_start, volume, is_forecasted)| {
            let volume = volume.filter(|v| v.is_finite() && *v > 0.0);
            if volume.is_none() {
                debug!(%week_start, is_forecasted, "Week has no positive volume");
            }
            let volume = volume?;

            let workload_hours = volume
                * (parameters.volume_mix_pct / 100.0)
                * assumptions.average_handle_time_secs
                / SECONDS_PER_HOUR
                * (1.0 + parameters.backlog_pct / 100.0);

            Some(WeeklyHCResult {
                week_start,
                volume,
                required_agents: (workload_hours / productive_hours).round() as u32,
                is_forecasted,
            })
        })
        .collect();

    results.sort_by_key(|r| r.week_start);
    results
}

/// Totals, averages and extremes of weekly results
pub fn aggregate_results(weeks: &[WeeklyHCResult]) -> SummaryStats {
    if weeks.is_empty() {
        return SummaryStats::default();
    }

    let total_hc: u64 = weeks.iter().map(|w| w.required_agents as u64).sum();

    let mut peak = weeks[0];
    let mut trough = weeks[0];
    for week in &weeks[1..] {
        if week.required_agents > peak.required_agents {
            peak = *week;
        }
        if week.required_agents < trough.required_agents {
            trough = *week;
        }
    }

    let average = |is_forecasted: bool| {
        let selected: Vec<u32> = weeks
            .iter()
            .filter(|w| w.is_forecasted == is_forecasted)
            .map(|w| w.required_agents)
            .collect();
        if selected.is_empty() {
            0.0
        } else {
            selected.iter().map(|&hc| hc as f64).sum::<f64>() / selected.len() as f64
        }
    };

    SummaryStats {
        total_hc,
        avg_hc: total_hc as f64 / weeks.len() as f64,
        peak: Some(WeekValue {
            week_start: peak.week_start,
            value: peak.required_agents,
        }),
        trough: Some(WeekValue {
            week_start: trough.week_start,
            value: trough.required_agents,
        }),
        historical_avg: average(false),
        forecasted_avg: average(true),
        week_count: weeks.len(),
    }
}
