//! Integration tests for the capacity planning pipeline

mod common;

use common::{assert_close, plan_request, week, weekly_series};
use wfm_analytics::capacity_planning::*;
use wfm_analytics::{AnalyticsError, TimeSeries};

#[test]
fn test_effective_volume_reference() {
    assert_close(calculate_effective_volume(1000.0, 20.0, 10.0, 5.0), 684.0, 1e-9);
}

#[test]
fn test_plan_weekly_headcount() {
    let plan = CapacityPlanner::default().plan(&plan_request("billing")).unwrap();

    assert_eq!(plan.lob, "billing");
    assert_eq!(plan.historical_weeks, vec![week(0), week(1), week(2), week(3)]);
    assert_eq!(plan.forecasted_weeks, vec![week(4), week(5), week(6), week(7)]);

    let headcount: Vec<u32> = plan.weeks.iter().map(|w| w.required_agents).collect();
    assert_eq!(headcount, vec![14, 15, 14, 15, 15, 16, 16, 16]);
    assert!(plan.weeks[..4].iter().all(|w| !w.is_forecasted));
    assert!(plan.weeks[4..].iter().all(|w| w.is_forecasted));

    let summary = plan.summary;
    assert_eq!(summary.total_hc, 121);
    assert_close(summary.avg_hc, 15.125, 1e-12);
    assert_eq!(summary.peak.unwrap().week_start, week(5));
    assert_eq!(summary.trough.unwrap().week_start, week(0));
    assert_close(summary.historical_avg, 14.5, 1e-12);
    assert_close(summary.forecasted_avg, 15.75, 1e-12);
    assert_eq!(summary.week_count, 8);
}

#[test]
fn test_plan_includes_interval_staffing() {
    let plan = CapacityPlanner::default().plan(&plan_request("billing")).unwrap();
    let interval = plan.interval;

    // 120 contacts per half hour at 300s = 20 Erlangs
    assert_close(interval.traffic_intensity, 20.0, 1e-9);
    assert!(interval.target_met);
    assert!(interval.erlang_agents > 20);
    assert!(interval.service_level >= 0.8);
}

#[test]
fn test_plan_collects_every_validation_error() {
    let mut request = plan_request("support");
    request.assumptions.sla_target = 1.5;
    request.assumptions.average_handle_time_secs = 0.0;
    request.parameters.occupancy_pct = 120.0;

    let err = CapacityPlanner::default().plan(&request).unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let messages = err.messages();
    assert_eq!(messages.len(), 3, "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("SLA target")));
    assert!(messages.iter().any(|m| m.contains("AHT")));
    assert!(messages.iter().any(|m| m.contains("Occupancy")));
}

#[test]
fn test_plan_without_data_in_range() {
    let mut request = plan_request("sales");
    request.historical = TimeSeries::new("historical");
    request.forecast = weekly_series("forecast", week(20), &[1000.0]);

    match CapacityPlanner::default().plan(&request) {
        Err(AnalyticsError::Validation(errors)) => {
            assert_eq!(
                errors,
                vec!["Date range must include at least 1 week with data".to_string()]
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_plan_many_preserves_order() {
    let mut invalid = plan_request("broken");
    invalid.assumptions.sla_target = 0.0;

    let requests = vec![plan_request("a"), invalid, plan_request("c")];
    let results = CapacityPlanner::default().plan_many(&requests);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().lob, "a");
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().lob, "c");
}

#[test]
fn test_overlapping_sources_prefer_history() {
    let historical = weekly_series("historical", week(0), &[100.0, 100.0]);
    let forecast = weekly_series("forecast", week(1), &[200.0, 200.0]);
    let validation = validate_date_range(&DateRange::new(week(0), week(2)), &historical, &forecast);

    assert_eq!(validation.historical_weeks, vec![week(0), week(1)]);
    assert_eq!(validation.forecasted_weeks, vec![week(2)]);
}

#[test]
fn test_headcount_flow() {
    let flow = project_headcount(200.0, 5.0, 12.0, 4.0, 6.0);
    assert_close(flow.attrition_loss, 10.0, 1e-12);
    assert_close(flow.after_attrition, 190.0, 1e-12);
    assert_close(flow.ending, 200.0, 1e-12);

    let periods = project_headcount_periods(
        200.0,
        5.0,
        &[HeadcountMovement::default(), HeadcountMovement::default()],
    );
    assert_close(periods[1].ending, 200.0 * 0.95 * 0.95, 1e-9);
}

#[test]
fn test_interval_helpers() {
    assert_close(calculate_staff_hours(120.0, 300.0), 10.0, 1e-12);
    assert_close(calculate_agent_work_hours(0.5, 10.0, 0.0, 0.0), 0.45, 1e-12);
    assert_close(calculate_required_agents(120.0, 300.0, 0.0, 0.0, 0.0), 20.0, 1e-9);
    assert_close(calculate_variance(18.0, 20.0), -2.0, 1e-12);
    assert_close(calculate_call_trend(95.0, 100.0), 95.0, 1e-9);
}

#[test]
fn test_plan_request_json_round_trip() {
    let request = plan_request("billing");
    let json = serde_json::to_string(&request).unwrap();
    let decoded: PlanRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn test_plan_request_with_unordered_history_plans_the_same() {
    let request = plan_request("billing");
    let mut value = serde_json::to_value(&request).unwrap();
    for field in ["historical", "forecast"] {
        value[field]["points"].as_array_mut().unwrap().reverse();
    }
    assert_eq!(value["historical"]["points"][0]["timestamp"], week(3).to_string());

    let decoded: PlanRequest = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.historical, request.historical);
    assert_eq!(decoded.historical.value_at(week(2)), Some(3900.0));
    assert_eq!(decoded.forecast.start(), Some(week(4)));

    let planner = CapacityPlanner::default();
    assert_eq!(planner.plan(&decoded).unwrap(), planner.plan(&request).unwrap());
}
