//! Common test utilities for building series and planning requests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use wfm_analytics::capacity_planning::{
    DateRange, PlanRequest, PlanningParameters, TrafficAssumptions,
};
use wfm_analytics::{TimeSeries, TimeSeriesPoint};

/// Monday 2024-01-01
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn week(n: i64) -> NaiveDate {
    start_date() + Duration::weeks(n)
}

/// One point per day from [`start_date`]
pub fn daily_series(name: &str, values: &[f64]) -> TimeSeries {
    series_with_step(name, values, Duration::days(1))
}

/// One point per week from `first`
pub fn weekly_series(name: &str, first: NaiveDate, values: &[f64]) -> TimeSeries {
    TimeSeries::from_points(
        name,
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(first + Duration::weeks(i as i64), v))
            .collect(),
    )
}

fn series_with_step(name: &str, values: &[f64], step: Duration) -> TimeSeries {
    let start = start_date();
    TimeSeries::from_points(
        name,
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(start + step * i as i32, v))
            .collect(),
    )
}

/// `sin(2*pi*i/period)` scaled around a base level
pub fn seasonal_values(n: usize, period: f64, base: f64, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| base + amplitude * (2.0 * std::f64::consts::PI * i as f64 / period).sin())
        .collect()
}

pub fn assumptions() -> TrafficAssumptions {
    TrafficAssumptions {
        volume: 120.0,
        average_handle_time_secs: 300.0,
        service_time_threshold_secs: 20.0,
        sla_target: 0.8,
        out_of_office_shrinkage_pct: 10.0,
        in_office_shrinkage_pct: 15.0,
        billable_break_pct: 5.0,
    }
}

pub fn parameters() -> PlanningParameters {
    PlanningParameters {
        occupancy_pct: 85.0,
        backlog_pct: 5.0,
        volume_mix_pct: 100.0,
        attrition_pct: 2.0,
        hours_per_week: 40.0,
    }
}

/// Four historical weeks followed by four forecast weeks
pub fn plan_request(lob: &str) -> PlanRequest {
    PlanRequest {
        lob: lob.to_string(),
        assumptions: assumptions(),
        parameters: parameters(),
        date_range: DateRange::new(week(0), week(7)),
        historical: weekly_series("historical", week(0), &[4000.0, 4200.0, 3900.0, 4100.0]),
        forecast: weekly_series("forecast", week(4), &[4300.0, 4500.0, 4400.0, 4600.0]),
    }
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
