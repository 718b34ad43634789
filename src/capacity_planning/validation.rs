//! Input validation that reports every problem at once

use crate::capacity_planning::models::{
    DateRange, DateRangeValidation, PlanningParameters, TrafficAssumptions, ValidationResult,
};
use crate::error::validation_messages;
use crate::models::TimeSeries;
use validator::Validate;

/// Check traffic assumptions
///
/// Range rules come from the `validator` derive on [`TrafficAssumptions`];
/// NaN and infinite values are reported separately since they slip through
/// range comparisons.
pub fn validate_assumptions(assumptions: &TrafficAssumptions) -> ValidationResult {
    let mut errors = non_finite_messages(&assumptions.fields());
    if let Err(err) = assumptions.validate() {
        errors.extend(validation_messages(&err));
    }
    ValidationResult::from_errors(errors)
}

/// Check weekly headcount drivers
pub fn validate_planning_parameters(parameters: &PlanningParameters) -> ValidationResult {
    let mut errors = non_finite_messages(&parameters.fields());
    if let Err(err) = parameters.validate() {
        errors.extend(validation_messages(&err));
    }
    ValidationResult::from_errors(errors)
}

/// Check the planning window and assign each week to a data source
///
/// Weeks step by 7 days from `range.start` through `range.end`. A week with
/// historical data is historical; otherwise a week with forecast data is
/// forecasted; weeks with neither are dropped.
pub fn validate_date_range(
    range: &DateRange,
    historical: &TimeSeries,
    forecast: &TimeSeries,
) -> DateRangeValidation {
    if range.start >= range.end {
        return DateRangeValidation {
            valid: false,
            errors: vec!["Start date must be before end date".to_string()],
            ..Default::default()
        };
    }

    let mut historical_weeks = Vec::new();
    let mut forecasted_weeks = Vec::new();

    for week in range.weeks() {
        if historical.value_at(week).is_some() {
            historical_weeks.push(week);
        } else if forecast.value_at(week).is_some() {
            forecasted_weeks.push(week);
        }
    }

    let mut errors = Vec::new();
    if historical_weeks.is_empty() && forecasted_weeks.is_empty() {
        errors.push("Date range must include at least 1 week with data".to_string());
    }

    DateRangeValidation {
        valid: errors.is_empty(),
        errors,
        historical_weeks,
        forecasted_weeks,
    }
}

fn non_finite_messages(fields: &[(&'static str, f64)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| format!("{}: must be a finite number", name))
        .collect()
}
