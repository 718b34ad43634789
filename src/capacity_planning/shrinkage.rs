//! Shrinkage-adjusted workload and per-interval ratios

use crate::service_level::SECONDS_PER_HOUR;

/// Default planning interval (30 minutes)
pub const DEFAULT_INTERVAL_HOURS: f64 = 0.5;

fn retained(pct: f64) -> f64 {
    1.0 - pct / 100.0
}

/// Volume left after out-of-office, in-office and billable-break shrinkage
pub fn calculate_effective_volume(
    volume: f64,
    out_of_office_pct: f64,
    in_office_pct: f64,
    billable_break_pct: f64,
) -> f64 {
    volume * retained(out_of_office_pct) * retained(in_office_pct) * retained(billable_break_pct)
}

/// Hours of handling work in `volume` contacts
pub fn calculate_staff_hours(volume: f64, aht_secs: f64) -> f64 {
    volume * aht_secs / SECONDS_PER_HOUR
}

/// Productive hours one agent delivers in an interval after shrinkage
pub fn calculate_agent_work_hours(
    interval_hours: f64,
    out_of_office_pct: f64,
    in_office_pct: f64,
    billable_break_pct: f64,
) -> f64 {
    interval_hours
        * retained(out_of_office_pct)
        * retained(in_office_pct)
        * retained(billable_break_pct)
}

/// Workload-based agents for a half-hour interval
///
/// Staff hours of the effective volume divided by the productive hours of one
/// agent over [`DEFAULT_INTERVAL_HOURS`]. Returns 0 for non-positive volume or
/// AHT, and when shrinkage leaves no productive time.
pub fn calculate_required_agents(
    volume: f64,
    aht_secs: f64,
    out_of_office_pct: f64,
    in_office_pct: f64,
    billable_break_pct: f64,
) -> f64 {
    if volume <= 0.0 || aht_secs <= 0.0 {
        return 0.0;
    }

    let effective = calculate_effective_volume(volume, out_of_office_pct, in_office_pct, billable_break_pct);
    let staff_hours = calculate_staff_hours(effective, aht_secs);
    let work_hours = calculate_agent_work_hours(
        DEFAULT_INTERVAL_HOURS,
        out_of_office_pct,
        in_office_pct,
        billable_break_pct,
    );

    if work_hours <= 0.0 {
        return 0.0;
    }
    staff_hours / work_hours
}

/// Scheduled minus required; positive is overstaffed
pub fn calculate_variance(actual_agents: f64, required_agents: f64) -> f64 {
    actual_agents - required_agents
}

/// Contacts per hour, 0 for a non-positive interval
pub fn calculate_influx(volume: f64, interval_hours: f64) -> f64 {
    if interval_hours <= 0.0 {
        return 0.0;
    }
    volume / interval_hours
}

/// Share of all agents working this interval, as a percentage
pub fn calculate_agent_distribution_ratio(agents_in_interval: f64, total_agents: f64) -> f64 {
    if total_agents <= 0.0 {
        return 0.0;
    }
    agents_in_interval / total_agents * 100.0
}

/// Actual volume as a percentage of forecast
///
/// Without a forecast any actual volume counts as 100%.
pub fn calculate_call_trend(actual_volume: f64, forecast_volume: f64) -> f64 {
    if forecast_volume <= 0.0 {
        return if actual_volume > 0.0 { 100.0 } else { 0.0 };
    }
    actual_volume / forecast_volume * 100.0
}

/// Effective volume as a percentage of total volume
pub fn calculate_call_trend_shrinkage(effective_volume: f64, total_volume: f64) -> f64 {
    if total_volume <= 0.0 {
        return 0.0;
    }
    effective_volume / total_volume * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        assert!((calculate_effective_volume(1000.0, 20.0, 10.0, 5.0) - 684.0).abs() < 1e-9);
        assert_eq!(calculate_effective_volume(1000.0, 0.0, 0.0, 0.0), 1000.0);
    }

    #[test]
    fn test_required_agents() {
        // 100 contacts of 360s = 10 staff hours before shrinkage
        let agents = calculate_required_agents(100.0, 360.0, 0.0, 0.0, 0.0);
        assert!((agents - 20.0).abs() < 1e-9);

        assert_eq!(calculate_required_agents(0.0, 360.0, 10.0, 10.0, 0.0), 0.0);
        assert_eq!(calculate_required_agents(100.0, -1.0, 10.0, 10.0, 0.0), 0.0);
        assert_eq!(calculate_required_agents(100.0, 360.0, 100.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_agent_work_hours() {
        let hours = calculate_agent_work_hours(0.5, 20.0, 10.0, 0.0);
        assert!((hours - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_ratios() {
        assert_eq!(calculate_variance(12.0, 10.5), 1.5);
        assert_eq!(calculate_influx(50.0, 0.5), 100.0);
        assert_eq!(calculate_influx(50.0, 0.0), 0.0);
        assert_eq!(calculate_agent_distribution_ratio(5.0, 20.0), 25.0);
        assert_eq!(calculate_agent_distribution_ratio(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_call_trend() {
        assert!((calculate_call_trend(110.0, 100.0) - 110.0).abs() < 1e-9);
        assert_eq!(calculate_call_trend(10.0, 0.0), 100.0);
        assert_eq!(calculate_call_trend(0.0, 0.0), 0.0);
        assert!((calculate_call_trend_shrinkage(684.0, 1000.0) - 68.4).abs() < 1e-9);
        assert_eq!(calculate_call_trend_shrinkage(684.0, 0.0), 0.0);
    }
}
