//! SLA, occupancy and required-agent search

use crate::queueing::erlang_c;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Seconds per hour, used for every seconds-to-Erlang conversion
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// How far above `ceil(traffic)` the agent search may go
pub const DEFAULT_AGENT_SEARCH_LIMIT: u32 = 100;

/// Offered traffic in Erlangs for `volume` contacts of `aht_secs` each per hour
pub fn traffic_intensity(volume: f64, aht_secs: f64) -> f64 {
    (volume * aht_secs) / SECONDS_PER_HOUR
}

/// Service level for a volume of contacts
///
/// Returns 1 when volume, AHT or agents are non-positive and 0 when the queue
/// is unstable (agents <= traffic intensity).
pub fn calculate_sla(volume: f64, aht_secs: f64, service_time_secs: f64, agents: u32) -> f64 {
    if volume <= 0.0 || aht_secs <= 0.0 || agents == 0 {
        return 1.0;
    }

    service_level(traffic_intensity(volume, aht_secs), aht_secs, service_time_secs, agents)
}

/// Service level for traffic already expressed in Erlangs
///
/// Callers that pre-aggregate per-interval volumes pass the resulting
/// intensity here; the result matches [`calculate_sla`] for equivalent input.
pub fn calculate_sla_with_traffic(
    traffic: f64,
    service_time_secs: f64,
    agents: u32,
    aht_secs: f64,
) -> f64 {
    if traffic <= 0.0 || aht_secs <= 0.0 || agents == 0 {
        return 1.0;
    }

    service_level(traffic, aht_secs, service_time_secs, agents)
}

/// `1 - C * exp(-N * (1 - rho) * t / AHT)`, clamped to [0, 1]
fn service_level(traffic: f64, aht_secs: f64, service_time_secs: f64, agents: u32) -> f64 {
    let n = agents as f64;
    if n <= traffic {
        return 0.0;
    }

    let wait_probability = erlang_c(traffic, agents);
    let rho = traffic / n;

    let service_time_hours = service_time_secs / SECONDS_PER_HOUR;
    let aht_hours = aht_secs / SECONDS_PER_HOUR;
    let waiting = wait_probability * (-n * (1.0 - rho) * service_time_hours / aht_hours).exp();

    (1.0 - waiting).clamp(0.0, 1.0)
}

/// Agent utilization for a volume of contacts, `min(1, traffic / agents)`
pub fn calculate_utilization(volume: f64, aht_secs: f64, agents: u32) -> f64 {
    if volume <= 0.0 || aht_secs <= 0.0 || agents == 0 {
        return 0.0;
    }
    (traffic_intensity(volume, aht_secs) / agents as f64).min(1.0)
}

/// Occupancy percentage (0-100) of `agents` over an interval
pub fn calculate_occupancy(volume: f64, aht_secs: f64, agents: f64, interval_hours: f64) -> f64 {
    if agents <= 0.0 || interval_hours <= 0.0 {
        return 0.0;
    }

    let call_hours = (volume * aht_secs) / SECONDS_PER_HOUR;
    let available_hours = agents * interval_hours;

    ((call_hours / available_hours) * 100.0).min(100.0)
}

/// Smallest agent count meeting `sla_target` for a contact volume
///
/// Returns the starting estimate `ceil(traffic)` when nothing within
/// [`DEFAULT_AGENT_SEARCH_LIMIT`] extra agents meets the target. Use
/// [`ServiceLevelCalculator::required_agents`] to see whether that happened.
pub fn calculate_agents(sla_target: f64, service_time_secs: f64, volume: f64, aht_secs: f64) -> u32 {
    ServiceLevelCalculator::default()
        .required_agents(sla_target, service_time_secs, volume, aht_secs)
        .agents
}

/// Smallest agent count meeting `sla_target` for traffic in Erlangs
pub fn erlang_agents(sla_target: f64, service_time_secs: f64, traffic: f64, aht_secs: f64) -> u32 {
    ServiceLevelCalculator::default()
        .required_agents_for_traffic(sla_target, service_time_secs, traffic, aht_secs)
        .agents
}

/// Outcome of the bounded agent search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSearch {
    /// Recommended agent count
    pub agents: u32,

    /// Service level achieved with `agents`
    pub service_level: f64,

    /// False when the search ran out before reaching the target; `agents`
    /// is then only the starting estimate
    pub target_met: bool,

    /// Agent counts evaluated
    pub iterations: u32,
}

/// Required-agent search with an explicit iteration bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLevelCalculator {
    search_limit: u32,
}

impl Default for ServiceLevelCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_SEARCH_LIMIT)
    }
}

impl ServiceLevelCalculator {
    /// Create a calculator that searches at most `search_limit` agents past
    /// the starting estimate
    pub fn new(search_limit: u32) -> Self {
        Self { search_limit }
    }

    /// Configured search bound
    pub fn search_limit(&self) -> u32 {
        self.search_limit
    }

    /// Search for the agents needed by `volume` contacts per hour
    pub fn required_agents(
        &self,
        sla_target: f64,
        service_time_secs: f64,
        volume: f64,
        aht_secs: f64,
    ) -> AgentSearch {
        if volume <= 0.0 || aht_secs <= 0.0 {
            return AgentSearch::idle();
        }

        self.search(sla_target, service_time_secs, traffic_intensity(volume, aht_secs), aht_secs)
    }

    /// Search for the agents needed by `traffic` Erlangs
    pub fn required_agents_for_traffic(
        &self,
        sla_target: f64,
        service_time_secs: f64,
        traffic: f64,
        aht_secs: f64,
    ) -> AgentSearch {
        if traffic <= 0.0 || aht_secs <= 0.0 {
            return AgentSearch::idle();
        }

        self.search(sla_target, service_time_secs, traffic, aht_secs)
    }

    fn search(&self, sla_target: f64, service_time_secs: f64, traffic: f64, aht_secs: f64) -> AgentSearch {
        let start = traffic.ceil() as u32;
        let end = start.saturating_add(self.search_limit);
        let mut iterations = 0;

        for agents in start..=end {
            iterations += 1;
            let sla = calculate_sla_with_traffic(traffic, service_time_secs, agents, aht_secs);
            if sla >= sla_target {
                debug!(traffic, agents, sla, iterations, "Agent search met target");
                return AgentSearch {
                    agents,
                    service_level: sla,
                    target_met: true,
                    iterations,
                };
            }
        }

        warn!(
            traffic,
            sla_target,
            search_limit = self.search_limit,
            "Agent search exhausted without meeting SLA target; returning starting estimate"
        );

        AgentSearch {
            agents: start,
            service_level: calculate_sla_with_traffic(traffic, service_time_secs, start, aht_secs),
            target_met: false,
            iterations,
        }
    }
}

impl AgentSearch {
    /// No traffic: nobody is needed and the target is trivially met
    fn idle() -> Self {
        Self {
            agents: 0,
            service_level: 1.0,
            target_met: true,
            iterations: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sla_degenerate_inputs() {
        assert_eq!(calculate_sla(0.0, 300.0, 20.0, 5), 1.0);
        assert_eq!(calculate_sla(100.0, 0.0, 20.0, 5), 1.0);
        assert_eq!(calculate_sla(100.0, 300.0, 20.0, 0), 1.0);
        assert_eq!(calculate_sla_with_traffic(0.0, 20.0, 5, 300.0), 1.0);
    }

    #[test]
    fn test_sla_unstable_is_zero() {
        // 100 calls * 360s / 3600 = 10 Erlangs
        assert_eq!(calculate_sla(100.0, 360.0, 20.0, 10), 0.0);
        assert_eq!(calculate_sla(100.0, 360.0, 20.0, 9), 0.0);
    }

    #[test]
    fn test_sla_entry_points_agree() {
        let volume = 120.0;
        let aht = 240.0;
        let traffic = traffic_intensity(volume, aht);
        for agents in 9..20 {
            let by_volume = calculate_sla(volume, aht, 20.0, agents);
            let by_traffic = calculate_sla_with_traffic(traffic, 20.0, agents, aht);
            assert!((by_volume - by_traffic).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reference_agent_table() {
        // 10 calls of 300s: 0.8333 Erlangs
        assert!((calculate_sla(10.0, 300.0, 20.0, 1) - 0.1759).abs() < 1e-3);
        assert!((calculate_sla(10.0, 300.0, 20.0, 2) - 0.7732).abs() < 1e-3);
        assert!((calculate_sla(10.0, 300.0, 20.0, 3) - 0.9500).abs() < 1e-3);
        assert_eq!(calculate_agents(0.8, 20.0, 10.0, 300.0), 3);
    }

    #[test]
    fn test_erlang_agents_matches_volume_search() {
        let traffic = traffic_intensity(10.0, 300.0);
        assert_eq!(erlang_agents(0.8, 20.0, traffic, 300.0), 3);
    }

    #[test]
    fn test_search_without_traffic() {
        let search = ServiceLevelCalculator::default().required_agents(0.8, 20.0, 0.0, 300.0);
        assert_eq!(search.agents, 0);
        assert!(search.target_met);
        assert_eq!(calculate_agents(0.8, 20.0, 10.0, 0.0), 0);
    }

    #[test]
    fn test_search_exhaustion_is_flagged() {
        // A target of more than 100% can never be met
        let calculator = ServiceLevelCalculator::new(5);
        let search = calculator.required_agents(1.5, 20.0, 10.0, 300.0);

        assert!(!search.target_met);
        assert_eq!(search.agents, 1);
        assert_eq!(search.iterations, 6);
        assert_eq!(calculate_agents(1.5, 20.0, 10.0, 300.0), 1);
    }

    #[test]
    fn test_occupancy() {
        // 100 calls * 180s = 5 hours of work over 10 agents * 0.5h
        assert!((calculate_occupancy(100.0, 180.0, 10.0, 0.5) - 100.0).abs() < 1e-9);
        assert!((calculate_occupancy(50.0, 180.0, 10.0, 0.5) - 50.0).abs() < 1e-9);
        assert_eq!(calculate_occupancy(500.0, 180.0, 10.0, 0.5), 100.0);
        assert_eq!(calculate_occupancy(50.0, 180.0, 0.0, 0.5), 0.0);
    }

    #[test]
    fn test_utilization() {
        assert!((calculate_utilization(100.0, 180.0, 10) - 0.5).abs() < 1e-12);
        assert_eq!(calculate_utilization(1000.0, 180.0, 10), 1.0);
        assert_eq!(calculate_utilization(0.0, 180.0, 10), 0.0);
    }
}
