//! Service-level calculations on top of the Erlang C solver
//!
//! Converts contact volume and handle time into Erlangs, computes the share of
//! contacts answered within a threshold, and searches for the smallest agent
//! count that meets a service-level target.

mod calculator;

pub use calculator::{
    calculate_agents, calculate_occupancy, calculate_sla, calculate_sla_with_traffic,
    calculate_utilization, erlang_agents, traffic_intensity, AgentSearch,
    ServiceLevelCalculator, DEFAULT_AGENT_SEARCH_LIMIT, SECONDS_PER_HOUR,
};
