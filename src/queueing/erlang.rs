//! Erlang B/C formulas

use serde::{Deserialize, Serialize};

/// Agent count above which the Erlang B recurrence reports 0
pub const MAX_RECURRENCE_AGENTS: u32 = 170;

/// Largest `n` whose factorial fits in an `f64`
pub const MAX_FACTORIAL: u32 = 170;

/// Largest exponent accepted by [`saturating_power`] before it reports +inf
pub const MAX_EXPONENT: f64 = 700.0;

/// Outcome of solving a queue for a fixed agent count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErlangResult {
    /// Erlang B: probability an arrival finds every agent busy (no queue)
    pub blocking_probability: f64,

    /// Erlang C: probability an arrival has to wait
    pub wait_probability: f64,

    /// Agent count the probabilities were computed for
    pub agents_required: u32,

    /// Offered load per agent, capped at 1
    pub utilization: f64,
}

/// Erlang B blocking probability
///
/// Uses the recurrence `b(i) = A*b(i-1) / (i + A*b(i-1))`, which never forms a
/// factorial. Returns 0 for non-positive traffic, zero agents, or more than
/// [`MAX_RECURRENCE_AGENTS`] agents.
pub fn erlang_b(traffic: f64, agents: u32) -> f64 {
    if traffic <= 0.0 || agents == 0 {
        return 0.0;
    }
    if agents > MAX_RECURRENCE_AGENTS {
        return 0.0;
    }

    let mut blocking = 1.0;
    for i in 1..=agents {
        blocking = (traffic * blocking) / (i as f64 + traffic * blocking);
    }

    blocking
}

/// Erlang C waiting probability
///
/// Derived from Erlang B as `C = B / (1 - rho + rho*B)`. Non-positive traffic,
/// zero agents and unstable systems (agents <= traffic) all return 1.
pub fn erlang_c(traffic: f64, agents: u32) -> f64 {
    if traffic <= 0.0 || agents == 0 {
        return 1.0;
    }
    if agents as f64 <= traffic {
        return 1.0;
    }

    let rho = traffic / agents as f64;
    let blocking = erlang_b(traffic, agents);

    blocking / (1.0 - rho + rho * blocking)
}

/// Agent utilization `min(1, traffic / agents)`, 0 when either input is degenerate
pub fn utilization(traffic: f64, agents: u32) -> f64 {
    if traffic <= 0.0 || agents == 0 {
        return 0.0;
    }
    (traffic / agents as f64).min(1.0)
}

/// Solve the queue for a fixed agent count
pub fn solve(traffic: f64, agents: u32) -> ErlangResult {
    ErlangResult {
        blocking_probability: erlang_b(traffic, agents),
        wait_probability: erlang_c(traffic, agents),
        agents_required: agents,
        utilization: utilization(traffic, agents),
    }
}

/// `n!` as a float, saturating to +inf above [`MAX_FACTORIAL`]
pub fn factorial(n: u32) -> f64 {
    if n <= 1 {
        return 1.0;
    }
    if n > MAX_FACTORIAL {
        return f64::INFINITY;
    }

    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// `base^exponent`, saturating to +inf once the exponent passes [`MAX_EXPONENT`]
pub fn saturating_power(base: f64, exponent: f64) -> f64 {
    if exponent == 0.0 {
        return 1.0;
    }
    if base == 0.0 {
        return 0.0;
    }
    if exponent > MAX_EXPONENT {
        return f64::INFINITY;
    }
    base.powf(exponent)
}

/// Textbook Erlang C from Poisson terms
///
/// `C = (A^N/N! * N/(N-A)) / (sum_{k<N} A^k/k! + A^N/N! * N/(N-A))`.
/// Only usable while the guarded primitives stay finite; returns `None` once
/// either saturates. Same degenerate/unstable handling as [`erlang_c`].
pub fn erlang_c_closed_form(traffic: f64, agents: u32) -> Option<f64> {
    if traffic <= 0.0 || agents == 0 || agents as f64 <= traffic {
        return Some(1.0);
    }

    let n = agents as f64;
    let top = saturating_power(traffic, n) / factorial(agents) * (n / (n - traffic));
    if !top.is_finite() {
        return None;
    }

    let mut sum = 0.0;
    for k in 0..agents {
        let term = saturating_power(traffic, k as f64) / factorial(k);
        if !term.is_finite() {
            return None;
        }
        sum += term;
    }

    Some(top / (sum + top))
}
