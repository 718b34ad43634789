//! Queueing-theory solvers
//!
//! Erlang B (blocking) and Erlang C (waiting) probabilities for a pool of
//! identical agents serving Poisson arrivals. Traffic is always expressed in
//! Erlangs: `volume * average_handle_time / time_window`.
//!
//! # Example
//!
//! ```
//! use wfm_analytics::queueing::{erlang_c, solve};
//!
//! // 8.33 Erlangs offered to 10 agents
//! let result = solve(8.33, 10);
//! assert!(result.wait_probability > 0.0 && result.wait_probability < 1.0);
//!
//! // An unstable queue always waits
//! assert_eq!(erlang_c(12.0, 10), 1.0);
//! ```

mod erlang;

pub use erlang::{
    erlang_b, erlang_c, erlang_c_closed_form, factorial, saturating_power, solve, utilization,
    ErlangResult, MAX_EXPONENT, MAX_FACTORIAL, MAX_RECURRENCE_AGENTS,
};
