//! Core value types shared across analytics components

mod time_series;

pub use time_series::{TimeSeries, TimeSeriesPoint};
