//! Date-stamped series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single point in a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Named series kept in timestamp order
///
/// Points sharing a timestamp are allowed and keep their insertion order.
/// Deserialized series are sorted the same way as [`TimeSeries::from_points`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTimeSeries")]
pub struct TimeSeries {
    pub name: String,
    points: Vec<TimeSeriesPoint>,
}

/// Wire shape of [`TimeSeries`] before ordering
#[derive(Deserialize)]
struct RawTimeSeries {
    name: String,
    #[serde(default)]
    points: Vec<TimeSeriesPoint>,
}

impl From<RawTimeSeries> for TimeSeries {
    fn from(raw: RawTimeSeries) -> Self {
        TimeSeries::from_points(raw.name, raw.points)
    }
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Build a series from unordered points
    pub fn from_points(name: impl Into<String>, mut points: Vec<TimeSeriesPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self {
            name: name.into(),
            points,
        }
    }

    /// Insert a point after every existing point with the same or earlier timestamp
    pub fn add_point(&mut self, point: TimeSeriesPoint) {
        let position = self
            .points
            .partition_point(|p| p.timestamp <= point.timestamp);
        self.points.insert(position, point);
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.timestamp)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.timestamp)
    }

    /// First value recorded for `date`
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        let position = self.points.partition_point(|p| p.timestamp < date);
        self.points
            .get(position)
            .filter(|p| p.timestamp == date)
            .map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
