//! Interval demand and offered load.
//!
//! An [`IntervalDemand`] is one row of a call volume forecast: how many
//! contacts arrive during an interval of a given length. Combined with the
//! average handle time it yields the [`OfferedLoad`] in Erlangs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Forecast call volume for a single interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalDemand {
    /// Optional caller-supplied identifier for the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional start of the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_start: Option<NaiveDateTime>,
    /// Number of inbound contacts expected during the interval.
    pub inbound_calls: f64,
    /// Length of the interval in minutes.
    pub interval_length_minutes: f64,
}

impl IntervalDemand {
    /// Creates an anonymous interval.
    ///
    /// ```
    /// use erlang_staffing::models::IntervalDemand;
    ///
    /// let demand = IntervalDemand::new(100.0, 30.0);
    /// assert_eq!(demand.label(0), "#1");
    /// ```
    pub fn new(inbound_calls: f64, interval_length_minutes: f64) -> Self {
        Self {
            id: None,
            interval_start: None,
            inbound_calls,
            interval_length_minutes,
        }
    }

    /// Sets the interval identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the interval start time.
    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.interval_start = Some(start);
        self
    }

    /// Human-readable label: the id, else the start time, else the
    /// one-based position in the forecast.
    pub fn label(&self, index: usize) -> String {
        match (&self.id, &self.interval_start) {
            (Some(id), _) => id.clone(),
            (None, Some(start)) => start.format("%Y-%m-%d %H:%M").to_string(),
            (None, None) => format!("#{}", index + 1),
        }
    }
}

/// Offered traffic in Erlangs: the average number of contacts in progress.
///
/// Derived from demand and handle time, never set independently.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct OfferedLoad(f64);

impl OfferedLoad {
    pub(crate) fn from_erlangs(erlangs: f64) -> Self {
        Self(erlangs)
    }

    /// The traffic intensity in Erlangs.
    pub fn erlangs(&self) -> f64 {
        self.0
    }
}
