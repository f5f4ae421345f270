//! Request types for the staffing API.
//!
//! This module defines the JSON request structures for the `/forecast`,
//! `/forecast/table` and `/wait-probability` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::{AgentSearchConfig, ParameterOverrides};
use crate::models::IntervalDemand;

/// Request body for the forecast endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Optional named parameter profile from the configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Parameter overrides applied on top of defaults and profile.
    #[serde(default)]
    pub parameters: ParameterOverrides,
    /// Optional replacement for the configured agent search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<AgentSearchConfig>,
    /// The forecast intervals, in order.
    pub intervals: Vec<IntervalRequest>,
}

/// One interval row in a forecast request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalRequest {
    /// Optional identifier for the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional start of the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_start: Option<NaiveDateTime>,
    /// Inbound contacts forecast for the interval.
    pub inbound_calls: f64,
    /// Interval length in minutes; the resolved default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_length_minutes: Option<f64>,
}

impl IntervalRequest {
    /// Converts to a domain interval, filling in the default length.
    pub fn into_demand(self, default_length_minutes: f64) -> IntervalDemand {
        let length = self
            .interval_length_minutes
            .unwrap_or(default_length_minutes);
        let mut demand = IntervalDemand::new(self.inbound_calls, length);
        if let Some(id) = self.id {
            demand = demand.with_id(id);
        }
        if let Some(start) = self.interval_start {
            demand = demand.with_start(start);
        }
        demand
    }
}

/// Request body for the `/wait-probability` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitProbabilityRequest {
    /// Offered load in Erlangs.
    pub traffic_intensity: f64,
    /// Number of agents.
    pub agents: i64,
    /// Target answer time in seconds.
    pub target_answer_time_seconds: f64,
    /// Average handle time in seconds.
    pub average_handle_time_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceLevelMode;

    #[test]
    fn test_deserialize_minimal_forecast_request() {
        let json = r#"{
            "intervals": [
                {"inbound_calls": 100},
                {"inbound_calls": 40, "interval_length_minutes": 15}
            ]
        }"#;

        let request: ForecastRequest = serde_json::from_str(json).unwrap();
        assert!(request.profile.is_none());
        assert!(request.search.is_none());
        assert_eq!(request.parameters, ParameterOverrides::default());
        assert_eq!(request.intervals.len(), 2);
        assert_eq!(request.intervals[1].interval_length_minutes, Some(15.0));
    }

    #[test]
    fn test_deserialize_full_forecast_request() {
        let json = r#"{
            "profile": "retail_sales",
            "parameters": {"shrinkage_percent": 20},
            "search": {"service_level_mode": "answered_within_target"},
            "intervals": [
                {"id": "mon_0900", "interval_start": "2026-01-12T09:00:00", "inbound_calls": 100}
            ]
        }"#;

        let request: ForecastRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.profile.as_deref(), Some("retail_sales"));
        assert_eq!(request.parameters.shrinkage_percent, Some(20.0));
        let search = request.search.unwrap();
        assert_eq!(search.cap, 100);
        assert_eq!(search.service_level_mode, ServiceLevelMode::AnsweredWithinTarget);
        assert_eq!(request.intervals[0].id.as_deref(), Some("mon_0900"));
    }

    #[test]
    fn test_interval_conversion_uses_default_length() {
        let interval = IntervalRequest {
            id: None,
            interval_start: None,
            inbound_calls: 12.0,
            interval_length_minutes: None,
        };

        let demand = interval.into_demand(30.0);
        assert_eq!(demand.interval_length_minutes, 30.0);
        assert_eq!(demand.inbound_calls, 12.0);
    }

    #[test]
    fn test_interval_conversion_keeps_start_time() {
        let start = NaiveDateTime::parse_from_str("2026-01-12 09:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let interval = IntervalRequest {
            id: None,
            interval_start: Some(start),
            inbound_calls: 40.0,
            interval_length_minutes: Some(15.0),
        };

        let demand = interval.into_demand(30.0);
        assert_eq!(demand.interval_start, Some(start));
        assert_eq!(demand.interval_length_minutes, 15.0);
        assert_eq!(demand.label(0), "2026-01-12 09:30");
    }
}
