//! Staffing result models.
//!
//! This module contains the [`StaffingResult`] produced for every interval
//! and the [`ForecastResult`] that wraps a whole forecast run together with
//! its totals and audit trace.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staffing requirement for a single interval.
///
/// `agents_with_shrinkage` is always at least `agents_no_shrinkage`.
///
/// # Example
///
/// ```
/// use erlang_staffing::models::StaffingResult;
///
/// let result = StaffingResult {
///     interval_id: "#1".to_string(),
///     interval_start: None,
///     inbound_calls: 100.0,
///     workload_erlangs: 20.0,
///     agents_no_shrinkage: 25,
///     agents_with_shrinkage: 31,
///     resolved: true,
/// };
/// assert!(result.agents_with_shrinkage >= result.agents_no_shrinkage);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingResult {
    /// Label of the interval this result belongs to.
    pub interval_id: String,
    /// Start of the interval, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_start: Option<NaiveDateTime>,
    /// Inbound contacts forecast for the interval.
    pub inbound_calls: f64,
    /// Offered load in Erlangs.
    pub workload_erlangs: f64,
    /// Minimum agents meeting the service level, before shrinkage.
    pub agents_no_shrinkage: u32,
    /// Agents required once shrinkage is applied.
    pub agents_with_shrinkage: u32,
    /// False when the agent search hit its cap without meeting the target.
    pub resolved: bool,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The interval this step was computed for.
    pub interval_id: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Aggregates across all intervals of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTotals {
    /// Number of intervals solved.
    pub interval_count: usize,
    /// Sum of inbound calls over all intervals.
    pub total_inbound_calls: f64,
    /// Highest offered load of any interval.
    pub peak_workload_erlangs: f64,
    /// Highest unshrunk agent requirement of any interval.
    pub peak_agents_no_shrinkage: u32,
    /// Highest shrinkage-adjusted agent requirement of any interval.
    pub peak_agents_with_shrinkage: u32,
    /// Number of intervals whose search hit the cap.
    pub unresolved_intervals: usize,
}

impl ForecastTotals {
    /// Computes totals over a slice of interval results.
    ///
    /// ```
    /// use erlang_staffing::models::ForecastTotals;
    ///
    /// let totals = ForecastTotals::from_results(&[]);
    /// assert_eq!(totals.interval_count, 0);
    /// assert_eq!(totals.peak_agents_with_shrinkage, 0);
    /// ```
    pub fn from_results(results: &[StaffingResult]) -> Self {
        Self {
            interval_count: results.len(),
            total_inbound_calls: results.iter().map(|r| r.inbound_calls).sum(),
            peak_workload_erlangs: results
                .iter()
                .map(|r| r.workload_erlangs)
                .fold(0.0, f64::max),
            peak_agents_no_shrinkage: results
                .iter()
                .map(|r| r.agents_no_shrinkage)
                .max()
                .unwrap_or(0),
            peak_agents_with_shrinkage: results
                .iter()
                .map(|r| r.agents_with_shrinkage)
                .max()
                .unwrap_or(0),
            unresolved_intervals: results.iter().filter(|r| !r.resolved).count(),
        }
    }
}

/// The scalar parameters a forecast was computed with, as percentages
/// where the inputs are usually expressed that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedParameters {
    /// Average handle time in seconds.
    pub average_handle_time_seconds: f64,
    /// Target answer time in seconds.
    pub target_answer_time_seconds: f64,
    /// Target service level as a probability.
    pub target_service_level: f64,
    /// Shrinkage as a fraction of paid time.
    pub shrinkage_fraction: f64,
    /// Agent search cap.
    pub search_cap: u32,
}

/// The complete result of a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Unique identifier for this forecast.
    pub forecast_id: Uuid,
    /// When the forecast was computed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that computed the forecast.
    pub engine_version: String,
    /// Parameters the forecast was computed with.
    pub parameters: AppliedParameters,
    /// Per-interval results, in input order.
    pub intervals: Vec<StaffingResult>,
    /// Aggregates across all intervals.
    pub totals: ForecastTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_result(workload: f64, agents: u32, with_shrinkage: u32, resolved: bool) -> StaffingResult {
        StaffingResult {
            interval_id: "#1".to_string(),
            interval_start: None,
            inbound_calls: workload * 5.0,
            workload_erlangs: workload,
            agents_no_shrinkage: agents,
            agents_with_shrinkage: with_shrinkage,
            resolved,
        }
    }

    #[test]
    fn test_totals_pick_peaks_and_sum_calls() {
        let results = vec![
            create_result(4.0, 7, 9, true),
            create_result(20.0, 25, 31, true),
            create_result(0.0, 100, 121, false),
        ];

        let totals = ForecastTotals::from_results(&results);

        assert_eq!(totals.interval_count, 3);
        assert_eq!(totals.total_inbound_calls, 120.0);
        assert_eq!(totals.peak_workload_erlangs, 20.0);
        assert_eq!(totals.peak_agents_no_shrinkage, 100);
        assert_eq!(totals.peak_agents_with_shrinkage, 121);
        assert_eq!(totals.unresolved_intervals, 1);
    }

    #[test]
    fn test_staffing_result_skips_missing_start_when_serialized() {
        let json = serde_json::to_value(create_result(20.0, 25, 31, true)).unwrap();
        assert!(json.get("interval_start").is_none());
        assert_eq!(json["agents_with_shrinkage"], 31);
    }

    #[test]
    fn test_audit_trace_serialization_roundtrip() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "workload_derivation".to_string(),
                rule_name: "Workload Derivation".to_string(),
                interval_id: "#1".to_string(),
                input: serde_json::json!({"inbound_calls": 100.0}),
                output: serde_json::json!({"workload_erlangs": 20.0}),
                reasoning: "100 calls x 360s / 1800s = 20 Erlangs".to_string(),
            }],
            warnings: vec![],
            duration_us: 12,
        };

        let json = serde_json::to_string(&trace).unwrap();
        let parsed: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}
