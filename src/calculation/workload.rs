//! Offered load derivation.
//!
//! Converts an interval's forecast call volume into offered traffic in
//! Erlangs using the average handle time.

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, IntervalDemand, ModelParameters, OfferedLoad};

/// The result of deriving the workload for an interval.
#[derive(Debug, Clone)]
pub struct WorkloadResult {
    /// The offered load in Erlangs.
    pub offered_load: OfferedLoad,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Offered load in Erlangs: `inbound_calls * aht / (interval_length_minutes * 60)`.
///
/// # Examples
///
/// ```
/// use erlang_staffing::calculation::offered_load;
///
/// assert_eq!(offered_load(100.0, 360.0, 30.0), 20.0);
/// ```
pub fn offered_load(
    inbound_calls: f64,
    average_handle_time: f64,
    interval_length_minutes: f64,
) -> f64 {
    inbound_calls * average_handle_time / (interval_length_minutes * 60.0)
}

/// Derives the offered load for one interval.
///
/// # Arguments
///
/// * `demand` - The interval's forecast call volume
/// * `index` - Position of the interval in the forecast, used for labelling
/// * `parameters` - Model parameters supplying the average handle time
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns the offered load and an audit step, or `InvalidInterval` if the
/// call count is negative or not finite, or the interval length is not a
/// positive finite number of minutes.
pub fn calculate_workload(
    demand: &IntervalDemand,
    index: usize,
    parameters: &ModelParameters,
    step_number: u32,
) -> EngineResult<WorkloadResult> {
    let interval_id = demand.label(index);

    if !demand.inbound_calls.is_finite() || demand.inbound_calls < 0.0 {
        return Err(EngineError::InvalidInterval {
            interval_id,
            message: format!(
                "inbound_calls must be a non-negative number, got {}",
                demand.inbound_calls
            ),
        });
    }
    if !demand.interval_length_minutes.is_finite() || demand.interval_length_minutes <= 0.0 {
        return Err(EngineError::InvalidInterval {
            interval_id,
            message: format!(
                "interval_length_minutes must be a positive number, got {}",
                demand.interval_length_minutes
            ),
        });
    }

    let aht = parameters.average_handle_time_seconds();
    let erlangs = offered_load(demand.inbound_calls, aht, demand.interval_length_minutes);
    let interval_seconds = demand.interval_length_minutes * 60.0;

    let audit_step = AuditStep {
        step_number,
        rule_id: "workload_derivation".to_string(),
        rule_name: "Workload Derivation".to_string(),
        interval_id: interval_id.clone(),
        input: serde_json::json!({
            "inbound_calls": demand.inbound_calls,
            "average_handle_time_seconds": aht,
            "interval_length_minutes": demand.interval_length_minutes
        }),
        output: serde_json::json!({
            "workload_erlangs": erlangs
        }),
        reasoning: format!(
            "{} calls x {}s / {}s = {:.4} Erlangs",
            demand.inbound_calls, aht, interval_seconds, erlangs
        ),
    };

    Ok(WorkloadResult {
        offered_load: OfferedLoad::from_erlangs(erlangs),
        audit_step,
    })
}
