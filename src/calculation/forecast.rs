//! Batch staffing forecast.
//!
//! Solves every interval of a forecast independently: derive the offered
//! load, search for the minimum agent count, then apply shrinkage. Output
//! order always matches input order.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::config::AgentSearchConfig;
use crate::error::EngineResult;
use crate::models::{
    AppliedParameters, AuditStep, AuditTrace, AuditWarning, ForecastResult, ForecastTotals,
    IntervalDemand, ModelParameters, ServiceLevelTarget, ShrinkagePolicy, StaffingResult,
};

use super::agent_search::search_agents;
use super::shrinkage::calculate_shrinkage;
use super::workload::calculate_workload;

/// Everything a full forecast run needs.
#[derive(Debug, Clone)]
pub struct ForecastInput {
    /// Interval rows, in the order results should be returned.
    pub intervals: Vec<IntervalDemand>,
    /// Handle time and target answer time.
    pub parameters: ModelParameters,
    /// Service level target.
    pub target: ServiceLevelTarget,
    /// Shrinkage policy.
    pub shrinkage: ShrinkagePolicy,
    /// Agent search configuration.
    pub search: AgentSearchConfig,
}

struct IntervalSolution {
    result: StaffingResult,
    steps: [AuditStep; 3],
}

fn solve_interval(
    demand: &IntervalDemand,
    index: usize,
    parameters: &ModelParameters,
    target: ServiceLevelTarget,
    shrinkage: ShrinkagePolicy,
    search: &AgentSearchConfig,
    step_number: u32,
) -> EngineResult<IntervalSolution> {
    let interval_id = demand.label(index);

    let workload = calculate_workload(demand, index, parameters, step_number)?;
    let agents = search_agents(
        workload.offered_load,
        &interval_id,
        parameters,
        target,
        search,
        step_number + 1,
    )?;
    let adjustment = calculate_shrinkage(agents.agents, &interval_id, shrinkage, step_number + 2)?;

    Ok(IntervalSolution {
        result: StaffingResult {
            interval_id,
            interval_start: demand.interval_start,
            inbound_calls: demand.inbound_calls,
            workload_erlangs: workload.offered_load.erlangs(),
            agents_no_shrinkage: agents.agents,
            agents_with_shrinkage: adjustment.agents_with_shrinkage,
            resolved: agents.resolved,
        },
        steps: [workload.audit_step, agents.audit_step, adjustment.audit_step],
    })
}

/// Solves a batch of intervals with the default agent search.
///
/// Each interval is solved independently; the first invalid interval
/// aborts the batch with its error.
///
/// # Examples
///
/// ```
/// use erlang_staffing::calculation::forecast;
/// use erlang_staffing::models::{IntervalDemand, ModelParameters, ServiceLevelTarget, ShrinkagePolicy};
///
/// let demands = vec![IntervalDemand::new(100.0, 30.0), IntervalDemand::new(0.0, 30.0)];
/// let results = forecast(
///     &demands,
///     &ModelParameters::new(360.0, 30.0).unwrap(),
///     ServiceLevelTarget::from_percent(80.0).unwrap(),
///     ShrinkagePolicy::from_percent(17.0).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(results[0].workload_erlangs, 20.0);
/// assert_eq!(results[0].agents_no_shrinkage, 1);
/// assert_eq!(results[0].agents_with_shrinkage, 2);
/// assert_eq!(results[1].agents_no_shrinkage, 100);
/// assert!(!results[1].resolved);
/// ```
pub fn forecast(
    demands: &[IntervalDemand],
    parameters: &ModelParameters,
    target: ServiceLevelTarget,
    shrinkage: ShrinkagePolicy,
) -> EngineResult<Vec<StaffingResult>> {
    forecast_with(
        demands,
        parameters,
        target,
        shrinkage,
        &AgentSearchConfig::default(),
    )
}

/// Solves a batch of intervals with an explicit agent search configuration.
pub fn forecast_with(
    demands: &[IntervalDemand],
    parameters: &ModelParameters,
    target: ServiceLevelTarget,
    shrinkage: ShrinkagePolicy,
    search: &AgentSearchConfig,
) -> EngineResult<Vec<StaffingResult>> {
    demands
        .iter()
        .enumerate()
        .map(|(index, demand)| {
            solve_interval(demand, index, parameters, target, shrinkage, search, 1)
                .map(|solution| solution.result)
        })
        .collect()
}

/// Runs a full forecast, producing totals and an audit trace.
///
/// Every interval contributes three audit steps (`workload_derivation`,
/// `agent_search`, `shrinkage_adjustment`). Intervals whose search hits
/// the cap add an `UNRESOLVED_STAFFING` warning.
pub fn run_forecast(input: &ForecastInput) -> EngineResult<ForecastResult> {
    let start_time = Instant::now();
    input.search.validate()?;

    let mut results = Vec::with_capacity(input.intervals.len());
    let mut steps = Vec::with_capacity(input.intervals.len() * 3);
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    for (index, demand) in input.intervals.iter().enumerate() {
        let solution = solve_interval(
            demand,
            index,
            &input.parameters,
            input.target,
            input.shrinkage,
            &input.search,
            step_number,
        )?;
        step_number += solution.steps.len() as u32;

        if !solution.result.resolved {
            warnings.push(AuditWarning {
                code: "UNRESOLVED_STAFFING".to_string(),
                message: format!(
                    "Interval '{}' ({:.4} Erlangs) did not meet the service level below {} agents; the cap is reported",
                    solution.result.interval_id, solution.result.workload_erlangs, input.search.cap
                ),
                severity: "high".to_string(),
            });
        }

        steps.extend(solution.steps);
        results.push(solution.result);
    }

    let totals = ForecastTotals::from_results(&results);

    Ok(ForecastResult {
        forecast_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        parameters: AppliedParameters {
            average_handle_time_seconds: input.parameters.average_handle_time_seconds(),
            target_answer_time_seconds: input.parameters.target_answer_time_seconds(),
            target_service_level: input.target.probability(),
            shrinkage_fraction: input.shrinkage.fraction(),
            search_cap: input.search.cap,
        },
        intervals: results,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SearchStrategy, ServiceLevelMode};
    use crate::error::EngineError;

    fn parameters() -> ModelParameters {
        ModelParameters::new(360.0, 30.0).unwrap()
    }

    fn target() -> ServiceLevelTarget {
        ServiceLevelTarget::from_percent(80.0).unwrap()
    }

    fn shrinkage() -> ShrinkagePolicy {
        ShrinkagePolicy::from_percent(17.0).unwrap()
    }

    fn answered_within_target() -> AgentSearchConfig {
        AgentSearchConfig {
            service_level_mode: ServiceLevelMode::AnsweredWithinTarget,
            ..AgentSearchConfig::default()
        }
    }

    fn sample_day() -> Vec<IntervalDemand> {
        [12.0, 40.0, 100.0, 160.0, 75.0, 3.0]
            .into_iter()
            .enumerate()
            .map(|(i, calls)| IntervalDemand::new(calls, 30.0).with_id(format!("slot_{}", i)))
            .collect()
    }

    /// FC-001: end-to-end reference interval
    #[test]
    fn test_reference_interval_end_to_end() {
        let demands = vec![IntervalDemand::new(100.0, 30.0)];

        let legacy = forecast(&demands, &parameters(), target(), shrinkage()).unwrap();
        assert_eq!(legacy[0].workload_erlangs, 20.0);
        assert_eq!(legacy[0].agents_no_shrinkage, 1);
        assert_eq!(legacy[0].agents_with_shrinkage, 2);
        assert!(legacy[0].resolved);

        let answered = forecast_with(
            &demands,
            &parameters(),
            target(),
            shrinkage(),
            &answered_within_target(),
        )
        .unwrap();
        assert_eq!(answered[0].agents_no_shrinkage, 25);
        assert_eq!(answered[0].agents_with_shrinkage, 31);
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let demands = sample_day();
        let results = forecast_with(
            &demands,
            &parameters(),
            target(),
            shrinkage(),
            &answered_within_target(),
        )
        .unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.interval_id.as_str()).collect();
        assert_eq!(ids, ["slot_0", "slot_1", "slot_2", "slot_3", "slot_4", "slot_5"]);
        for (result, demand) in results.iter().zip(&demands) {
            assert_eq!(result.inbound_calls, demand.inbound_calls);
        }
    }

    #[test]
    fn test_intervals_are_solved_independently() {
        let demands = sample_day();
        let batch = forecast(&demands, &parameters(), target(), shrinkage()).unwrap();

        for (demand, expected) in demands.iter().zip(&batch) {
            let single = forecast(
                std::slice::from_ref(demand),
                &parameters(),
                target(),
                shrinkage(),
            )
            .unwrap();
            assert_eq!(&single[0], expected);
        }
    }

    #[test]
    fn test_forecast_is_idempotent() {
        let demands = sample_day();
        let first = forecast(&demands, &parameters(), target(), shrinkage()).unwrap();
        let second = forecast(&demands, &parameters(), target(), shrinkage()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shrinkage_invariant_holds_for_every_interval() {
        let results = forecast_with(
            &sample_day(),
            &parameters(),
            target(),
            shrinkage(),
            &answered_within_target(),
        )
        .unwrap();
        for result in results {
            assert_eq!(
                result.agents_with_shrinkage,
                (f64::from(result.agents_no_shrinkage) / 0.83).ceil() as u32
            );
            assert!(result.agents_with_shrinkage >= result.agents_no_shrinkage);
        }
    }

    #[test]
    fn test_empty_forecast_is_empty() {
        let results = forecast(&[], &parameters(), target(), shrinkage()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_interval_aborts_batch() {
        let demands = vec![
            IntervalDemand::new(10.0, 30.0),
            IntervalDemand::new(10.0, 0.0).with_id("broken"),
        ];
        match forecast(&demands, &parameters(), target(), shrinkage()) {
            Err(EngineError::InvalidInterval { interval_id, .. }) => {
                assert_eq!(interval_id, "broken")
            }
            other => panic!("Expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_run_forecast_builds_trace_and_totals() {
        let input = ForecastInput {
            intervals: sample_day(),
            parameters: parameters(),
            target: target(),
            shrinkage: shrinkage(),
            search: AgentSearchConfig {
                strategy: SearchStrategy::Binary,
                ..answered_within_target()
            },
        };

        let result = run_forecast(&input).unwrap();

        assert_eq!(result.intervals.len(), 6);
        assert_eq!(result.totals.interval_count, 6);
        assert_eq!(result.totals.total_inbound_calls, 390.0);
        assert_eq!(result.totals.peak_workload_erlangs, 32.0);
        assert_eq!(result.totals.unresolved_intervals, 0);
        assert_eq!(result.audit_trace.steps.len(), 18);
        assert!(result.audit_trace.warnings.is_empty());
        assert_eq!(result.parameters.search_cap, 100);
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));

        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, (1..=18).collect::<Vec<u32>>());
        assert_eq!(result.audit_trace.steps[0].rule_id, "workload_derivation");
        assert_eq!(result.audit_trace.steps[1].rule_id, "agent_search");
        assert_eq!(result.audit_trace.steps[2].rule_id, "shrinkage_adjustment");
    }

    #[test]
    fn test_run_forecast_warns_on_unresolved_interval() {
        let input = ForecastInput {
            intervals: vec![IntervalDemand::new(5.0, 30.0).with_id("quiet")],
            parameters: parameters(),
            target: target(),
            shrinkage: shrinkage(),
            search: AgentSearchConfig::default(),
        };

        let result = run_forecast(&input).unwrap();

        assert_eq!(result.intervals[0].workload_erlangs, 1.0);
        assert_eq!(result.intervals[0].agents_no_shrinkage, 1);

        let quiet = ForecastInput {
            intervals: vec![IntervalDemand::new(1.0, 30.0).with_id("quiet")],
            ..input
        };
        let result = run_forecast(&quiet).unwrap();

        assert_eq!(result.intervals[0].agents_no_shrinkage, 100);
        assert_eq!(result.intervals[0].agents_with_shrinkage, 121);
        assert_eq!(result.totals.unresolved_intervals, 1);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "UNRESOLVED_STAFFING");
        assert!(result.audit_trace.warnings[0].message.contains("quiet"));
    }
}
