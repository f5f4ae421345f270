//! Minimum agent search.
//!
//! This module finds the smallest number of agents for which the Erlang C
//! model satisfies a service level predicate. The search is bounded by a
//! cap; when no count below the cap satisfies the predicate the cap itself
//! is returned and the result is flagged as unresolved.
//!
//! Two predicates are available, selected by [`ServiceLevelMode`]:
//!
//! - [`ServiceLevelMode::WaitProbability`] compares the probability of
//!   waiting longer than the target answer time directly against the
//!   service level (`P(wait > t) >= target`). This is the established
//!   behaviour and the default.
//! - [`ServiceLevelMode::AnsweredWithinTarget`] compares the complement
//!   (`1 - P(wait > t) >= target`), i.e. the probability of being answered
//!   within the target time.

use crate::config::{AgentSearchConfig, SearchStrategy, ServiceLevelMode};
use crate::error::EngineResult;
use crate::models::{AuditStep, ModelParameters, OfferedLoad, ServiceLevelTarget};

use super::erlang_c::wait_probability;

/// Default upper bound of the agent search; also the unresolved sentinel.
pub const DEFAULT_AGENT_SEARCH_CAP: u32 = 100;

/// Largest accepted search cap. Each probe at `a` agents costs `a`
/// recurrence steps, so a linear scan is quadratic in the cap.
pub const MAX_AGENT_SEARCH_CAP: u32 = 10_000;

/// The outcome of an agent search.
#[derive(Debug, Clone)]
pub struct AgentSearchResult {
    /// The minimum agent count, or the cap when unresolved.
    pub agents: u32,
    /// Whether a count below the cap satisfied the predicate.
    pub resolved: bool,
    /// The model's wait probability at `agents`.
    pub wait_probability: f64,
    /// The audit step recording this search.
    pub audit_step: AuditStep,
}

/// Finds the minimum agent count with the established predicate.
///
/// Scans `1, 2, …, 99` and returns the first count for which
/// `wait_probability(traffic_intensity, a, target_answer_time, average_handle_time)`
/// is at least `target_service_level`. Returns `100` when no count in that
/// range qualifies.
///
/// Because the wait probability is exactly `1.0` whenever the load is at
/// least the agent count, any load of one Erlang or more is satisfied by a
/// single agent under this predicate.
///
/// # Examples
///
/// ```
/// use erlang_staffing::calculation::minimum_agents;
///
/// assert_eq!(minimum_agents(20.0, 30.0, 360.0, 0.80), 1);
/// assert_eq!(minimum_agents(0.5, 30.0, 360.0, 0.80), 100);
/// ```
pub fn minimum_agents(
    traffic_intensity: f64,
    target_answer_time: f64,
    average_handle_time: f64,
    target_service_level: f64,
) -> u32 {
    (1..DEFAULT_AGENT_SEARCH_CAP)
        .find(|&agents| {
            wait_probability(
                traffic_intensity,
                i64::from(agents),
                target_answer_time,
                average_handle_time,
            ) >= target_service_level
        })
        .unwrap_or(DEFAULT_AGENT_SEARCH_CAP)
}

/// Returns true when `agents` satisfy the service level under `mode`.
pub fn meets_service_level(
    traffic_intensity: f64,
    agents: u32,
    parameters: &ModelParameters,
    target: ServiceLevelTarget,
    mode: ServiceLevelMode,
) -> bool {
    let p = wait_probability(
        traffic_intensity,
        i64::from(agents),
        parameters.target_answer_time_seconds(),
        parameters.average_handle_time_seconds(),
    );
    match mode {
        ServiceLevelMode::WaitProbability => p >= target.probability(),
        ServiceLevelMode::AnsweredWithinTarget => 1.0 - p >= target.probability(),
    }
}

/// Finds the minimum agent count under an explicit search configuration.
///
/// Returns `(agents, resolved)`. Both strategies return the same count:
/// the binary strategy first tests a single agent, then bisects `2..cap`
/// on the assumption that the predicate only flips from unsatisfied to
/// satisfied as agents are added.
pub fn find_minimum_agents(
    traffic_intensity: f64,
    parameters: &ModelParameters,
    target: ServiceLevelTarget,
    config: &AgentSearchConfig,
) -> (u32, bool) {
    let satisfies = |agents: u32| {
        meets_service_level(
            traffic_intensity,
            agents,
            parameters,
            target,
            config.service_level_mode,
        )
    };

    let agents = match config.strategy {
        SearchStrategy::Linear => (1..config.cap).find(|&a| satisfies(a)).unwrap_or(config.cap),
        SearchStrategy::Binary => {
            if config.cap > 1 && satisfies(1) {
                1
            } else {
                let (mut low, mut high) = (2u32.min(config.cap), config.cap);
                while low < high {
                    let mid = low + (high - low) / 2;
                    if satisfies(mid) {
                        high = mid;
                    } else {
                        low = mid + 1;
                    }
                }
                low
            }
        }
    };

    (agents, agents < config.cap)
}

/// Searches for the minimum agent count for one interval.
///
/// # Arguments
///
/// * `load` - The interval's offered load
/// * `interval_id` - Label of the interval, recorded in the audit step
/// * `parameters` - Handle time and target answer time
/// * `target` - The service level target
/// * `config` - Search cap, strategy and predicate
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns an `AgentSearchResult`, or `InvalidParameter` if the search
/// configuration is invalid. An unresolved search is not an error.
pub fn search_agents(
    load: OfferedLoad,
    interval_id: &str,
    parameters: &ModelParameters,
    target: ServiceLevelTarget,
    config: &AgentSearchConfig,
    step_number: u32,
) -> EngineResult<AgentSearchResult> {
    config.validate()?;

    let erlangs = load.erlangs();
    let (agents, resolved) = find_minimum_agents(erlangs, parameters, target, config);
    let p = wait_probability(
        erlangs,
        i64::from(agents),
        parameters.target_answer_time_seconds(),
        parameters.average_handle_time_seconds(),
    );

    let reasoning = if resolved {
        format!(
            "{:.4} Erlangs: {} agents give P(wait > {}s) = {:.4}, meeting the {}% target ({})",
            erlangs,
            agents,
            parameters.target_answer_time_seconds(),
            p,
            target.probability() * 100.0,
            config.service_level_mode.describe()
        )
    } else {
        format!(
            "{:.4} Erlangs: no agent count below the cap of {} met the {}% target ({}); reporting the cap",
            erlangs,
            config.cap,
            target.probability() * 100.0,
            config.service_level_mode.describe()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "agent_search".to_string(),
        rule_name: "Minimum Agent Search".to_string(),
        interval_id: interval_id.to_string(),
        input: serde_json::json!({
            "workload_erlangs": erlangs,
            "target_service_level": target.probability(),
            "target_answer_time_seconds": parameters.target_answer_time_seconds(),
            "average_handle_time_seconds": parameters.average_handle_time_seconds(),
            "search_cap": config.cap,
            "strategy": config.strategy,
            "service_level_mode": config.service_level_mode
        }),
        output: serde_json::json!({
            "agents": agents,
            "resolved": resolved,
            "wait_probability": p
        }),
        reasoning,
    };

    Ok(AgentSearchResult {
        agents,
        resolved,
        wait_probability: p,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;

    fn parameters() -> ModelParameters {
        ModelParameters::new(360.0, 30.0).unwrap()
    }

    fn target(p: f64) -> ServiceLevelTarget {
        ServiceLevelTarget::new(p).unwrap()
    }

    fn config(strategy: SearchStrategy, mode: ServiceLevelMode) -> AgentSearchConfig {
        AgentSearchConfig {
            cap: DEFAULT_AGENT_SEARCH_CAP,
            strategy,
            service_level_mode: mode,
        }
    }

    /// AS-001: any load of one Erlang or more is met by one agent
    #[test]
    fn test_wait_probability_mode_returns_one_for_heavy_load() {
        assert_eq!(minimum_agents(20.0, 30.0, 360.0, 0.80), 1);
        assert_eq!(minimum_agents(1.0, 30.0, 360.0, 0.80), 1);
        assert_eq!(minimum_agents(0.9, 30.0, 360.0, 0.80), 1);
    }

    /// AS-002: light load never reaches the target and saturates at the cap
    #[test]
    fn test_wait_probability_mode_saturates_for_light_load() {
        assert_eq!(minimum_agents(0.5, 30.0, 360.0, 0.80), 100);
        assert_eq!(minimum_agents(0.0, 30.0, 360.0, 0.80), 100);
    }

    /// AS-003: answered-within-target reference scenario
    #[test]
    fn test_answered_within_target_reference_values() {
        let cfg = config(SearchStrategy::Linear, ServiceLevelMode::AnsweredWithinTarget);
        let cases = [
            (20.0, 0.80, 25),
            (20.0, 0.90, 26),
            (10.0, 0.80, 14),
            (50.0, 0.80, 56),
            (90.0, 0.80, 98),
            (2.5, 0.80, 5),
            (0.5, 0.80, 2),
            (0.0, 0.80, 1),
        ];
        for (load, sl, expected) in cases {
            let (agents, resolved) = find_minimum_agents(load, &parameters(), target(sl), &cfg);
            assert_eq!(agents, expected, "load {} at {}", load, sl);
            assert!(resolved);
        }
    }

    #[test]
    fn test_answered_within_target_unresolved_at_cap() {
        let cfg = config(SearchStrategy::Linear, ServiceLevelMode::AnsweredWithinTarget);
        let (agents, resolved) = find_minimum_agents(95.0, &parameters(), target(0.8), &cfg);
        assert_eq!(agents, 100);
        assert!(!resolved);
    }

    #[test]
    fn test_default_config_matches_minimum_agents() {
        let cfg = AgentSearchConfig::default();
        for &load in &[0.0, 0.3, 0.5, 0.9, 1.0, 4.2, 20.0, 150.0] {
            let (agents, _) = find_minimum_agents(load, &parameters(), target(0.8), &cfg);
            assert_eq!(agents, minimum_agents(load, 30.0, 360.0, 0.8));
        }
    }

    #[test]
    fn test_configurable_cap_is_the_sentinel() {
        let cfg = AgentSearchConfig {
            cap: 20,
            strategy: SearchStrategy::Linear,
            service_level_mode: ServiceLevelMode::AnsweredWithinTarget,
        };
        let (agents, resolved) = find_minimum_agents(20.0, &parameters(), target(0.8), &cfg);
        assert_eq!(agents, 20);
        assert!(!resolved);
    }

    #[test]
    fn test_large_cap_resolves_large_loads() {
        let cfg = AgentSearchConfig {
            cap: 2000,
            strategy: SearchStrategy::Binary,
            service_level_mode: ServiceLevelMode::AnsweredWithinTarget,
        };
        let (agents, resolved) = find_minimum_agents(500.0, &parameters(), target(0.8), &cfg);
        assert!(resolved);
        assert!(agents > 500);
        assert!(meets_service_level(500.0, agents, &parameters(), target(0.8), cfg.service_level_mode));
        assert!(!meets_service_level(500.0, agents - 1, &parameters(), target(0.8), cfg.service_level_mode));
    }

    #[test]
    fn test_search_agents_records_audit_step() {
        let cfg = config(SearchStrategy::Linear, ServiceLevelMode::AnsweredWithinTarget);
        let result = search_agents(
            OfferedLoad::from_erlangs(20.0),
            "#1",
            &parameters(),
            target(0.8),
            &cfg,
            2,
        )
        .unwrap();

        assert_eq!(result.agents, 25);
        assert!(result.resolved);
        assert!((result.wait_probability - 0.137_849_079_183_711_23).abs() < 1e-12);
        assert_eq!(result.audit_step.rule_id, "agent_search");
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.output["agents"], 25);
        assert_eq!(result.audit_step.input["strategy"], "linear");
        assert_eq!(
            result.audit_step.input["service_level_mode"],
            "answered_within_target"
        );
        assert!(result.audit_step.reasoning.contains("25 agents"));
    }

    #[test]
    fn test_search_agents_unresolved_reasoning_mentions_cap() {
        let result = search_agents(
            OfferedLoad::from_erlangs(0.5),
            "#1",
            &parameters(),
            target(0.8),
            &AgentSearchConfig::default(),
            1,
        )
        .unwrap();

        assert_eq!(result.agents, 100);
        assert!(!result.resolved);
        assert!(result.audit_step.reasoning.contains("cap of 100"));
    }

    #[test]
    fn test_search_agents_rejects_degenerate_cap() {
        let cfg = AgentSearchConfig {
            cap: 1,
            ..AgentSearchConfig::default()
        };
        let result = search_agents(
            OfferedLoad::from_erlangs(2.0),
            "#1",
            &parameters(),
            target(0.8),
            &cfg,
            1,
        );
        assert!(matches!(result, Err(EngineError::InvalidParameter { .. })));
    }

    proptest! {
        #[test]
        fn prop_minimum_agents_is_first_satisfying_count(
            load in 0.0f64..120.0,
            sl in 0.5f64..=1.0,
            target_time in 0.0f64..120.0,
            aht in 30.0f64..600.0,
        ) {
            let found = minimum_agents(load, target_time, aht, sl);
            let brute = (1..100u32)
                .find(|&a| wait_probability(load, i64::from(a), target_time, aht) >= sl)
                .unwrap_or(100);
            prop_assert_eq!(found, brute);
            for a in 1..found.min(100) {
                prop_assert!(wait_probability(load, i64::from(a), target_time, aht) < sl);
            }
        }

        #[test]
        fn prop_binary_search_matches_linear_scan(
            load in 0.0f64..110.0,
            sl in 0.5f64..=0.99,
            target_time in 0.0f64..90.0,
            aht in 60.0f64..600.0,
            answered in any::<bool>(),
        ) {
            let mode = if answered {
                ServiceLevelMode::AnsweredWithinTarget
            } else {
                ServiceLevelMode::WaitProbability
            };
            let params = ModelParameters::new(aht, target_time).unwrap();
            let linear = find_minimum_agents(load, &params, target(sl), &config(SearchStrategy::Linear, mode));
            let binary = find_minimum_agents(load, &params, target(sl), &config(SearchStrategy::Binary, mode));
            prop_assert_eq!(linear, binary);
        }
    }
}
