//! Configuration types for the staffing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::{DEFAULT_AGENT_SEARCH_CAP, MAX_AGENT_SEARCH_CAP};
use crate::error::{EngineError, EngineResult};
use crate::models::{ModelParameters, ServiceLevelTarget, ShrinkagePolicy};

/// Metadata about the engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the configuration (e.g. the contact centre).
    pub name: String,
    /// Version of the configuration.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// A complete set of scalar forecast parameters.
///
/// Service level and shrinkage are expressed as percentages, the way
/// planners enter them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Average handle time in seconds.
    pub average_handle_time_seconds: f64,
    /// Interval length in minutes, used when an interval does not carry one.
    pub interval_length_minutes: f64,
    /// Target service level in percent.
    pub target_service_level_percent: f64,
    /// Target answer time in seconds.
    pub target_answer_time_seconds: f64,
    /// Shrinkage in percent of paid time.
    pub shrinkage_percent: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            average_handle_time_seconds: 360.0,
            interval_length_minutes: 30.0,
            target_service_level_percent: 80.0,
            target_answer_time_seconds: 30.0,
            shrinkage_percent: 17.0,
        }
    }
}

impl ParameterSet {
    /// Returns a copy with every `Some` override applied.
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> Self {
        Self {
            average_handle_time_seconds: overrides
                .average_handle_time_seconds
                .unwrap_or(self.average_handle_time_seconds),
            interval_length_minutes: overrides
                .interval_length_minutes
                .unwrap_or(self.interval_length_minutes),
            target_service_level_percent: overrides
                .target_service_level_percent
                .unwrap_or(self.target_service_level_percent),
            target_answer_time_seconds: overrides
                .target_answer_time_seconds
                .unwrap_or(self.target_answer_time_seconds),
            shrinkage_percent: overrides.shrinkage_percent.unwrap_or(self.shrinkage_percent),
        }
    }

    /// Converts to validated model value types.
    pub fn to_model(&self) -> EngineResult<(ModelParameters, ServiceLevelTarget, ShrinkagePolicy)> {
        let parameters =
            ModelParameters::new(self.average_handle_time_seconds, self.target_answer_time_seconds)?;
        let target = ServiceLevelTarget::from_percent(self.target_service_level_percent)?;
        let shrinkage = ShrinkagePolicy::from_percent(self.shrinkage_percent)?;
        Ok((parameters, target, shrinkage))
    }
}

/// Partial parameter set; `None` fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    /// Average handle time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_handle_time_seconds: Option<f64>,
    /// Interval length in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_length_minutes: Option<f64>,
    /// Target service level in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_service_level_percent: Option<f64>,
    /// Target answer time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_answer_time_seconds: Option<f64>,
    /// Shrinkage in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shrinkage_percent: Option<f64>,
}

/// Inclusive range of accepted percentages.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PercentRange {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

impl PercentRange {
    /// Returns true when `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Planner-facing bounds on percentage inputs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ParameterLimits {
    /// Accepted service level percentages.
    pub service_level_percent: PercentRange,
    /// Accepted shrinkage percentages.
    pub shrinkage_percent: PercentRange,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            service_level_percent: PercentRange {
                min: 50.0,
                max: 100.0,
            },
            shrinkage_percent: PercentRange { min: 0.0, max: 50.0 },
        }
    }
}

impl ParameterLimits {
    /// Checks the percentage fields of a parameter set against the limits.
    pub fn check(&self, parameters: &ParameterSet) -> EngineResult<()> {
        let sl = parameters.target_service_level_percent;
        if !self.service_level_percent.contains(sl) {
            return Err(EngineError::invalid_parameter(
                "target_service_level_percent",
                format!(
                    "must be between {} and {}, got {}",
                    self.service_level_percent.min, self.service_level_percent.max, sl
                ),
            ));
        }
        let shrinkage = parameters.shrinkage_percent;
        if !self.shrinkage_percent.contains(shrinkage) {
            return Err(EngineError::invalid_parameter(
                "shrinkage_percent",
                format!(
                    "must be between {} and {}, got {}",
                    self.shrinkage_percent.min, self.shrinkage_percent.max, shrinkage
                ),
            ));
        }
        Ok(())
    }
}

/// Defaults configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Parameters used when a request does not override them.
    pub parameters: ParameterSet,
    /// Bounds on percentage inputs.
    #[serde(default)]
    pub limits: ParameterLimits,
}

/// How the minimum agent search walks candidate counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Scan `1, 2, …` until the predicate holds.
    #[default]
    Linear,
    /// Bisect over the monotone predicate; returns the same count as `Linear`.
    Binary,
}

/// Which service level predicate the agent search applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevelMode {
    /// `P(wait > t) >= target`.
    #[default]
    WaitProbability,
    /// `1 - P(wait > t) >= target`.
    AnsweredWithinTarget,
}

impl ServiceLevelMode {
    /// Short description of the predicate for audit reasoning.
    pub fn describe(&self) -> &'static str {
        match self {
            ServiceLevelMode::WaitProbability => "wait probability compared to target",
            ServiceLevelMode::AnsweredWithinTarget => "answered within target",
        }
    }
}

/// Agent search configuration from search.yaml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSearchConfig {
    /// Exclusive upper bound of the search, reported when unresolved.
    #[serde(default = "default_search_cap")]
    pub cap: u32,
    /// Search strategy.
    #[serde(default)]
    pub strategy: SearchStrategy,
    /// Service level predicate.
    #[serde(default)]
    pub service_level_mode: ServiceLevelMode,
}

fn default_search_cap() -> u32 {
    DEFAULT_AGENT_SEARCH_CAP
}

impl Default for AgentSearchConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_AGENT_SEARCH_CAP,
            strategy: SearchStrategy::Linear,
            service_level_mode: ServiceLevelMode::WaitProbability,
        }
    }
}

impl AgentSearchConfig {
    /// Rejects caps that leave no candidate agent count or exceed
    /// [`MAX_AGENT_SEARCH_CAP`].
    pub fn validate(&self) -> EngineResult<()> {
        if !(2..=MAX_AGENT_SEARCH_CAP).contains(&self.cap) {
            return Err(EngineError::invalid_parameter(
                "search_cap",
                format!(
                    "must be between 2 and {}, got {}",
                    MAX_AGENT_SEARCH_CAP, self.cap
                ),
            ));
        }
        Ok(())
    }
}

/// A named preset of parameter overrides, loaded from `profiles/*.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterProfile {
    /// Name the profile is requested by.
    pub name: String,
    /// What the profile is for.
    #[serde(default)]
    pub description: String,
    /// Overrides applied on top of the defaults.
    #[serde(default)]
    pub parameters: ParameterOverrides,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    defaults: DefaultsConfig,
    search: AgentSearchConfig,
    profiles: HashMap<String, ParameterProfile>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        defaults: DefaultsConfig,
        search: AgentSearchConfig,
        profiles: Vec<ParameterProfile>,
    ) -> Self {
        Self {
            metadata,
            defaults,
            search,
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.name.clone(), profile))
                .collect(),
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the defaults configuration.
    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    /// Returns the agent search configuration.
    pub fn search(&self) -> &AgentSearchConfig {
        &self.search
    }

    /// Returns all profiles by name.
    pub fn profiles(&self) -> &HashMap<String, ParameterProfile> {
        &self.profiles
    }
}
