//! Configuration loading and management for the staffing engine.
//!
//! This module provides functionality to load engine configurations from
//! YAML files: default forecast parameters, planner-facing limits, the agent
//! search configuration, and named parameter profiles.
//!
//! # Example
//!
//! ```no_run
//! use erlang_staffing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/contact_centre").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgentSearchConfig, DefaultsConfig, EngineConfig, EngineMetadata, ParameterLimits,
    ParameterOverrides, ParameterProfile, ParameterSet, PercentRange, SearchStrategy,
    ServiceLevelMode,
};
