//! Calculation logic for the staffing engine.
//!
//! This module contains the Erlang C queueing model, offered load
//! derivation, the minimum agent search built on the model, the shrinkage
//! adjustment, and the batch forecast that chains them per interval.
//! Everything here is pure: no I/O, no logging, no shared state.

mod agent_search;
mod erlang_c;
mod forecast;
mod shrinkage;
mod workload;

pub use agent_search::{
    AgentSearchResult, DEFAULT_AGENT_SEARCH_CAP, MAX_AGENT_SEARCH_CAP, find_minimum_agents, meets_service_level,
    minimum_agents, search_agents,
};
pub use erlang_c::{erlang_c_probability, wait_probability};
pub use forecast::{ForecastInput, forecast, forecast_with, run_forecast};
pub use shrinkage::{ShrinkageAdjustment, apply_shrinkage, calculate_shrinkage};
pub use workload::{WorkloadResult, calculate_workload, offered_load};
