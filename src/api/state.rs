//! Application state for the staffing API.
//!
//! The state holds the loaded configuration and turns a forecast request
//! into a fully resolved [`ForecastInput`].

use std::sync::Arc;

use crate::calculation::ForecastInput;
use crate::config::ConfigLoader;
use crate::error::EngineResult;

use super::request::ForecastRequest;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves a request against defaults, the requested profile and the
    /// request's own overrides.
    ///
    /// Intervals without a length take the resolved default length. The
    /// request's search configuration, when present, replaces the
    /// configured one.
    pub fn resolve_forecast(&self, request: ForecastRequest) -> EngineResult<ForecastInput> {
        let resolved = self
            .config
            .resolve_parameters(request.profile.as_deref(), &request.parameters)?;
        let (parameters, target, shrinkage) = resolved.to_model()?;

        let search = request.search.unwrap_or(*self.config.search());
        search.validate()?;

        let intervals = request
            .intervals
            .into_iter()
            .map(|interval| interval.into_demand(resolved.interval_length_minutes))
            .collect();

        Ok(ForecastInput {
            intervals,
            parameters,
            target,
            shrinkage,
            search,
        })
    }
}
