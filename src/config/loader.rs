//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AgentSearchConfig, DefaultsConfig, EngineConfig, EngineMetadata, ParameterOverrides,
    ParameterProfile, ParameterSet,
};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and resolves forecast parameters against defaults and profiles.
///
/// # Directory Structure
///
/// ```text
/// config/contact_centre/
/// ├── engine.yaml      # Configuration metadata
/// ├── defaults.yaml    # Default parameters and percentage limits
/// ├── search.yaml      # Agent search cap, strategy and predicate
/// └── profiles/        # Optional named parameter presets
///     └── retail_sales.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use erlang_staffing::config::{ConfigLoader, ParameterOverrides};
///
/// let loader = ConfigLoader::load("./config/contact_centre").unwrap();
/// let parameters = loader
///     .resolve_parameters(Some("retail_sales"), &ParameterOverrides::default())
///     .unwrap();
/// println!("AHT: {}s", parameters.average_handle_time_seconds);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - A required file is missing (`ConfigNotFound`)
    /// - A file contains invalid YAML or an invalid value (`ConfigParseError`)
    ///
    /// A missing `profiles/` directory means no profiles.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;

        let defaults_path = path.join("defaults.yaml");
        let defaults = Self::load_yaml::<DefaultsConfig>(&defaults_path)?;
        defaults
            .limits
            .check(&defaults.parameters)
            .and_then(|_| defaults.parameters.to_model().map(|_| ()))
            .map_err(|e| EngineError::ConfigParseError {
                path: defaults_path.display().to_string(),
                message: e.to_string(),
            })?;

        let search_path = path.join("search.yaml");
        let search = Self::load_yaml::<AgentSearchConfig>(&search_path)?;
        search.validate().map_err(|e| EngineError::ConfigParseError {
            path: search_path.display().to_string(),
            message: e.to_string(),
        })?;

        let profiles = Self::load_profiles(&path.join("profiles"))?;

        Ok(Self {
            config: EngineConfig::new(metadata, defaults, search, profiles),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all profile files from the profiles directory.
    fn load_profiles(profiles_dir: &Path) -> EngineResult<Vec<ParameterProfile>> {
        if !profiles_dir.exists() {
            return Ok(Vec::new());
        }

        let profiles_dir_str = profiles_dir.display().to_string();
        let entries = fs::read_dir(profiles_dir).map_err(|_| EngineError::ConfigNotFound {
            path: profiles_dir_str.clone(),
        })?;

        let mut profiles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: profiles_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                profiles.push(Self::load_yaml::<ParameterProfile>(&path)?);
            }
        }

        Ok(profiles)
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the default parameters.
    pub fn defaults(&self) -> &ParameterSet {
        &self.config.defaults().parameters
    }

    /// Returns the agent search configuration.
    pub fn search(&self) -> &AgentSearchConfig {
        self.config.search()
    }

    /// Gets a profile by its name.
    ///
    /// Returns `ProfileNotFound` if no profile has that name.
    pub fn get_profile(&self, name: &str) -> EngineResult<&ParameterProfile> {
        self.config
            .profiles()
            .get(name)
            .ok_or_else(|| EngineError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Resolves a complete parameter set.
    ///
    /// Layers, lowest precedence first: defaults, the named profile (if
    /// any), then the explicit overrides. The result is checked against
    /// the configured percentage limits.
    pub fn resolve_parameters(
        &self,
        profile: Option<&str>,
        overrides: &ParameterOverrides,
    ) -> EngineResult<ParameterSet> {
        let mut resolved = *self.defaults();
        if let Some(name) = profile {
            resolved = resolved.with_overrides(&self.get_profile(name)?.parameters);
        }
        resolved = resolved.with_overrides(overrides);

        self.config.defaults().limits.check(&resolved)?;
        Ok(resolved)
    }
}
