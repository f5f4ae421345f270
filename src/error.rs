//! Error types for the staffing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every caller-input and configuration failure. A staffing requirement
//! that exceeds the agent search range is not an error; it is reported on
//! the result itself.

use thiserror::Error;

/// The main error type for the staffing engine.
///
/// # Example
///
/// ```
/// use erlang_staffing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/defaults.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/defaults.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A named parameter profile was not found in the configuration.
    #[error("Profile not found: {name}")]
    ProfileNotFound {
        /// The profile name that was requested.
        name: String,
    },

    /// A scalar model parameter was outside its valid domain.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        /// The parameter that was invalid.
        field: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// An interval demand row was invalid.
    #[error("Invalid interval '{interval_id}': {message}")]
    InvalidInterval {
        /// The identifier (or position) of the interval.
        interval_id: String,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// Shrinkage of 100% or more leaves no productive time.
    #[error("Shrinkage fraction {fraction} leaves no productive agent time")]
    ShrinkageSaturation {
        /// The rejected shrinkage fraction.
        fraction: f64,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidParameter`].
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
