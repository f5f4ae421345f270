//! Scalar model parameters.
//!
//! These value types carry the scalar inputs to every staffing computation.
//! Each constructor validates its mathematical domain so that the
//! calculation layer never sees a zero handle time or a saturated shrinkage.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Parameters shared by every wait probability computation.
///
/// # Example
///
/// ```
/// use erlang_staffing::models::ModelParameters;
///
/// let params = ModelParameters::new(360.0, 30.0).unwrap();
/// assert_eq!(params.average_handle_time_seconds(), 360.0);
/// assert_eq!(params.target_answer_time_seconds(), 30.0);
///
/// assert!(ModelParameters::new(0.0, 30.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParameters {
    average_handle_time_seconds: f64,
    target_answer_time_seconds: f64,
}

impl ModelParameters {
    /// Creates validated model parameters.
    ///
    /// Returns `InvalidParameter` if the average handle time is not a
    /// positive finite number, or the target answer time is negative or
    /// not finite.
    pub fn new(
        average_handle_time_seconds: f64,
        target_answer_time_seconds: f64,
    ) -> EngineResult<Self> {
        if !average_handle_time_seconds.is_finite() || average_handle_time_seconds <= 0.0 {
            return Err(EngineError::invalid_parameter(
                "average_handle_time_seconds",
                format!(
                    "must be a positive number of seconds, got {}",
                    average_handle_time_seconds
                ),
            ));
        }
        if !target_answer_time_seconds.is_finite() || target_answer_time_seconds < 0.0 {
            return Err(EngineError::invalid_parameter(
                "target_answer_time_seconds",
                format!(
                    "must be zero or a positive number of seconds, got {}",
                    target_answer_time_seconds
                ),
            ));
        }
        Ok(Self {
            average_handle_time_seconds,
            target_answer_time_seconds,
        })
    }

    /// Mean duration of a single contact, including after-call work.
    pub fn average_handle_time_seconds(&self) -> f64 {
        self.average_handle_time_seconds
    }

    /// Answer time within which a contact counts towards the service level.
    pub fn target_answer_time_seconds(&self) -> f64 {
        self.target_answer_time_seconds
    }
}

/// Target probability that a contact is answered within the target time.
///
/// Stored as a probability in `(0, 1]`; configuration and the API speak in
/// percentages, so [`ServiceLevelTarget::from_percent`] is the usual entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ServiceLevelTarget(f64);

impl ServiceLevelTarget {
    /// Creates a target from a probability in `(0, 1]`.
    pub fn new(probability: f64) -> EngineResult<Self> {
        if !probability.is_finite() || probability <= 0.0 || probability > 1.0 {
            return Err(EngineError::invalid_parameter(
                "target_service_level",
                format!("must be a probability in (0, 1], got {}", probability),
            ));
        }
        Ok(Self(probability))
    }

    /// Creates a target from a percentage, e.g. `80.0` for 80%.
    ///
    /// ```
    /// use erlang_staffing::models::ServiceLevelTarget;
    ///
    /// let target = ServiceLevelTarget::from_percent(80.0).unwrap();
    /// assert!((target.probability() - 0.8).abs() < 1e-12);
    /// ```
    pub fn from_percent(percent: f64) -> EngineResult<Self> {
        Self::new(percent / 100.0)
    }

    /// The target as a probability.
    pub fn probability(&self) -> f64 {
        self.0
    }
}

/// Fraction of paid agent time lost to breaks, training and similar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShrinkagePolicy(f64);

impl ShrinkagePolicy {
    /// Creates a policy from a fraction in `[0, 1)`.
    ///
    /// A fraction of one or more is rejected with `ShrinkageSaturation`;
    /// negative or non-finite values with `InvalidParameter`.
    pub fn new(fraction: f64) -> EngineResult<Self> {
        validate_shrinkage_fraction(fraction)?;
        Ok(Self(fraction))
    }

    /// Creates a policy from a percentage, e.g. `17.0` for 17%.
    pub fn from_percent(percent: f64) -> EngineResult<Self> {
        Self::new(percent / 100.0)
    }

    /// The shrinkage as a fraction of paid time.
    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Staffing inflation factor, `1 / (1 - fraction)`.
    ///
    /// ```
    /// use erlang_staffing::models::ShrinkagePolicy;
    ///
    /// let policy = ShrinkagePolicy::new(0.5).unwrap();
    /// assert_eq!(policy.inflation_factor(), 2.0);
    /// ```
    pub fn inflation_factor(&self) -> f64 {
        1.0 / (1.0 - self.0)
    }
}

/// Checks that a shrinkage fraction lies in `[0, 1)`.
pub(crate) fn validate_shrinkage_fraction(fraction: f64) -> EngineResult<()> {
    if fraction.is_nan() || fraction < 0.0 {
        return Err(EngineError::invalid_parameter(
            "shrinkage_fraction",
            format!("must be a fraction in [0, 1), got {}", fraction),
        ));
    }
    if fraction >= 1.0 {
        return Err(EngineError::ShrinkageSaturation { fraction });
    }
    Ok(())
}
