//! Shrinkage adjustment.
//!
//! Inflates a raw agent requirement to cover the share of paid time agents
//! spend away from contact handling.

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ShrinkagePolicy, validate_shrinkage_fraction};

/// The result of applying shrinkage to an agent requirement.
#[derive(Debug, Clone)]
pub struct ShrinkageAdjustment {
    /// Agents required once shrinkage is accounted for.
    pub agents_with_shrinkage: u32,
    /// The inflation factor `1 / (1 - fraction)`.
    pub inflation_factor: f64,
    /// The audit step recording this adjustment.
    pub audit_step: AuditStep,
}

/// Applies shrinkage: `ceil(agents_no_shrinkage / (1 - shrinkage_fraction))`.
///
/// # Returns
///
/// The inflated agent count, or an error if the fraction is outside
/// `[0, 1)`: `ShrinkageSaturation` for one or more, `InvalidParameter` for
/// negative or NaN fractions.
///
/// # Examples
///
/// ```
/// use erlang_staffing::calculation::apply_shrinkage;
///
/// assert_eq!(apply_shrinkage(10, 0.17).unwrap(), 13);
/// assert_eq!(apply_shrinkage(10, 0.0).unwrap(), 10);
/// assert!(apply_shrinkage(10, 1.0).is_err());
/// ```
pub fn apply_shrinkage(agents_no_shrinkage: u32, shrinkage_fraction: f64) -> EngineResult<u32> {
    validate_shrinkage_fraction(shrinkage_fraction)?;
    let inflated = (f64::from(agents_no_shrinkage) / (1.0 - shrinkage_fraction)).ceil();
    if inflated > f64::from(u32::MAX) {
        return Err(EngineError::CalculationError {
            message: format!(
                "{} agents at shrinkage {} exceeds the representable agent count",
                agents_no_shrinkage, shrinkage_fraction
            ),
        });
    }
    Ok(inflated as u32)
}

/// Applies a shrinkage policy to one interval's requirement.
pub fn calculate_shrinkage(
    agents_no_shrinkage: u32,
    interval_id: &str,
    policy: ShrinkagePolicy,
    step_number: u32,
) -> EngineResult<ShrinkageAdjustment> {
    let agents_with_shrinkage = apply_shrinkage(agents_no_shrinkage, policy.fraction())?;
    let inflation_factor = policy.inflation_factor();

    let audit_step = AuditStep {
        step_number,
        rule_id: "shrinkage_adjustment".to_string(),
        rule_name: "Shrinkage Adjustment".to_string(),
        interval_id: interval_id.to_string(),
        input: serde_json::json!({
            "agents_no_shrinkage": agents_no_shrinkage,
            "shrinkage_fraction": policy.fraction()
        }),
        output: serde_json::json!({
            "agents_with_shrinkage": agents_with_shrinkage,
            "inflation_factor": inflation_factor
        }),
        reasoning: format!(
            "ceil({} / (1 - {})) = {}",
            agents_no_shrinkage,
            policy.fraction(),
            agents_with_shrinkage
        ),
    };

    Ok(ShrinkageAdjustment {
        agents_with_shrinkage,
        inflation_factor,
        audit_step,
    })
}
