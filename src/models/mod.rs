//! Core data models for the staffing engine.
//!
//! This module contains all the value types used throughout the engine.
//! None of them carry identity beyond their field values.

mod interval;
mod parameters;
mod staffing_result;

pub use interval::{IntervalDemand, OfferedLoad};
pub(crate) use parameters::validate_shrinkage_fraction;
pub use parameters::{ModelParameters, ServiceLevelTarget, ShrinkagePolicy};
pub use staffing_result::{
    AppliedParameters, AuditStep, AuditTrace, AuditWarning, ForecastResult, ForecastTotals,
    StaffingResult,
};
