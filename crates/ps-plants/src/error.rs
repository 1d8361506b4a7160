//! Error types for plant construction and simulation runs.

use thiserror::Error;

/// Result type for plant operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors that can occur when building or running plants.
///
/// Stepping a plant never fails; only construction and run setup do.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlantError {
    /// Invalid argument provided to a constructor or runner.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Plant parameter out of range or non-finite.
    #[error(transparent)]
    Parameter(#[from] ps_core::CoreError),

    /// Control schedule that cannot produce finite inputs.
    #[error("Invalid control schedule: {what}")]
    InvalidSchedule { what: String },
}
