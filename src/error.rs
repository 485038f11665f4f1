//! Engine errors

use thiserror::Error;

/// Errors returned by catalog, override and promotion operations.
///
/// Plan shortages are not errors; they come back as notices on the plan.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("exercise {0:?} not found")]
    NotFound(String),

    #[error("duplicate exercise id: {0:?}")]
    DuplicateId(String),

    #[error("exercise {0:?} has an empty name")]
    EmptyName(String),

    #[error("invalid weight {weight} for exercise {id:?} (must be a non-negative number)")]
    InvalidWeight { id: String, weight: f64 },
}
