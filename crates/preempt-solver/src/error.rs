//! Solver error types.
//!
//! Search outcomes (no preemption needed, infeasible node) are ordinary
//! [`crate::SolveResult`] values. Errors only arise at the input boundary:
//! unparseable quantities and invalid configuration.

use thiserror::Error;

/// Errors raised while preparing solver inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("invalid quantity {input:?}: {reason}")]
    InvalidQuantity { input: String, reason: String },

    #[error("invalid solver config: {0}")]
    InvalidConfig(String),
}

pub type SolverResult<T> = Result<T, SolverError>;
