//! Error types for solver operations.

use hl_network::NetworkError;
use thiserror::Error;

/// Errors from nonlinear solves.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Numeric failure: {what}")]
    Numeric { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SolverResult<T> = Result<T, SolverError>;
