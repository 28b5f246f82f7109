//! Error types for simulation runs.

use hl_network::NetworkError;
use hl_solver::SolverError;
use thiserror::Error;

/// Errors from time integration.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Integration step failed at t = {t} (step cut back to {dt})")]
    StepFailed { t: f64, dt: f64 },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
