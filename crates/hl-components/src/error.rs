//! Error types for component construction.

use hl_network::NetworkError;
use thiserror::Error;

/// Errors raised while constructing components.
///
/// Construction-time contract violations (bad segment counts, invalid
/// directions, non-positive areas) are rejected here, before any equation
/// exists. Numerical trouble during evaluation is never caught locally:
/// it surfaces through the network as a non-finite residual.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Invalid parameter: {what}")]
    InvalidParam { what: &'static str },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;
