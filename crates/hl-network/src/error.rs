//! Error types for network assembly and evaluation.

use hl_core::{CompId, VarId};
use thiserror::Error;

/// Errors from building or evaluating a network.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("A connection needs at least two ports")]
    ConnectionTooSmall,

    #[error("Dangling {kind} port (flow variable {var:?}) is not part of any connection")]
    DanglingPort { kind: &'static str, var: VarId },

    #[error("Cannot alias variables of different kinds ({a:?}, {b:?})")]
    AliasKindMismatch { a: VarId, b: VarId },

    #[error("Structurally underdetermined system: {unknowns} unknowns, {equations} equations")]
    Underdetermined { unknowns: usize, equations: usize },

    #[error("Structurally overdetermined system: {unknowns} unknowns, {equations} equations")]
    Overdetermined { unknowns: usize, equations: usize },

    #[error("Component {comp:?} ({name}) wrote {got} residuals, declared {expected}")]
    ResidualCountMismatch {
        comp: CompId,
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Non-finite residual from component {comp:?} ({name}) at local equation {index}")]
    NonFiniteResidual {
        comp: CompId,
        name: String,
        index: usize,
    },

    #[error("State vector length mismatch: expected {expected}, got {got}")]
    StateLenMismatch { expected: usize, got: usize },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
