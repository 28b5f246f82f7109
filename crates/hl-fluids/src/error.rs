//! Error types for fluid property models.

use thiserror::Error;

/// Errors that can occur when constructing or evaluating fluid models.
#[derive(Error, Debug, Clone)]
pub enum FluidError {
    #[error("Non-physical fluid parameter: {what}")]
    NonPhysical { what: &'static str },
}

pub type FluidResult<T> = Result<T, FluidError>;
