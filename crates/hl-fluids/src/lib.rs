//! hl-fluids: fluid property models for hydroline.
//!
//! Provides:
//! - the `FluidModel` trait: density, bulk modulus and viscosity as pure
//!   functions of pressure (isothermal working fluids)
//! - `LinearLiquid`, a linear-compressibility liquid model
//! - the regularized Darcy friction-factor correlation used by tube
//!   components
//!
//! All models are `Send + Sync`; property evaluation never allocates.

pub mod error;
pub mod friction;
pub mod liquid;
pub mod model;

// Re-exports
pub use error::{FluidError, FluidResult};
pub use friction::{friction_factor, reynolds_number};
pub use liquid::LinearLiquid;
pub use model::FluidModel;
