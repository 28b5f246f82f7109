//! Linear-compressibility liquid model.

use crate::error::FluidResult;
use crate::model::{FluidModel, validation};
use hl_core::units::{Density, DynVisc, Pressure, constants::ATM_PA};

/// Isothermal liquid with linear compressibility.
///
/// Density follows `ρ(p) = ρ₀·(1 + (p − p₀)/β)` with constant bulk modulus
/// β and constant viscosity μ. This is the standard working-fluid model for
/// hydraulic circuits: liquids are stiff (β ~ GPa), so the linear term is
/// accurate over the full operating pressure range.
#[derive(Debug, Clone)]
pub struct LinearLiquid {
    name: String,
    /// Reference density at p₀ (kg/m³)
    rho_0: f64,
    /// Isothermal bulk modulus (Pa)
    beta: f64,
    /// Dynamic viscosity (Pa·s)
    mu: f64,
    /// Reference pressure (Pa)
    p_0: f64,
}

impl LinearLiquid {
    /// Create a new liquid model.
    pub fn new(
        name: impl Into<String>,
        rho_0: Density,
        beta: Pressure,
        mu: DynVisc,
        p_0: Pressure,
    ) -> FluidResult<Self> {
        validation::validate_density(rho_0.value)?;
        validation::validate_bulk_modulus(beta.value)?;
        validation::validate_viscosity(mu.value)?;
        Ok(Self {
            name: name.into(),
            rho_0: rho_0.value,
            beta: beta.value,
            mu: mu.value,
            p_0: p_0.value,
        })
    }

    /// Water at 20 °C, referenced to 1 atm.
    pub fn water() -> Self {
        Self {
            name: "water".into(),
            rho_0: 998.2,
            beta: 2.09e9,
            mu: 1.0e-3,
            p_0: ATM_PA,
        }
    }

    /// Typical mineral hydraulic oil (ISO VG 32 class), referenced to 1 atm.
    pub fn mineral_oil() -> Self {
        Self {
            name: "mineral oil".into(),
            rho_0: 870.0,
            beta: 1.5e9,
            mu: 0.028,
            p_0: ATM_PA,
        }
    }
}

impl FluidModel for LinearLiquid {
    fn name(&self) -> &str {
        &self.name
    }

    fn density(&self, p: f64) -> f64 {
        self.rho_0 * (1.0 + (p - self.p_0) / self.beta)
    }

    fn bulk_modulus(&self, _p: f64) -> f64 {
        self.beta
    }

    fn viscosity(&self, _p: f64) -> f64 {
        self.mu
    }
}
