//! Implicit (backward) Euler for the assembled DAE.

use crate::error::SimResult;
use hl_network::Network;
use hl_solver::{NewtonConfig, finite_difference_jacobian, newton_solve};
use nalgebra::DVector;

/// Backward-Euler DAE integrator.
///
/// One step solves `F(t+h, x₁, (x₁−x₀)/h) = 0` for x₁ with Newton;
/// derivatives are only formed for differential slots. First order but
/// stiffly stable, which the compressibility-dominated networks here
/// require — an explicit scheme cannot advance the algebraic constraints
/// at all.
#[derive(Clone, Debug, Default)]
pub struct ImplicitEuler {
    pub newton: NewtonConfig,
}

impl ImplicitEuler {
    pub fn new(newton: NewtonConfig) -> Self {
        Self { newton }
    }

    /// Advance the state from t by one step of size h.
    pub fn step(
        &self,
        network: &Network,
        t: f64,
        x0: &DVector<f64>,
        h: f64,
    ) -> SimResult<DVector<f64>> {
        let n = network.n_slots();

        let residual = |z: &DVector<f64>| -> hl_solver::SolverResult<DVector<f64>> {
            let mut zdot = DVector::zeros(n);
            for slot in 0..n {
                if network.is_differential(slot) {
                    zdot[slot] = (z[slot] - x0[slot]) / h;
                }
            }
            let mut r = DVector::zeros(network.n_equations());
            network.residual(t + h, z, &zdot, &mut r)?;
            Ok(r)
        };
        let jacobian =
            |z: &DVector<f64>| finite_difference_jacobian(z, &residual, self.newton.fd_epsilon);

        let result = newton_solve(x0.clone(), &residual, jacobian, &self.newton)?;
        Ok(result.x)
    }
}
