//! Consistent DAE initialization.
//!
//! Differential states are pinned at their declared initial values; the
//! unknowns are the algebraic slots plus the time derivatives of the
//! differential slots. For an index-1 system this split is square (the
//! network guarantees one equation per slot), and Newton drives the full
//! residual to zero.

use crate::error::SolverResult;
use crate::jacobian::finite_difference_jacobian;
use crate::newton::{NewtonConfig, newton_solve};
use hl_network::Network;
use nalgebra::DVector;

/// A consistent starting point for integration.
pub struct InitialState {
    pub x: DVector<f64>,
    pub xdot: DVector<f64>,
}

/// Solve for a consistent initial state at t = 0.
pub fn initialize(network: &Network, config: &NewtonConfig) -> SolverResult<InitialState> {
    let n = network.n_slots();
    let x_init = network.initial_state();

    let algebraic: Vec<usize> = (0..n).filter(|&s| !network.is_differential(s)).collect();
    let differential: Vec<usize> = (0..n).filter(|&s| network.is_differential(s)).collect();

    // Unknown layout: algebraic slot values, then differential derivatives.
    let assemble = |w: &DVector<f64>| -> (DVector<f64>, DVector<f64>) {
        let mut x = x_init.clone();
        let mut xdot = DVector::zeros(n);
        for (k, &s) in algebraic.iter().enumerate() {
            x[s] = w[k];
        }
        for (k, &s) in differential.iter().enumerate() {
            xdot[s] = w[algebraic.len() + k];
        }
        (x, xdot)
    };

    let residual = |w: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let (x, xdot) = assemble(w);
        let mut r = DVector::zeros(network.n_equations());
        network.residual(0.0, &x, &xdot, &mut r)?;
        Ok(r)
    };
    let jacobian = |w: &DVector<f64>| finite_difference_jacobian(w, &residual, config.fd_epsilon);

    let mut w0 = DVector::zeros(n);
    for (k, &s) in algebraic.iter().enumerate() {
        w0[k] = x_init[s];
    }
    // derivative guesses stay zero

    let result = newton_solve(w0, &residual, jacobian, config)?;
    tracing::debug!(
        iterations = result.iterations,
        residual = result.residual_norm,
        "initialization converged"
    );

    let (x, xdot) = assemble(&result.x);
    Ok(InitialState { x, xdot })
}
