//! Steady-state solves: all time derivatives zero.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use crate::newton::{NewtonConfig, newton_solve};
use hl_network::Network;
use nalgebra::DVector;

/// Solve the network residual with ẋ = 0.
///
/// Storage terms vanish (volumes pass no net flow), so the result is the
/// steady operating point of the circuit. The declared initial values
/// seed the Newton iteration.
pub fn solve_steady(network: &Network, config: &NewtonConfig) -> SolverResult<DVector<f64>> {
    let n = network.n_slots();
    let xdot = DVector::zeros(n);

    let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
        let mut r = DVector::zeros(network.n_equations());
        network.residual(0.0, x, &xdot, &mut r)?;
        Ok(r)
    };
    let jacobian = |x: &DVector<f64>| finite_difference_jacobian(x, &residual, config.fd_epsilon);

    let x0 = network.initial_state();
    let result = newton_solve(x0, &residual, jacobian, config).map_err(|e| match e {
        SolverError::ConvergenceFailed { what } => SolverError::ConvergenceFailed {
            what: format!("steady solve: {what}"),
        },
        other => other,
    })?;

    tracing::debug!(
        iterations = result.iterations,
        residual = result.residual_norm,
        "steady solve converged"
    );
    Ok(result.x)
}
