//! Finite difference Jacobian computation.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

/// Compute a Jacobian using forward finite differences.
///
/// For each column j, perturbs x[j] by a scaled epsilon and computes
/// (f(x+e) − f(x))/e. Columns are independent and evaluated in parallel.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>> + Sync,
{
    let n = x.len();
    let f_x = f(x)?;
    let m = f_x.len();

    let columns: Vec<DVector<f64>> = (0..n)
        .into_par_iter()
        .map(|j| {
            let mut x_perturbed = x.clone();
            let dx = epsilon * x[j].abs().max(1.0);
            x_perturbed[j] += dx;
            let f_perturbed = f(&x_perturbed)?;
            Ok((f_perturbed - &f_x) / dx)
        })
        .collect::<SolverResult<Vec<_>>>()?;

    let mut jac = DMatrix::zeros(m, n);
    for (j, col) in columns.iter().enumerate() {
        for i in 0..m {
            jac[(i, j)] = col[i];
        }
    }

    Ok(jac)
}
