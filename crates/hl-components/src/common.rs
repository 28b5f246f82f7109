//! Common helpers for component residuals.

use std::sync::Arc;

use hl_fluids::FluidModel;

/// Scalar source: a prescribed value as a function of time.
pub type SourceFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Constant source.
pub fn constant(value: f64) -> SourceFn {
    Arc::new(move |_t| value)
}

/// Sign-preserving square root: `sign(v)·sqrt(|v|)`.
///
/// The argument handed to `sqrt` is always non-negative, so the result is
/// defined for every input and odd-symmetric about zero.
#[inline]
pub fn signed_sqrt(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

/// Signed orifice mass flow: `sign(Δp)·sqrt(2·|Δp|·|ρ|/Cd)·x`.
///
/// Smooth at Δp = 0 because both sides vanish together; the direction of
/// flow always follows the sign of the pressure drop.
#[inline]
pub fn orifice_flow(dp: f64, rho: f64, cd: f64, x_area: f64) -> f64 {
    signed_sqrt(2.0 * dp * rho.abs() / cd) * x_area
}

/// Mean of the two port densities.
#[inline]
pub fn mean_density(fluid: &dyn FluidModel, p_a: f64, p_b: f64) -> f64 {
    0.5 * (fluid.density(p_a) + fluid.density(p_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn signed_sqrt_basics() {
        assert_eq!(signed_sqrt(0.0), 0.0);
        assert_eq!(signed_sqrt(4.0), 2.0);
        assert_eq!(signed_sqrt(-4.0), -2.0);
    }

    #[test]
    fn orifice_flow_zero_at_zero_dp() {
        assert_eq!(orifice_flow(0.0, 997.0, 2.0, 1e-4), 0.0);
    }

    proptest! {
        #[test]
        fn orifice_flow_odd_in_dp(
            dp in 0.0_f64..1e7,
            rho in 1.0_f64..2000.0,
            cd in 0.1_f64..10.0,
            x in 0.0_f64..1e-2,
        ) {
            let fwd = orifice_flow(dp, rho, cd, x);
            let rev = orifice_flow(-dp, rho, cd, x);
            prop_assert!((fwd + rev).abs() <= 1e-12 * fwd.abs().max(1.0));
            prop_assert!(fwd >= 0.0);
        }
    }
}
