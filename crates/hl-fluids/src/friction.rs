//! Darcy friction factor correlation, regularized for residual evaluation.
//!
//! Acausal tube equations evaluate the friction factor inside a residual
//! that must stay finite and odd-symmetric through flow reversal, so the
//! textbook piecewise correlation (64/Re laminar, Blasius turbulent) is
//! reshaped here into a single continuous signed function of the signed
//! Reynolds number.

/// Upper end of the fully laminar range.
pub const RE_LAMINAR: f64 = 2000.0;

/// Lower end of the fully turbulent range.
pub const RE_TURBULENT: f64 = 3000.0;

/// Blasius coefficient for smooth-pipe turbulent flow.
const BLASIUS_C: f64 = 0.3164;

/// Regularization scale: below |Re| ~ RE_EPS the factor rolls off to zero
/// instead of diverging, keeping f·u² (and its limit, zero) well-defined.
const RE_EPS: f64 = 1.0;

/// Signed Reynolds number for a duct cross-section.
///
/// `Re = ρ·u·d_h/μ` with `u = dm/(ρ·area)`; density cancels, so the sign
/// of Re follows the sign of the mass flow.
#[inline]
pub fn reynolds_number(mass_flow: f64, area: f64, hydraulic_diameter: f64, viscosity: f64) -> f64 {
    mass_flow * hydraulic_diameter / (area * viscosity)
}

/// Signed Darcy friction factor.
///
/// Laminar branch `Φ/Re` (Φ = shape factor, 64 for circular ducts) and
/// turbulent Blasius branch `0.3164·|Re|^-0.25`, blended smoothly over the
/// transitional range. Both branches carry the sign of Re through the
/// regularization `Re/(Re² + ε²)`, so the returned factor is finite for
/// all flows, odd-symmetric about zero flow, and continuous everywhere —
/// the Darcy pressure drop `½·ρ·u²·f·L/d_h` then changes sign with the
/// flow without a jump.
pub fn friction_factor(
    mass_flow: f64,
    area: f64,
    hydraulic_diameter: f64,
    _density: f64,
    viscosity: f64,
    shape_factor: f64,
) -> f64 {
    let re = reynolds_number(mass_flow, area, hydraulic_diameter, viscosity);
    let re2 = re * re;

    // Φ/Re with a finite limit at zero flow
    let f_laminar = shape_factor * re / (re2 + RE_EPS * RE_EPS);

    // Blasius |Re|^-0.25, same sign regularization: Re/(Re²+ε²)^0.625
    let f_turbulent = BLASIUS_C * re / (re2 + RE_EPS * RE_EPS).powf(0.625);

    // Smooth laminar→turbulent blend centered on the transitional range
    let mid = 0.5 * (RE_LAMINAR + RE_TURBULENT);
    let width = (RE_TURBULENT - RE_LAMINAR) / 4.0;
    let t = 0.5 * (1.0 + ((re.abs() - mid) / width).tanh());

    (1.0 - t) * f_laminar + t * f_turbulent
}
