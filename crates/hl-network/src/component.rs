//! The component contract: pure residual functions over registered variables.

use hl_core::VarId;

/// Read-only view of the system state during one residual evaluation.
///
/// Lookups go through the alias map, so connected potentials read the same
/// slot. All `VarId`s handed out by the builder that produced the network
/// are valid here by construction.
pub struct EvalContext<'a> {
    pub(crate) t: f64,
    pub(crate) x: &'a [f64],
    pub(crate) xdot: &'a [f64],
    pub(crate) slot_of_var: &'a [u32],
}

impl EvalContext<'_> {
    /// Current simulation time (s).
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Current value of a variable.
    pub fn val(&self, var: VarId) -> f64 {
        self.x[self.slot_of_var[var.index() as usize] as usize]
    }

    /// Current time derivative of a differential variable.
    pub fn der(&self, var: VarId) -> f64 {
        self.xdot[self.slot_of_var[var.index() as usize] as usize]
    }
}

/// Write-only sink for a component's residuals.
///
/// A component must push exactly `num_equations()` values per evaluation;
/// the network checks the count and rejects mismatches.
pub struct Residuals<'a> {
    out: &'a mut [f64],
    written: usize,
}

impl<'a> Residuals<'a> {
    pub(crate) fn new(out: &'a mut [f64]) -> Self {
        Self { out, written: 0 }
    }

    /// Append one residual value.
    pub fn push(&mut self, r: f64) {
        if self.written < self.out.len() {
            self.out[self.written] = r;
        }
        self.written += 1;
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }
}

/// Trait implemented by every leaf component (and composite coupling).
///
/// A component is a deterministic function of state, parameters, port
/// values, and time derivatives — no hidden control flow, no I/O, no
/// mutation. The network evaluates all components in one single-threaded
/// pass per solver step; `Send + Sync` lets independent networks run in
/// parallel.
pub trait Component: Send + Sync + std::fmt::Debug {
    /// Component name for diagnostics.
    fn name(&self) -> &str;

    /// Number of residual equations this component contributes.
    fn num_equations(&self) -> usize;

    /// Evaluate the residuals at the given state.
    ///
    /// Exactly `num_equations()` values must be pushed. Residuals are
    /// written in a fixed order so the Jacobian structure is stable.
    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>);
}
