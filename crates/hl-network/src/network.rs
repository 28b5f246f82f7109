//! The immutable assembled network and its reduced residual function.

use hl_core::{CompId, VarId};
use nalgebra::DVector;

use crate::component::{Component, EvalContext, Residuals};
use crate::error::{NetworkError, NetworkResult};
use crate::variable::VarKind;

/// Metadata for one canonical slot of the reduced system.
#[derive(Debug, Clone)]
pub struct SlotMeta {
    pub name: String,
    pub kind: VarKind,
    pub init: f64,
}

/// A validated, immutable network: the reduced residual function handed
/// to the solver and integrator.
///
/// Layout: residual rows are all component equations in registration
/// order, followed by one flow-balance row per connection. The slot count
/// always equals the equation count (checked at build time).
#[derive(Debug)]
pub struct Network {
    slots: Vec<SlotMeta>,
    slot_of_var: Vec<u32>,
    components: Vec<Box<dyn Component>>,
    eq_counts: Vec<usize>,
    balances: Vec<Vec<u32>>,
    n_equations: usize,
}

impl Network {
    pub(crate) fn new(
        slots: Vec<SlotMeta>,
        slot_of_var: Vec<u32>,
        components: Vec<Box<dyn Component>>,
        eq_counts: Vec<usize>,
        balances: Vec<Vec<u32>>,
    ) -> Self {
        let n_equations = eq_counts.iter().sum::<usize>() + balances.len();
        Self {
            slots,
            slot_of_var,
            components,
            eq_counts,
            balances,
            n_equations,
        }
    }

    /// Number of unknown slots after aliasing.
    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of residual equations (equal to `n_slots` by construction).
    pub fn n_equations(&self) -> usize {
        self.n_equations
    }

    /// Number of registered components.
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Canonical slot index of a variable.
    pub fn slot_of(&self, var: VarId) -> usize {
        self.slot_of_var[var.index() as usize] as usize
    }

    /// Slot metadata (diagnostics).
    pub fn slot_meta(&self, slot: usize) -> &SlotMeta {
        &self.slots[slot]
    }

    /// Whether a slot is a differential state.
    pub fn is_differential(&self, slot: usize) -> bool {
        self.slots[slot].kind == VarKind::Differential
    }

    /// State vector assembled from declared initial values.
    pub fn initial_state(&self) -> DVector<f64> {
        DVector::from_iterator(self.slots.len(), self.slots.iter().map(|s| s.init))
    }

    /// Read a variable out of a state vector.
    pub fn value(&self, x: &DVector<f64>, var: VarId) -> f64 {
        x[self.slot_of(var)]
    }

    /// Evaluate the full residual vector at (t, x, ẋ).
    ///
    /// `xdot` entries are only meaningful for differential slots;
    /// algebraic entries are never read. Non-finite component output is
    /// reported as an error, never masked.
    pub fn residual(
        &self,
        t: f64,
        x: &DVector<f64>,
        xdot: &DVector<f64>,
        out: &mut DVector<f64>,
    ) -> NetworkResult<()> {
        let n = self.n_slots();
        if x.len() != n || xdot.len() != n {
            return Err(NetworkError::StateLenMismatch {
                expected: n,
                got: x.len().min(xdot.len()),
            });
        }
        if out.len() != self.n_equations {
            return Err(NetworkError::StateLenMismatch {
                expected: self.n_equations,
                got: out.len(),
            });
        }

        let ctx = EvalContext {
            t,
            x: x.as_slice(),
            xdot: xdot.as_slice(),
            slot_of_var: &self.slot_of_var,
        };

        let mut row = 0;
        for (ci, comp) in self.components.iter().enumerate() {
            let n_eq = self.eq_counts[ci];
            {
                let mut sink = Residuals::new(&mut out.as_mut_slice()[row..row + n_eq]);
                comp.residuals(&ctx, &mut sink);
                if sink.written() != n_eq {
                    return Err(NetworkError::ResidualCountMismatch {
                        comp: CompId::from_index(ci as u32),
                        name: comp.name().to_string(),
                        expected: n_eq,
                        got: sink.written(),
                    });
                }
            }
            for k in 0..n_eq {
                if !out[row + k].is_finite() {
                    return Err(NetworkError::NonFiniteResidual {
                        comp: CompId::from_index(ci as u32),
                        name: comp.name().to_string(),
                        index: k,
                    });
                }
            }
            row += n_eq;
        }

        let xs = x.as_slice();
        for flows in &self.balances {
            let mut sum = 0.0;
            for &slot in flows {
                sum += xs[slot as usize];
            }
            out[row] = sum;
            row += 1;
        }

        Ok(())
    }
}
