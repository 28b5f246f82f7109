//! 1-D translational mechanics: inertia, force source, anchor.

use hl_core::VarId;
use hl_core::units::{Force as ForceUnit, Mass as MassUnit, Velocity};
use hl_network::{Component, EvalContext, MechanicalPort, NetworkBuilder, Residuals, VarKind};

use crate::common::{SourceFn, constant};
use crate::error::{ComponentError, ComponentResult};

/// Translational inertia.
///
/// Equations: `v = flange.v`, `m·D(v) = flange.f`.
#[derive(Clone)]
pub struct Mass {
    name: String,
    pub flange: MechanicalPort,
    /// Velocity state (m/s), differential.
    pub v: VarId,
    m: f64,
}

impl Mass {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        m: MassUnit,
        v_init: Velocity,
    ) -> ComponentResult<Self> {
        if !(m.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "mass must be positive",
            });
        }
        let flange = net.mechanical_port(&format!("{name}.flange"), v_init.value, 0.0);
        let v = net.add_var(format!("{name}.v"), VarKind::Differential, v_init.value);
        let mass = Self {
            name: name.to_string(),
            flange,
            v,
            m: m.value,
        };
        net.add_component(Box::new(mass.clone()));
        Ok(mass)
    }
}

impl Component for Mass {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        2
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.v) - ctx.val(self.flange.v));
        out.push(self.m * ctx.der(self.v) - ctx.val(self.flange.f));
    }
}

/// Prescribed external force acting on its node.
///
/// Equation: `flange.f = −f(t)` (the source pushes on the node).
#[derive(Clone)]
pub struct Force {
    name: String,
    pub flange: MechanicalPort,
    f_set: SourceFn,
}

impl Force {
    /// Constant force source.
    pub fn add(net: &mut NetworkBuilder, name: &str, f: ForceUnit) -> Self {
        Self::time_varying(net, name, constant(f.value))
    }

    /// Time-varying force source.
    pub fn time_varying(net: &mut NetworkBuilder, name: &str, f: SourceFn) -> Self {
        let f_init = f(0.0);
        let flange = net.mechanical_port(&format!("{name}.flange"), 0.0, -f_init);
        let force = Self {
            name: name.to_string(),
            flange,
            f_set: f,
        };
        net.add_component(Box::new(force.clone()));
        force
    }
}

impl Component for Force {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.flange.f) + (self.f_set)(ctx.t()));
    }
}

/// Rigid anchor: holds its node at zero velocity.
#[derive(Clone)]
pub struct Fixed {
    name: String,
    pub flange: MechanicalPort,
}

impl Fixed {
    pub fn add(net: &mut NetworkBuilder, name: &str) -> Self {
        let flange = net.mechanical_port(&format!("{name}.flange"), 0.0, 0.0);
        let fixed = Self {
            name: name.to_string(),
            flange,
        };
        net.add_component(Box::new(fixed.clone()));
        fixed
    }
}

impl Component for Fixed {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.flange.v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::units::{kg, mps};

    #[test]
    fn mass_rejects_non_positive() {
        let mut net = NetworkBuilder::new();
        assert!(Mass::add(&mut net, "m", kg(0.0), mps(0.0)).is_err());
        assert!(Mass::add(&mut net, "m", kg(-1.0), mps(0.0)).is_err());
        assert!(Mass::add(&mut net, "m", kg(2.5), mps(0.0)).is_ok());
    }
}
