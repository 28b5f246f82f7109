//! Boundary terminators and hydraulic sources.

use hl_core::units::Pressure;
use hl_network::{Component, EvalContext, HydraulicPort, NetworkBuilder, Residuals, VarKind};
use hl_core::VarId;

use crate::common::{SourceFn, constant};

/// Dead-ended line: no flow, pressure recorded in an internal state.
///
/// Equations: `port.dm = 0`, `p_int = port.p`.
#[derive(Clone)]
pub struct Cap {
    name: String,
    pub port: HydraulicPort,
    /// Recorded port pressure.
    pub p_int: VarId,
}

impl Cap {
    pub fn add(net: &mut NetworkBuilder, name: &str, p_init: Pressure) -> Self {
        let port = net.hydraulic_port(&format!("{name}.port"), p_init.value);
        let p_int = net.add_var(format!("{name}.p"), VarKind::Algebraic, p_init.value);
        let cap = Self {
            name: name.to_string(),
            port,
            p_int,
        };
        net.add_component(Box::new(cap.clone()));
        cap
    }
}

impl Component for Cap {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        2
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.port.dm));
        out.push(ctx.val(self.p_int) - ctx.val(self.port.p));
    }
}

/// Unconstrained reservoir/vent: both pressure and flow are free internal
/// states mirroring the port. Used as an overflow sink.
///
/// Equations: `p_int = port.p`, `dm_int = port.dm`.
#[derive(Clone, Debug)]
pub struct Open {
    name: String,
    pub port: HydraulicPort,
    /// Recorded port pressure.
    pub p_int: VarId,
    /// Recorded port mass flow.
    pub dm_int: VarId,
}

impl Open {
    pub fn add(net: &mut NetworkBuilder, name: &str, p_init: Pressure) -> Self {
        let port = net.hydraulic_port(&format!("{name}.port"), p_init.value);
        let p_int = net.add_var(format!("{name}.p"), VarKind::Algebraic, p_init.value);
        let dm_int = net.add_var(format!("{name}.dm"), VarKind::Algebraic, 0.0);
        let open = Self {
            name: name.to_string(),
            port,
            p_int,
            dm_int,
        };
        net.add_component(Box::new(open.clone()));
        open
    }
}

impl Component for Open {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        2
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.p_int) - ctx.val(self.port.p));
        out.push(ctx.val(self.dm_int) - ctx.val(self.port.dm));
    }
}

/// Ideal pressure source: pins its node to a fixed pressure, supplying
/// whatever flow the rest of the circuit demands.
#[derive(Clone)]
pub struct FixedPressure {
    name: String,
    pub port: HydraulicPort,
    p_set: f64,
}

impl FixedPressure {
    pub fn add(net: &mut NetworkBuilder, name: &str, p_set: Pressure) -> Self {
        let port = net.hydraulic_port(&format!("{name}.port"), p_set.value);
        let src = Self {
            name: name.to_string(),
            port,
            p_set: p_set.value,
        };
        net.add_component(Box::new(src.clone()));
        src
    }
}

impl Component for FixedPressure {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.port.p) - self.p_set);
    }
}

/// Prescribed mass-flow source: delivers `dm(t)` into its node.
///
/// Equation: `port.dm = −dm(t)` (flow leaves the source).
#[derive(Clone)]
pub struct MassFlowSource {
    name: String,
    pub port: HydraulicPort,
    dm_set: SourceFn,
}

impl MassFlowSource {
    /// Constant flow source.
    pub fn add(net: &mut NetworkBuilder, name: &str, dm: f64, p_init: Pressure) -> Self {
        Self::time_varying(net, name, constant(dm), p_init)
    }

    /// Time-varying flow source.
    pub fn time_varying(
        net: &mut NetworkBuilder,
        name: &str,
        dm: SourceFn,
        p_init: Pressure,
    ) -> Self {
        let port = net.hydraulic_port(&format!("{name}.port"), p_init.value);
        let src = Self {
            name: name.to_string(),
            port,
            dm_set: dm,
        };
        net.add_component(Box::new(src.clone()));
        src
    }
}

impl Component for MassFlowSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.port.dm) + (self.dm_set)(ctx.t()));
    }
}
