//! Flow splitting for parallel-tube reduction.

use hl_core::VarId;
use hl_core::units::Pressure;
use hl_network::{Component, EvalContext, HydraulicPort, NetworkBuilder, Residuals, VarKind};

use crate::boundary::Open;
use crate::error::{ComponentError, ComponentResult};

/// Ideal 1-of-n flow splitter.
///
/// Models n parallel identical tubes by simulating one and scaling: the
/// part-flow port passes `dm_a/n` and the remainder is dumped into an
/// internal [`Open`] sink. All three ports sit at equal pressure (no drop
/// across the splitter). Scaling back up is the circuit author's job — a
/// mirrored divider is placed on the far side of the simulated tube.
///
/// Equations:
/// - `dm_a = port_a.dm`
/// - `dm_b = dm_a/n`
/// - `port_b.dm = −dm_b`
/// - `port_sink.dm = −(dm_a − dm_b)`
/// - `port_a.p = port_b.p`, `port_a.p = port_sink.p`
#[derive(Clone, Debug)]
pub struct FlowDivider {
    name: String,
    /// Full-flow port.
    pub port_a: HydraulicPort,
    /// Part-flow port.
    pub port_b: HydraulicPort,
    /// Inlet mass flow (kg/s).
    pub dm_a: VarId,
    /// Part flow (kg/s).
    pub dm_b: VarId,
    /// Internal overflow sink; `sink.dm_int` records the discarded flow.
    pub sink: Open,
    port_sink: HydraulicPort,
    n: f64,
}

impl FlowDivider {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        n: f64,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        if !(n >= 1.0) || !n.is_finite() {
            return Err(ComponentError::InvalidParam {
                what: "flow divider ratio must be >= 1",
            });
        }
        let port_a = net.hydraulic_port(&format!("{name}.port_a"), p_init.value);
        let port_b = net.hydraulic_port(&format!("{name}.port_b"), p_init.value);
        let port_sink = net.hydraulic_port(&format!("{name}.port_sink"), p_init.value);
        let dm_a = net.add_var(format!("{name}.dm_a"), VarKind::Algebraic, 0.0);
        let dm_b = net.add_var(format!("{name}.dm_b"), VarKind::Algebraic, 0.0);
        let sink = Open::add(net, &format!("{name}.open"), p_init);
        net.connect_hydraulic(&[port_sink, sink.port])?;
        let divider = Self {
            name: name.to_string(),
            port_a,
            port_b,
            dm_a,
            dm_b,
            sink,
            port_sink,
            n,
        };
        net.add_component(Box::new(divider.clone()));
        Ok(divider)
    }
}

impl Component for FlowDivider {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        6
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        let dm_a = ctx.val(self.dm_a);
        let dm_b = ctx.val(self.dm_b);

        out.push(dm_a - ctx.val(self.port_a.dm));
        out.push(dm_b - dm_a / self.n);
        out.push(ctx.val(self.port_b.dm) + dm_b);
        out.push(ctx.val(self.port_sink.dm) + (dm_a - dm_b));
        out.push(ctx.val(self.port_a.p) - ctx.val(self.port_b.p));
        out.push(ctx.val(self.port_a.p) - ctx.val(self.port_sink.p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::units::pa;

    #[test]
    fn rejects_ratio_below_one() {
        let mut net = NetworkBuilder::new();
        for n in [0.0, 0.5, f64::NAN] {
            let err = FlowDivider::add(&mut net, "div", n, pa(1e5)).unwrap_err();
            assert!(matches!(err, ComponentError::InvalidParam { .. }));
        }
    }

    #[test]
    fn unity_ratio_allowed() {
        let mut net = NetworkBuilder::new();
        assert!(FlowDivider::add(&mut net, "div", 1.0, pa(1e5)).is_ok());
    }
}
