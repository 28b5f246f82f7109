//! Position-controlled spool valve assemblies.

use std::sync::Arc;

use hl_core::VarId;
use hl_core::units::{Length, Mass as MassUnit, Pressure};
use hl_fluids::FluidModel;
use hl_network::{
    Component, EvalContext, HydraulicPort, MechanicalPort, NetworkBuilder, Residuals, VarKind,
};

use crate::error::{ComponentError, ComponentResult};
use crate::mechanical::Mass;
use crate::valve::{ValveBase, ValveLaw};

/// Parameters for a [`SpoolValve`].
#[derive(Clone, Copy, Debug)]
pub struct SpoolValveParams {
    /// Spool (port bore) diameter.
    pub spool_diameter: Length,
    /// Loss coefficient of the metering edge.
    pub cd: f64,
    /// Initial spool position.
    pub x_init: Length,
    /// Initial pressure at both hydraulic ports.
    pub p_init: Pressure,
}

/// Valve metered by a mechanical spool position.
///
/// A cylindrical spool uncovers a circumferential slot in proportion to
/// its displacement: `area = x·2π·d`. The position is a differential
/// state driven by the flange velocity; the spool itself is massless and
/// frictionless, so it transmits no force.
///
/// Coupling equations: `D(x) = dx`, `dx = flange.v`, `flange.f = 0`,
/// `area = x·2π·d`.
pub struct SpoolValve {
    pub port_a: HydraulicPort,
    pub port_b: HydraulicPort,
    pub flange: MechanicalPort,
    /// Spool position (m), differential.
    pub x: VarId,
    /// Spool velocity (m/s).
    pub dx: VarId,
    /// Metering area (m²).
    pub area: VarId,
}

struct SpoolCoupling {
    name: String,
    flange: MechanicalPort,
    x: VarId,
    dx: VarId,
    valve_area: VarId,
    circumference: f64,
}

impl Component for SpoolCoupling {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        4
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.der(self.x) - ctx.val(self.dx));
        out.push(ctx.val(self.dx) - ctx.val(self.flange.v));
        out.push(ctx.val(self.flange.f));
        out.push(ctx.val(self.valve_area) - ctx.val(self.x) * self.circumference);
    }
}

impl SpoolValve {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &SpoolValveParams,
    ) -> ComponentResult<Self> {
        if !(params.spool_diameter.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "spool diameter must be positive",
            });
        }
        if !(params.x_init.value >= 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "initial spool position must be non-negative",
            });
        }

        let circumference = 2.0 * core::f64::consts::PI * params.spool_diameter.value;
        let valve = ValveBase::external_area(
            net,
            &format!("{name}.valve"),
            fluid,
            params.cd,
            ValveLaw::NonDirectional,
            false,
            params.x_init.value * circumference,
            params.p_init,
        )?;

        let flange = net.mechanical_port(&format!("{name}.flange"), 0.0, 0.0);
        let x = net.add_var(format!("{name}.x"), VarKind::Differential, params.x_init.value);
        let dx = net.add_var(format!("{name}.dx"), VarKind::Algebraic, 0.0);

        let coupling = SpoolCoupling {
            name: format!("{name}.coupling"),
            flange,
            x,
            dx,
            valve_area: valve.area,
            circumference,
        };
        net.add_component(Box::new(coupling));

        Ok(Self {
            port_a: valve.port_a,
            port_b: valve.port_b,
            flange,
            x,
            dx,
            area: valve.area,
        })
    }
}

/// Parameters for a [`SpoolValve2Way`].
#[derive(Clone, Copy, Debug)]
pub struct SpoolValve2WayParams {
    /// Spool diameter shared by both metering edges.
    pub spool_diameter: Length,
    /// Loss coefficient of each metering edge.
    pub cd: f64,
    /// Initial spool position (shared by both edges).
    pub x_init: Length,
    /// Spool inertia.
    pub mass: MassUnit,
    /// Initial pressure at all hydraulic ports.
    pub p_init: Pressure,
}

/// 4-way directional valve: one spool meters two paths at once.
///
/// Two [`SpoolValve`]s (supply→A and B→return) share one mechanical
/// flange together with an inertial [`Mass`]. Both spools start at the
/// same position, and the shared flange velocity keeps them in lockstep.
/// Drive the spool by connecting a force (or further mechanics) to
/// `flange`.
pub struct SpoolValve2Way {
    /// Supply port.
    pub port_s: HydraulicPort,
    /// Work port A (metered from supply).
    pub port_a: HydraulicPort,
    /// Work port B (metered to return).
    pub port_b: HydraulicPort,
    /// Return port.
    pub port_r: HydraulicPort,
    /// Shared spool flange.
    pub flange: MechanicalPort,
    /// Spool position (m), differential.
    pub x: VarId,
    pub valve_sa: SpoolValve,
    pub valve_br: SpoolValve,
    pub mass: Mass,
}

impl SpoolValve2Way {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &SpoolValve2WayParams,
    ) -> ComponentResult<Self> {
        let spool_params = SpoolValveParams {
            spool_diameter: params.spool_diameter,
            cd: params.cd,
            x_init: params.x_init,
            p_init: params.p_init,
        };
        let valve_sa = SpoolValve::add(net, &format!("{name}.valve_sa"), fluid, &spool_params)?;
        let valve_br = SpoolValve::add(net, &format!("{name}.valve_br"), fluid, &spool_params)?;
        let mass = Mass::add(
            net,
            &format!("{name}.mass"),
            params.mass,
            hl_core::units::mps(0.0),
        )?;
        net.connect_mechanical(&[valve_sa.flange, valve_br.flange, mass.flange])?;

        Ok(Self {
            port_s: valve_sa.port_a,
            port_a: valve_sa.port_b,
            port_b: valve_br.port_a,
            port_r: valve_br.port_b,
            flange: mass.flange,
            x: valve_sa.x,
            valve_sa,
            valve_br,
            mass,
        })
    }
}
