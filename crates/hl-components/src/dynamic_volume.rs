//! Moving-wall volume with end-stop regularization.

use std::sync::Arc;

use hl_core::VarId;
use hl_core::numeric::clamp01;
use hl_core::units::{Area, Length, Pressure, Volume};
use hl_fluids::FluidModel;
use hl_network::{
    Component, EvalContext, HydraulicPort, MechanicalPort, NetworkBuilder, Residuals,
};

use crate::error::{ComponentError, ComponentResult};
use crate::valve::{ValveBase, ValveLaw};
use crate::volume::{VolumeBase, VolumeParams};

/// Damper opening as a function of chamber volume: the soft stop.
///
/// - 1 for `vol ≥ minimum_volume + damping_volume` (unrestricted)
/// - `(vol − minimum_volume)/damping_volume` in between (linearly closing)
/// - 0 for `vol ≤ minimum_volume` (outflow blocked)
///
/// Continuous at both region boundaries and monotone in `vol`.
pub(crate) fn damper_area(vol: f64, minimum_volume: f64, damping_volume: f64) -> f64 {
    clamp01((vol - minimum_volume) / damping_volume)
}

/// Parameters for a [`DynamicVolume`].
#[derive(Clone, Copy, Debug)]
pub struct DynamicVolumeParams {
    /// Orientation of the mechanical port against the hydraulic port;
    /// must be +1 or −1. Opposed actuator chambers use opposite signs.
    pub direction: i32,
    /// Wall (piston) area.
    pub area: Area,
    /// Fluid volume not swept by the wall.
    pub dead_volume: Volume,
    /// Initial wall position.
    pub x_init: Length,
    /// Initial chamber pressure.
    pub p_init: Pressure,
    /// Volume below which outflow is fully blocked.
    pub minimum_volume: Volume,
    /// Width of the linear closing region above `minimum_volume`.
    pub damping_volume: Volume,
    /// Loss coefficient of the damping valve.
    pub damper_cd: f64,
}

/// Moving-wall compressible volume with a near-limit damping valve.
///
/// Composite of a [`VolumeBase`] and a directional [`ValveBase`] damper in
/// series with the external port. The damper's forward direction is flow
/// leaving the chamber, so approaching the travel limit chokes outflow
/// only: the piecewise-linear closing law keeps the chamber from being
/// driven to zero or negative volume, while refill flow passes with zero
/// resistance (directional semantics).
///
/// Coupling equations:
/// - `damper.area = clamp((vol − minimum_volume)/damping_volume, 0, 1)`
/// - `vol.dx = flange.v·direction`
/// - `flange.f = −p_chamber·area·direction`
#[derive(Debug)]
pub struct DynamicVolume {
    /// External hydraulic port (outer side of the damper).
    pub port: HydraulicPort,
    /// Mechanical port driving the wall.
    pub flange: MechanicalPort,
    /// Wall position (m), differential.
    pub x: VarId,
    /// Wall velocity (m/s).
    pub dx: VarId,
    /// Chamber volume (m³).
    pub vol: VarId,
    /// Chamber fluid density (kg/m³), differential.
    pub rho: VarId,
    pub volume: VolumeBase,
    pub damper: ValveBase,
}

struct DynamicVolumeCoupling {
    name: String,
    flange: MechanicalPort,
    vol: VarId,
    dx: VarId,
    p_chamber: VarId,
    damper_area_var: VarId,
    area: f64,
    direction: f64,
    minimum_volume: f64,
    damping_volume: f64,
}

impl Component for DynamicVolumeCoupling {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        3
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        let vol = ctx.val(self.vol);
        out.push(
            ctx.val(self.damper_area_var)
                - damper_area(vol, self.minimum_volume, self.damping_volume),
        );
        out.push(ctx.val(self.dx) - ctx.val(self.flange.v) * self.direction);
        out.push(ctx.val(self.flange.f) + ctx.val(self.p_chamber) * self.area * self.direction);
    }
}

impl DynamicVolume {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &DynamicVolumeParams,
    ) -> ComponentResult<Self> {
        if params.direction != 1 && params.direction != -1 {
            return Err(ComponentError::InvalidParam {
                what: "direction must be +1 or -1",
            });
        }
        if !(params.minimum_volume.value >= 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "minimum volume must be non-negative",
            });
        }
        if !(params.damping_volume.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "damping volume must be positive",
            });
        }

        let volume = VolumeBase::add(
            net,
            &format!("{name}.vol"),
            fluid,
            &VolumeParams {
                area: params.area,
                dead_volume: params.dead_volume,
                x_init: params.x_init,
                p_init: params.p_init,
            },
        )?;

        let vol_init = params.dead_volume.value + params.area.value * params.x_init.value;
        let damper = ValveBase::external_area(
            net,
            &format!("{name}.damper"),
            fluid,
            params.damper_cd,
            ValveLaw::Directional,
            false,
            damper_area(
                vol_init,
                params.minimum_volume.value,
                params.damping_volume.value,
            ),
            params.p_init,
        )?;

        // chamber side of the damper faces the volume; forward flow exits
        net.connect_hydraulic(&[volume.port, damper.port_a])?;

        let direction = f64::from(params.direction);
        let flange = net.mechanical_port(
            &format!("{name}.flange"),
            0.0,
            -params.p_init.value * params.area.value * direction,
        );

        let coupling = DynamicVolumeCoupling {
            name: format!("{name}.coupling"),
            flange,
            vol: volume.vol,
            dx: volume.dx,
            p_chamber: volume.port.p,
            damper_area_var: damper.area,
            area: params.area.value,
            direction,
            minimum_volume: params.minimum_volume.value,
            damping_volume: params.damping_volume.value,
        };
        net.add_component(Box::new(coupling));

        Ok(Self {
            port: damper.port_b,
            flange,
            x: volume.x,
            dx: volume.dx,
            vol: volume.vol,
            rho: volume.rho,
            volume,
            damper,
        })
    }
}
