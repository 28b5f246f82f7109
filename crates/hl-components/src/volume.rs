//! Compressible fluid volumes.
//!
//! Mass storage is formulated as an explicit density ODE: the density
//! state tracks the equation of state `ρ = ρ(p)` algebraically while its
//! time derivative carries the storage term of the mass balance. Solving
//! pressure from an equation of state instead would close a stiff
//! algebraic loop whenever the wall motion is prescribed.

use std::sync::Arc;

use hl_core::VarId;
use hl_core::units::{Area, Length, Pressure, Volume};
use hl_fluids::FluidModel;
use hl_network::{Component, EvalContext, HydraulicPort, NetworkBuilder, Residuals, VarKind};

use crate::error::{ComponentError, ComponentResult};

/// Fixed-wall compressible accumulator.
///
/// One hydraulic port; differential density state. Equations:
/// - `vol = volume`
/// - `ρ = ρ(port.p)`
/// - `dm = D(ρ)·vol`
#[derive(Clone, Debug)]
pub struct FixedVolume {
    name: String,
    pub port: HydraulicPort,
    /// Fluid density (kg/m³), differential.
    pub rho: VarId,
    /// Contained volume (m³).
    pub vol: VarId,
    volume: f64,
    fluid: Arc<dyn FluidModel>,
}

impl FixedVolume {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        volume: Volume,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        if !(volume.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "volume must be positive",
            });
        }
        let port = net.hydraulic_port(&format!("{name}.port"), p_init.value);
        let rho = net.add_var(
            format!("{name}.rho"),
            VarKind::Differential,
            fluid.density(p_init.value),
        );
        let vol = net.add_var(format!("{name}.vol"), VarKind::Algebraic, volume.value);
        let fv = Self {
            name: name.to_string(),
            port,
            rho,
            vol,
            volume: volume.value,
            fluid: Arc::clone(fluid),
        };
        net.add_component(Box::new(fv.clone()));
        Ok(fv)
    }
}

impl Component for FixedVolume {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        3
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        let p = ctx.val(self.port.p);
        let dm = ctx.val(self.port.dm);
        let rho = ctx.val(self.rho);
        let vol = ctx.val(self.vol);

        out.push(vol - self.volume);
        out.push(rho - self.fluid.density(p));
        out.push(dm - ctx.der(self.rho) * vol);
    }
}

/// Parameters for a moving-wall volume.
#[derive(Clone, Copy, Debug)]
pub struct VolumeParams {
    /// Wall (piston) area.
    pub area: Area,
    /// Fluid volume not swept by the wall.
    pub dead_volume: Volume,
    /// Initial wall position.
    pub x_init: Length,
    /// Initial chamber pressure.
    pub p_init: Pressure,
}

/// Compressible fluid storage behind a moving wall.
///
/// One hydraulic port; differential wall position and density states,
/// algebraic wall velocity and volume. Equations:
/// - `vol = dead_volume + area·x`
/// - `D(x) = dx`
/// - `ρ = ρ(port.p)`
/// - `dm = D(ρ)·vol + ρ·area·dx`
///
/// The wall velocity `dx` is left free here; a composite (e.g.
/// `DynamicVolume`) drives it from a mechanical port.
#[derive(Clone, Debug)]
pub struct VolumeBase {
    name: String,
    pub port: HydraulicPort,
    /// Wall position (m), differential.
    pub x: VarId,
    /// Wall velocity (m/s), algebraic, driven by the owning composite.
    pub dx: VarId,
    /// Fluid density (kg/m³), differential.
    pub rho: VarId,
    /// Chamber volume (m³).
    pub vol: VarId,
    area: f64,
    dead_volume: f64,
    fluid: Arc<dyn FluidModel>,
}

impl VolumeBase {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &VolumeParams,
    ) -> ComponentResult<Self> {
        if !(params.area.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "wall area must be positive",
            });
        }
        if !(params.dead_volume.value >= 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "dead volume must be non-negative",
            });
        }
        if !(params.x_init.value >= 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "initial wall position must be non-negative",
            });
        }
        let port = net.hydraulic_port(&format!("{name}.port"), params.p_init.value);
        let x = net.add_var(format!("{name}.x"), VarKind::Differential, params.x_init.value);
        let dx = net.add_var(format!("{name}.dx"), VarKind::Algebraic, 0.0);
        let rho = net.add_var(
            format!("{name}.rho"),
            VarKind::Differential,
            fluid.density(params.p_init.value),
        );
        let vol = net.add_var(
            format!("{name}.vol"),
            VarKind::Algebraic,
            params.dead_volume.value + params.area.value * params.x_init.value,
        );
        let vb = Self {
            name: name.to_string(),
            port,
            x,
            dx,
            rho,
            vol,
            area: params.area.value,
            dead_volume: params.dead_volume.value,
            fluid: Arc::clone(fluid),
        };
        net.add_component(Box::new(vb.clone()));
        Ok(vb)
    }

    /// Wall area (m²).
    pub fn area(&self) -> f64 {
        self.area
    }
}

impl Component for VolumeBase {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        4
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        let p = ctx.val(self.port.p);
        let dm = ctx.val(self.port.dm);
        let x = ctx.val(self.x);
        let dx = ctx.val(self.dx);
        let rho = ctx.val(self.rho);
        let vol = ctx.val(self.vol);

        out.push(vol - (self.dead_volume + self.area * x));
        out.push(ctx.der(self.x) - dx);
        out.push(rho - self.fluid.density(p));
        out.push(dm - (ctx.der(self.rho) * vol + rho * self.area * dx));
    }
}
