//! Orifice valves with the signed square-root flow law.

use std::sync::Arc;

use hl_core::VarId;
use hl_core::units::{Area, Pressure};
use hl_fluids::FluidModel;
use hl_network::{
    Component, EvalContext, HydraulicPort, NetworkBuilder, Residuals, SignalPort, VarKind,
};

use crate::common::{mean_density, orifice_flow};
use crate::error::{ComponentError, ComponentResult};

/// Flow-law variant of a valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveLaw {
    /// Bidirectional orifice: `dm = sign(Δp)·sqrt(2·|Δp|·|ρ|/Cd)·x`.
    NonDirectional,
    /// Check-valve behavior: the orifice law governs forward flow
    /// (Δp > 0); for reversed pressure drop the constraint degenerates to
    /// `Δp = 0` — no resistance to reverse pressure equalization.
    Directional,
}

/// Where the valve's opening area comes from.
#[derive(Clone, Debug)]
enum AreaSource {
    /// Constant opening.
    Fixed(f64),
    /// Bound by an owning composite's coupling equation.
    External,
    /// Driven by a real-valued input signal, clamped to ≥ 0 unless the
    /// valve is reversible.
    Signal(SignalPort),
}

/// Non-directional flow-law residual.
#[inline]
fn nondirectional_residual(dp: f64, dm: f64, rho: f64, cd: f64, x: f64) -> f64 {
    dm - orifice_flow(dp, rho, cd, x)
}

/// Directional flow-law residual: explicit case analysis, deliberately
/// one-sided at Δp = 0.
#[inline]
fn directional_residual(dp: f64, dm: f64, rho: f64, cd: f64, x: f64) -> f64 {
    if dp > 0.0 {
        dm - (2.0 * dp * rho.abs() / cd).sqrt() * x
    } else {
        dp
    }
}

/// Orifice flow element with a variable opening area.
///
/// Two hydraulic ports, an internal `area` state, and a discharge
/// coefficient Cd. Equations: `port_a.dm + port_b.dm = 0`, the area
/// binding (for fixed or signal-driven openings), and the flow law
/// selected by [`ValveLaw`]. The effective opening is `max(area, 0)`
/// unless the valve is reversible.
#[derive(Clone, Debug)]
pub struct ValveBase {
    name: String,
    pub port_a: HydraulicPort,
    pub port_b: HydraulicPort,
    /// Effective opening area (m²).
    pub area: VarId,
    cd: f64,
    law: ValveLaw,
    reversible: bool,
    source: AreaSource,
    fluid: Arc<dyn FluidModel>,
}

impl ValveBase {
    fn add_impl(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        cd: f64,
        law: ValveLaw,
        reversible: bool,
        source: AreaSource,
        area_init: f64,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        if !(cd > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "discharge coefficient must be positive",
            });
        }
        if !reversible && area_init < 0.0 {
            return Err(ComponentError::InvalidParam {
                what: "opening area must be non-negative for a non-reversible valve",
            });
        }
        if !area_init.is_finite() {
            return Err(ComponentError::InvalidParam {
                what: "opening area must be finite",
            });
        }
        let port_a = net.hydraulic_port(&format!("{name}.port_a"), p_init.value);
        let port_b = net.hydraulic_port(&format!("{name}.port_b"), p_init.value);
        let area = net.add_var(format!("{name}.area"), VarKind::Algebraic, area_init);
        let valve = Self {
            name: name.to_string(),
            port_a,
            port_b,
            area,
            cd,
            law,
            reversible,
            source,
            fluid: Arc::clone(fluid),
        };
        net.add_component(Box::new(valve.clone()));
        Ok(valve)
    }

    /// Fixed-opening orifice.
    pub fn fixed_area(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        cd: f64,
        area: Area,
        law: ValveLaw,
        reversible: bool,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        Self::add_impl(
            net,
            name,
            fluid,
            cd,
            law,
            reversible,
            AreaSource::Fixed(area.value),
            area.value,
            p_init,
        )
    }

    /// Valve whose area is constrained by an owning composite's coupling
    /// equation; `area_init` is the solver's initial guess.
    pub fn external_area(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        cd: f64,
        law: ValveLaw,
        reversible: bool,
        area_init: f64,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        Self::add_impl(
            net,
            name,
            fluid,
            cd,
            law,
            reversible,
            AreaSource::External,
            area_init,
            p_init,
        )
    }

    fn signal_area(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        cd: f64,
        reversible: bool,
        input: SignalPort,
        area_init: f64,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        Self::add_impl(
            net,
            name,
            fluid,
            cd,
            ValveLaw::NonDirectional,
            reversible,
            AreaSource::Signal(input),
            area_init,
            p_init,
        )
    }
}

impl Component for ValveBase {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        match self.source {
            AreaSource::External => 2,
            _ => 3,
        }
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        let p_a = ctx.val(self.port_a.p);
        let p_b = ctx.val(self.port_b.p);
        let dm = ctx.val(self.port_a.dm);
        let area = ctx.val(self.area);

        out.push(dm + ctx.val(self.port_b.dm));

        match &self.source {
            AreaSource::Fixed(a0) => out.push(area - a0),
            AreaSource::Signal(input) => {
                let s = ctx.val(input.s);
                let cmd = if self.reversible { s } else { s.max(0.0) };
                out.push(area - cmd);
            }
            AreaSource::External => {}
        }

        let x = if self.reversible { area } else { area.max(0.0) };
        let rho = mean_density(self.fluid.as_ref(), p_a, p_b);
        let dp = p_a - p_b;
        out.push(match self.law {
            ValveLaw::NonDirectional => nondirectional_residual(dp, dm, rho, self.cd, x),
            ValveLaw::Directional => directional_residual(dp, dm, rho, self.cd, x),
        });
    }
}

/// Signal-driven valve: a [`ValveBase`] with a real-valued input port
/// commanding its opening area (clamped to ≥ 0 unless reversible).
pub struct Valve {
    pub port_a: HydraulicPort,
    pub port_b: HydraulicPort,
    /// Area command input (m²).
    pub input: SignalPort,
    /// Effective opening area (m²).
    pub area: VarId,
}

impl Valve {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        cd: f64,
        reversible: bool,
        area_init: Area,
        p_init: Pressure,
    ) -> ComponentResult<Self> {
        let input = net.signal_port(&format!("{name}.input"), area_init.value);
        let base = ValveBase::signal_area(
            net,
            name,
            fluid,
            cd,
            reversible,
            input,
            area_init.value,
            p_init,
        )?;
        Ok(Self {
            port_a: base.port_a,
            port_b: base.port_b,
            input,
            area: base.area,
        })
    }
}
