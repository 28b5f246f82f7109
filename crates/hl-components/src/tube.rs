//! Friction tubes: single segment and N-segment discretization.

use std::sync::Arc;

use hl_core::VarId;
use hl_core::units::{Area, Length, Pressure};
use hl_fluids::{FluidModel, friction_factor};
use hl_network::{Component, EvalContext, HydraulicPort, NetworkBuilder, Residuals, VarKind};

use crate::error::{ComponentError, ComponentResult};
use crate::volume::FixedVolume;

/// Geometry and initial condition shared by tube components.
#[derive(Clone, Copy, Debug)]
pub struct TubeParams {
    /// Flow cross-section area.
    pub area: Area,
    /// Total tube length.
    pub length: Length,
    /// Wetted perimeter; `None` means a circular cross-section is assumed.
    pub perimeter: Option<Length>,
    /// Laminar shape factor Φ (64 for circular ducts).
    pub shape_factor: f64,
    /// Initial fluid pressure along the tube.
    pub p_init: Pressure,
}

impl TubeParams {
    /// Circular cross-section with the standard Φ = 64 shape factor.
    pub fn circular(area: Area, length: Length, p_init: Pressure) -> Self {
        Self {
            area,
            length,
            perimeter: None,
            shape_factor: 64.0,
            p_init,
        }
    }

    fn validate(&self) -> ComponentResult<()> {
        if !(self.area.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "tube area must be positive",
            });
        }
        if !(self.length.value > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "tube length must be positive",
            });
        }
        if let Some(per) = self.perimeter {
            if !(per.value > 0.0) {
                return Err(ComponentError::InvalidParam {
                    what: "tube perimeter must be positive",
                });
            }
        }
        if !(self.shape_factor > 0.0) {
            return Err(ComponentError::InvalidParam {
                what: "shape factor must be positive",
            });
        }
        Ok(())
    }

    fn hydraulic_diameter(&self) -> f64 {
        let perimeter = match self.perimeter {
            Some(per) => per.value,
            // circumference of the circle with this area
            None => 2.0 * (core::f64::consts::PI * self.area.value).sqrt(),
        };
        4.0 * self.area.value / perimeter
    }
}

/// Single-segment friction element (Darcy–Weisbach).
///
/// Two hydraulic ports; internal effective-length state. With
/// `Δp = p_a − p_b`, `dm = port_a.dm`, mean density ρ, mean velocity
/// `u = dm/(ρ·area)` and the signed friction factor f:
/// - `port_a.dm + port_b.dm = 0`
/// - `length = segment length`
/// - `Δp = ½·ρ·u²·f·(length/d_h)`
///
/// f is odd in dm and u² is even, so the pressure drop changes sign with
/// the flow without a discontinuity.
#[derive(Clone, Debug)]
pub struct TubeBase {
    name: String,
    pub port_a: HydraulicPort,
    pub port_b: HydraulicPort,
    /// Effective segment length (m).
    pub len: VarId,
    area: f64,
    d_h: f64,
    shape_factor: f64,
    segment_length: f64,
    fluid: Arc<dyn FluidModel>,
}

impl TubeBase {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &TubeParams,
    ) -> ComponentResult<Self> {
        params.validate()?;
        let port_a = net.hydraulic_port(&format!("{name}.port_a"), params.p_init.value);
        let port_b = net.hydraulic_port(&format!("{name}.port_b"), params.p_init.value);
        let len = net.add_var(
            format!("{name}.length"),
            VarKind::Algebraic,
            params.length.value,
        );
        let tube = Self {
            name: name.to_string(),
            port_a,
            port_b,
            len,
            area: params.area.value,
            d_h: params.hydraulic_diameter(),
            shape_factor: params.shape_factor,
            segment_length: params.length.value,
            fluid: Arc::clone(fluid),
        };
        net.add_component(Box::new(tube.clone()));
        Ok(tube)
    }
}

impl Component for TubeBase {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        3
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        let p_a = ctx.val(self.port_a.p);
        let p_b = ctx.val(self.port_b.p);
        let dm = ctx.val(self.port_a.dm);
        let len = ctx.val(self.len);

        out.push(dm + ctx.val(self.port_b.dm));
        out.push(len - self.segment_length);

        let rho = 0.5 * (self.fluid.density(p_a) + self.fluid.density(p_b));
        let mu = self.fluid.viscosity(p_a);
        let f = friction_factor(dm, self.area, self.d_h, rho, mu, self.shape_factor);
        let u = dm / (rho * self.area);
        out.push((p_a - p_b) - 0.5 * rho * u * u * f * len / self.d_h);
    }
}

/// N-segment discretized pipe.
///
/// Builds N−1 [`TubeBase`] segments of `length/(N−1)` each and N
/// [`FixedVolume`] nodes of `area·length/N` each, in series:
/// `port_a — vol₁ — seg₁ — vol₂ — … — vol_N — port_b`. The interleaved
/// volumes capture compressibility and wave storage along the pipe that a
/// single lumped segment would lose; larger N trades accuracy for more
/// state and stiffer equations.
#[derive(Debug)]
pub struct Tube {
    pub port_a: HydraulicPort,
    pub port_b: HydraulicPort,
    pub segments: Vec<TubeBase>,
    pub volumes: Vec<FixedVolume>,
}

impl Tube {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &TubeParams,
        n: usize,
    ) -> ComponentResult<Self> {
        if n <= 1 {
            return Err(ComponentError::InvalidParam {
                what: "Tube requires more than one volume node (n > 1)",
            });
        }
        params.validate()?;

        let seg_params = TubeParams {
            length: hl_core::units::m(params.length.value / (n - 1) as f64),
            ..*params
        };
        let vol_each =
            hl_core::units::m3(params.area.value * params.length.value / n as f64);

        let mut volumes = Vec::with_capacity(n);
        let mut segments = Vec::with_capacity(n - 1);
        for i in 0..n {
            volumes.push(FixedVolume::add(
                net,
                &format!("{name}.vol_{i}"),
                fluid,
                vol_each,
                params.p_init,
            )?);
        }
        for i in 0..n - 1 {
            segments.push(TubeBase::add(
                net,
                &format!("{name}.seg_{i}"),
                fluid,
                &seg_params,
            )?);
        }

        for i in 0..n {
            let mut node: Vec<HydraulicPort> = vec![volumes[i].port];
            if i > 0 {
                node.push(segments[i - 1].port_b);
            }
            if i < n - 1 {
                node.push(segments[i].port_a);
            }
            net.connect_hydraulic(&node)?;
        }

        Ok(Self {
            port_a: volumes[0].port,
            port_b: volumes[n - 1].port,
            segments,
            volumes,
        })
    }
}
