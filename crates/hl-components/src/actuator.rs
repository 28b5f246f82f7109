//! Double-acting hydraulic cylinder.

use std::sync::Arc;

use hl_core::VarId;
use hl_core::units::{Area, Length, Mass as MassUnit, Pressure, Volume, mps};
use hl_fluids::FluidModel;
use hl_network::{HydraulicPort, MechanicalPort, NetworkBuilder};

use crate::dynamic_volume::{DynamicVolume, DynamicVolumeParams};
use crate::error::ComponentResult;
use crate::mechanical::Mass;

/// Parameters for an [`Actuator`].
#[derive(Clone, Copy, Debug)]
pub struct ActuatorParams {
    /// Piston area on the A side.
    pub area_a: Area,
    /// Piston area on the B side.
    pub area_b: Area,
    /// Dead volume of chamber A.
    pub dead_volume_a: Volume,
    /// Dead volume of chamber B.
    pub dead_volume_b: Volume,
    /// Initial length of chamber A.
    pub x_a_init: Length,
    /// Initial length of chamber B.
    pub x_b_init: Length,
    /// Initial pressure in chamber A.
    pub p_a_init: Pressure,
    /// Initial pressure in chamber B.
    pub p_b_init: Pressure,
    /// Soft-stop minimum volume (both chambers).
    pub minimum_volume: Volume,
    /// Soft-stop damping region width (both chambers).
    pub damping_volume: Volume,
    /// Loss coefficient of the damping valves.
    pub damper_cd: f64,
    /// Moving mass (piston + rod + load).
    pub mass: MassUnit,
}

/// Double-acting cylinder: two opposed [`DynamicVolume`]s sharing one
/// flange and an inertial [`Mass`].
///
/// Chamber A fills as chamber B empties and vice versa. The piston
/// position and velocity are exposed as the A-side wall state
/// (`x = vol_a.x`, `dx = vol_a.dx`). This composition exercises the
/// whole chain — friction, compressibility, orifice law, soft stop —
/// under closed-loop mechanical load.
pub struct Actuator {
    /// Chamber A hydraulic port.
    pub port_a: HydraulicPort,
    /// Chamber B hydraulic port.
    pub port_b: HydraulicPort,
    /// Piston rod flange.
    pub flange: MechanicalPort,
    /// Piston position (m), differential.
    pub x: VarId,
    /// Piston velocity (m/s).
    pub dx: VarId,
    pub vol_a: DynamicVolume,
    pub vol_b: DynamicVolume,
    pub mass: Mass,
}

impl Actuator {
    pub fn add(
        net: &mut NetworkBuilder,
        name: &str,
        fluid: &Arc<dyn FluidModel>,
        params: &ActuatorParams,
    ) -> ComponentResult<Self> {
        let vol_a = DynamicVolume::add(
            net,
            &format!("{name}.vol_a"),
            fluid,
            &DynamicVolumeParams {
                direction: 1,
                area: params.area_a,
                dead_volume: params.dead_volume_a,
                x_init: params.x_a_init,
                p_init: params.p_a_init,
                minimum_volume: params.minimum_volume,
                damping_volume: params.damping_volume,
                damper_cd: params.damper_cd,
            },
        )?;
        let vol_b = DynamicVolume::add(
            net,
            &format!("{name}.vol_b"),
            fluid,
            &DynamicVolumeParams {
                direction: -1,
                area: params.area_b,
                dead_volume: params.dead_volume_b,
                x_init: params.x_b_init,
                p_init: params.p_b_init,
                minimum_volume: params.minimum_volume,
                damping_volume: params.damping_volume,
                damper_cd: params.damper_cd,
            },
        )?;
        let mass = Mass::add(net, &format!("{name}.mass"), params.mass, mps(0.0))?;
        net.connect_mechanical(&[vol_a.flange, vol_b.flange, mass.flange])?;

        Ok(Self {
            port_a: vol_a.port,
            port_b: vol_b.port,
            flange: mass.flange,
            x: vol_a.x,
            dx: vol_a.dx,
            vol_a,
            vol_b,
            mass,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::units::{kg, m, m2, m3, pa};
    use hl_fluids::LinearLiquid;

    #[test]
    fn actuator_assembles() {
        let fluid: Arc<dyn FluidModel> = Arc::new(LinearLiquid::mineral_oil());
        let mut net = NetworkBuilder::new();
        let params = ActuatorParams {
            area_a: m2(0.01),
            area_b: m2(0.01),
            dead_volume_a: m3(1e-5),
            dead_volume_b: m3(1e-5),
            x_a_init: m(0.05),
            x_b_init: m(0.05),
            p_a_init: pa(1e5),
            p_b_init: pa(1e5),
            minimum_volume: m3(1e-6),
            damping_volume: m3(1e-5),
            damper_cd: 1.0,
            mass: kg(5.0),
        };
        let act = Actuator::add(&mut net, "cyl", &fluid, &params).unwrap();
        assert_eq!(act.x, act.vol_a.x);
        assert_ne!(act.port_a, act.port_b);
    }
}
