//! Mass conservation round trip: a FixedVolume fed at constant flow
//! accumulates exactly the integrated inflow.

use std::sync::Arc;

use hl_components::{FixedVolume, MassFlowSource};
use hl_core::units::{m3, pa};
use hl_fluids::{FluidModel, LinearLiquid};
use hl_network::NetworkBuilder;
use hl_sim::{SimOptions, run_sim};

#[test]
fn constant_inflow_accumulates_mass() {
    let fluid: Arc<dyn FluidModel> = Arc::new(LinearLiquid::water());
    let volume_m3 = 0.5;
    let dm_in = 1.0;
    let t_end = 0.1;

    let mut net = NetworkBuilder::new();
    let src = MassFlowSource::add(&mut net, "src", dm_in, pa(1e5));
    let tank = FixedVolume::add(&mut net, "tank", &fluid, m3(volume_m3), pa(1e5)).unwrap();
    net.connect_hydraulic(&[src.port, tank.port]).unwrap();
    let network = net.build().unwrap();

    let opts = SimOptions {
        dt: 1e-3,
        t_end,
        ..Default::default()
    };
    let traj = run_sim(&network, &opts).unwrap();

    let rho = traj.sample(&network, tank.rho);
    let stored = (rho[rho.len() - 1] - rho[0]) * volume_m3;
    let expected = dm_in * t_end;
    assert!(
        (stored - expected).abs() / expected < 1e-6,
        "stored {stored} kg, expected {expected} kg"
    );

    // Density (and with it pressure) rises monotonically while filling.
    for pair in rho.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    let p = traj.sample(&network, tank.port.p);
    assert!(p[p.len() - 1] > p[0]);
}

#[test]
fn inflow_pressurizes_by_bulk_modulus() {
    let fluid: Arc<dyn FluidModel> = Arc::new(LinearLiquid::water());
    let volume_m3 = 0.5;
    let dm_in = 1.0;
    let t_end = 0.1;

    let mut net = NetworkBuilder::new();
    let src = MassFlowSource::add(&mut net, "src", dm_in, pa(1e5));
    let tank = FixedVolume::add(&mut net, "tank", &fluid, m3(volume_m3), pa(1e5)).unwrap();
    net.connect_hydraulic(&[src.port, tank.port]).unwrap();
    let network = net.build().unwrap();

    let opts = SimOptions {
        dt: 1e-3,
        t_end,
        ..Default::default()
    };
    let traj = run_sim(&network, &opts).unwrap();

    // Δp = β·Δρ/ρ₀ for the linear liquid.
    let rho = traj.sample(&network, tank.rho);
    let p = traj.sample(&network, tank.port.p);
    let d_rho = rho[rho.len() - 1] - rho[0];
    let d_p = p[p.len() - 1] - p[0];
    let expected_dp = fluid.bulk_modulus(1e5) * d_rho / fluid.density(1e5);
    assert!(
        (d_p - expected_dp).abs() / expected_dp < 1e-3,
        "dp {d_p}, expected {expected_dp}"
    );
}
