//! Steady-state solves of small assembled circuits.

use std::sync::Arc;

use hl_components::common::orifice_flow;
use hl_components::{Cap, ConstantSignal, FixedPressure, Valve, ValveBase, ValveLaw};
use hl_core::units::{m2, pa};
use hl_fluids::{FluidModel, LinearLiquid};
use hl_network::{Network, NetworkBuilder};
use hl_solver::{NewtonConfig, solve_steady};
use nalgebra::DVector;

fn fluid() -> Arc<dyn FluidModel> {
    Arc::new(LinearLiquid::water())
}

fn assert_residual_satisfied(network: &Network, x: &DVector<f64>) {
    let xdot = DVector::zeros(network.n_slots());
    let mut r = DVector::zeros(network.n_equations());
    network.residual(0.0, x, &xdot, &mut r).unwrap();
    assert!(r.norm() < 1e-6, "residual norm = {}", r.norm());
}

fn orifice_circuit(p_up: f64, p_down: f64) -> (Network, ValveBase, FixedPressure, FixedPressure) {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(p_up));
    let drain = FixedPressure::add(&mut net, "drain", pa(p_down));
    let valve = ValveBase::fixed_area(
        &mut net,
        "orifice",
        &fluid,
        2.0,
        m2(1e-4),
        ValveLaw::NonDirectional,
        false,
        pa(0.5 * (p_up + p_down)),
    )
    .unwrap();
    net.connect_hydraulic(&[supply.port, valve.port_a]).unwrap();
    net.connect_hydraulic(&[valve.port_b, drain.port]).unwrap();
    (net.build().unwrap(), valve, supply, drain)
}

#[test]
fn orifice_flow_matches_prediction() {
    let fluid = fluid();
    let (network, valve, _supply, _drain) = orifice_circuit(2e5, 1e5);
    let x = solve_steady(&network, &NewtonConfig::default()).unwrap();
    assert_residual_satisfied(&network, &x);

    let rho = 0.5 * (fluid.density(2e5) + fluid.density(1e5));
    let expected = orifice_flow(1e5, rho, 2.0, 1e-4);
    let dm = network.value(&x, valve.port_a.dm);
    assert!(
        (dm - expected).abs() / expected < 1e-6,
        "dm = {dm}, expected {expected}"
    );
}

#[test]
fn node_flows_conserve_mass() {
    let (network, valve, supply, drain) = orifice_circuit(2e5, 1e5);
    let x = solve_steady(&network, &NewtonConfig::default()).unwrap();

    let dm_supply = network.value(&x, supply.port.dm);
    let dm_valve_a = network.value(&x, valve.port_a.dm);
    let dm_valve_b = network.value(&x, valve.port_b.dm);
    let dm_drain = network.value(&x, drain.port.dm);

    assert!((dm_supply + dm_valve_a).abs() < 1e-9);
    assert!((dm_valve_a + dm_valve_b).abs() < 1e-9);
    assert!((dm_valve_b + dm_drain).abs() < 1e-9);
    // Aliased node pressures
    assert_eq!(
        network.slot_of(supply.port.p),
        network.slot_of(valve.port_a.p)
    );
}

#[test]
fn orifice_flow_is_antisymmetric_in_pressure_drop() {
    let (fwd_net, fwd_valve, _, _) = orifice_circuit(2e5, 1e5);
    let (rev_net, rev_valve, _, _) = orifice_circuit(1e5, 2e5);
    let cfg = NewtonConfig::default();

    let dm_fwd = fwd_net.value(&solve_steady(&fwd_net, &cfg).unwrap(), fwd_valve.port_a.dm);
    let dm_rev = rev_net.value(&solve_steady(&rev_net, &cfg).unwrap(), rev_valve.port_a.dm);

    assert!(dm_fwd > 0.0);
    assert!(dm_rev < 0.0);
    assert!(
        (dm_fwd + dm_rev).abs() < 1e-9 * dm_fwd.abs(),
        "fwd {dm_fwd} rev {dm_rev}"
    );
}

#[test]
fn capped_line_has_no_flow() {
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(3e5));
    let cap = Cap::add(&mut net, "cap", pa(3e5));
    net.connect_hydraulic(&[supply.port, cap.port]).unwrap();
    let network = net.build().unwrap();

    let x = solve_steady(&network, &NewtonConfig::default()).unwrap();
    assert!(network.value(&x, cap.port.dm).abs() < 1e-12);
    assert!((network.value(&x, cap.p_int) - 3e5).abs() < 1e-6);
}

#[test]
fn negative_area_command_is_clamped_closed() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(2e5));
    let drain = FixedPressure::add(&mut net, "drain", pa(1e5));
    let valve = Valve::add(&mut net, "valve", &fluid, 2.0, false, m2(0.0), pa(1.5e5)).unwrap();
    let cmd = ConstantSignal::add(&mut net, "cmd", -1e-4);
    net.connect_signal(&[cmd.out, valve.input]).unwrap();
    net.connect_hydraulic(&[supply.port, valve.port_a]).unwrap();
    net.connect_hydraulic(&[valve.port_b, drain.port]).unwrap();
    let network = net.build().unwrap();

    let x = solve_steady(&network, &NewtonConfig::default()).unwrap();
    assert!(network.value(&x, valve.area).abs() < 1e-12);
    assert!(network.value(&x, valve.port_a.dm).abs() < 1e-12);
}
