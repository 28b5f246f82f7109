//! Structural smoke tests: components assemble into well-posed networks.

use std::sync::Arc;

use hl_components::{
    Actuator, ActuatorParams, Cap, ConstantSignal, FixedPressure, FlowDivider, Force,
    MassFlowSource, SpoolValve2Way, SpoolValve2WayParams, Tube, TubeParams, Valve, ValveBase,
    ValveLaw,
};
use hl_core::units::{kg, m, m2, m3, newton, pa};
use hl_fluids::{FluidModel, LinearLiquid};
use hl_network::{NetworkBuilder, NetworkError};
use nalgebra::DVector;

fn fluid() -> Arc<dyn FluidModel> {
    Arc::new(LinearLiquid::water())
}

fn assert_well_posed(network: &hl_network::Network) {
    assert_eq!(network.n_slots(), network.n_equations());
    let x = network.initial_state();
    let xdot = DVector::zeros(network.n_slots());
    let mut r = DVector::zeros(network.n_equations());
    network.residual(0.0, &x, &xdot, &mut r).unwrap();
    assert!(r.iter().all(|v| v.is_finite()));
}

#[test]
fn orifice_between_pressure_sources() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(2e5));
    let drain = FixedPressure::add(&mut net, "drain", pa(1e5));
    let valve = ValveBase::fixed_area(
        &mut net,
        "orifice",
        &fluid,
        2.0,
        m2(1e-4),
        ValveLaw::NonDirectional,
        false,
        pa(1.5e5),
    )
    .unwrap();
    net.connect_hydraulic(&[supply.port, valve.port_a]).unwrap();
    net.connect_hydraulic(&[valve.port_b, drain.port]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn capped_line() {
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(1e5));
    let cap = Cap::add(&mut net, "cap", pa(1e5));
    net.connect_hydraulic(&[supply.port, cap.port]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn signal_driven_valve() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(2e5));
    let drain = FixedPressure::add(&mut net, "drain", pa(1e5));
    let valve = Valve::add(&mut net, "valve", &fluid, 2.0, false, m2(1e-4), pa(1.5e5)).unwrap();
    let cmd = ConstantSignal::add(&mut net, "cmd", 5e-5);
    net.connect_signal(&[cmd.out, valve.input]).unwrap();
    net.connect_hydraulic(&[supply.port, valve.port_a]).unwrap();
    net.connect_hydraulic(&[valve.port_b, drain.port]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn discretized_tube_circuit() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let src = MassFlowSource::add(&mut net, "src", 0.01, pa(1e5));
    let drain = FixedPressure::add(&mut net, "drain", pa(1e5));
    let params = TubeParams::circular(m2(1e-4), m(5.0), pa(1e5));
    let tube = Tube::add(&mut net, "line", &fluid, &params, 4).unwrap();
    net.connect_hydraulic(&[src.port, tube.port_a]).unwrap();
    net.connect_hydraulic(&[tube.port_b, drain.port]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn flow_divider_circuit() {
    let mut net = NetworkBuilder::new();
    let src = MassFlowSource::add(&mut net, "src", 0.4, pa(1e5));
    let drain = FixedPressure::add(&mut net, "drain", pa(1e5));
    let divider = FlowDivider::add(&mut net, "div", 4.0, pa(1e5)).unwrap();
    net.connect_hydraulic(&[src.port, divider.port_a]).unwrap();
    net.connect_hydraulic(&[divider.port_b, drain.port]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn spool_valve_2way_circuit() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(5e5));
    let work_a = FixedPressure::add(&mut net, "work_a", pa(1e5));
    let work_b = FixedPressure::add(&mut net, "work_b", pa(3e5));
    let tank = FixedPressure::add(&mut net, "tank", pa(1e5));
    let dcv = SpoolValve2Way::add(
        &mut net,
        "dcv",
        &fluid,
        &SpoolValve2WayParams {
            spool_diameter: m(0.01),
            cd: 2.0,
            x_init: m(1e-3),
            mass: kg(0.1),
            p_init: pa(1e5),
        },
    )
    .unwrap();
    let drive = Force::add(&mut net, "drive", newton(2.0));
    net.connect_hydraulic(&[supply.port, dcv.port_s]).unwrap();
    net.connect_hydraulic(&[dcv.port_a, work_a.port]).unwrap();
    net.connect_hydraulic(&[work_b.port, dcv.port_b]).unwrap();
    net.connect_hydraulic(&[dcv.port_r, tank.port]).unwrap();
    net.connect_mechanical(&[dcv.flange, drive.flange]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn actuator_circuit() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let side_a = FixedPressure::add(&mut net, "side_a", pa(1e5));
    let side_b = FixedPressure::add(&mut net, "side_b", pa(1e5));
    let act = Actuator::add(
        &mut net,
        "cyl",
        &fluid,
        &ActuatorParams {
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
        },
    )
    .unwrap();
    let load = Force::add(&mut net, "load", newton(0.0));
    net.connect_hydraulic(&[side_a.port, act.port_a]).unwrap();
    net.connect_hydraulic(&[side_b.port, act.port_b]).unwrap();
    net.connect_mechanical(&[act.flange, load.flange]).unwrap();
    let network = net.build().unwrap();
    assert_well_posed(&network);
}

#[test]
fn unconnected_valve_port_is_rejected() {
    let fluid = fluid();
    let mut net = NetworkBuilder::new();
    let supply = FixedPressure::add(&mut net, "supply", pa(2e5));
    let valve = ValveBase::fixed_area(
        &mut net,
        "orifice",
        &fluid,
        2.0,
        m2(1e-4),
        ValveLaw::NonDirectional,
        false,
        pa(1.5e5),
    )
    .unwrap();
    net.connect_hydraulic(&[supply.port, valve.port_a]).unwrap();
    // port_b left dangling
    let err = net.build().unwrap_err();
    assert!(matches!(err, NetworkError::DanglingPort { .. }));
}
