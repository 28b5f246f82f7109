//! Typed ports: the connection surface of every component.

use hl_core::VarId;

/// Hydraulic port: potential = pressure (Pa), flow = mass flow (kg/s).
///
/// Sign convention: `dm` is positive when fluid enters the component
/// through this port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydraulicPort {
    pub p: VarId,
    pub dm: VarId,
}

/// Mechanical (1-D translational) port: potential = velocity (m/s),
/// flow = force (N).
///
/// Sign convention: `f` is positive when it acts on the component
/// through this port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MechanicalPort {
    pub v: VarId,
    pub f: VarId,
}

/// Real-valued signal port (dimensionless, no flow).
///
/// Signal connections alias the value; no balance equation is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPort {
    pub s: VarId,
}
