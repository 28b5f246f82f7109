//! hl-components: acausal component library for hydraulic circuits.
//!
//! Provides models for the common elements of a hydraulic circuit:
//! - boundary terminators and sources (Cap, Open, FixedPressure,
//!   MassFlowSource)
//! - friction tubes (TubeBase, discretized Tube)
//! - compressible volumes (FixedVolume, VolumeBase, DynamicVolume)
//! - orifice valves (ValveBase, signal-driven Valve)
//! - flow splitting (FlowDivider)
//! - 1-D mechanics (Mass, Force, Fixed) and signal drives
//! - composite assemblies (SpoolValve, SpoolValve2Way, Actuator)
//!
//! Every component registers its variables and ports with a
//! [`hl_network::NetworkBuilder`] at construction and contributes a fixed
//! set of residual equations; composites instantiate children, connect
//! their ports, and add only coupling equations. Flow is positive into a
//! component; connected ports share their potential and satisfy a zero
//! net-flow balance at the node.

pub mod actuator;
pub mod boundary;
pub mod common;
pub mod dynamic_volume;
pub mod error;
pub mod flow_divider;
pub mod mechanical;
pub mod source;
pub mod spool_valve;
pub mod tube;
pub mod valve;
pub mod volume;

// Re-exports
pub use actuator::{Actuator, ActuatorParams};
pub use boundary::{Cap, FixedPressure, MassFlowSource, Open};
pub use dynamic_volume::{DynamicVolume, DynamicVolumeParams};
pub use error::{ComponentError, ComponentResult};
pub use flow_divider::FlowDivider;
pub use mechanical::{Fixed, Force, Mass};
pub use source::{ConstantSignal, TimeSignal};
pub use spool_valve::{SpoolValve, SpoolValve2Way, SpoolValve2WayParams, SpoolValveParams};
pub use tube::{Tube, TubeBase, TubeParams};
pub use valve::{Valve, ValveBase, ValveLaw};
pub use volume::{FixedVolume, VolumeBase, VolumeParams};
