//! Incremental network builder with union-find connection sets.

use std::collections::HashSet;

use hl_core::{CompId, VarId};

use crate::component::Component;
use crate::error::{NetworkError, NetworkResult};
use crate::network::{Network, SlotMeta};
use crate::port::{HydraulicPort, MechanicalPort, SignalPort};
use crate::variable::{VarKind, VarMeta};

/// Union-find over variable indices, used to alias connected potentials.
///
/// Union keeps the smallest index as root, so the first-registered
/// variable of a connection owns the canonical name and initial value.
#[derive(Debug, Default)]
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn push(&mut self) {
        let i = self.parent.len() as u32;
        self.parent.push(i);
    }

    fn find(&mut self, mut i: u32) -> u32 {
        while self.parent[i as usize] != i {
            // path halving
            self.parent[i as usize] = self.parent[self.parent[i as usize] as usize];
            i = self.parent[i as usize];
        }
        i
    }

    fn union(&mut self, a: u32, b: u32) -> (u32, u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return (ra, ra);
        }
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[child as usize] = root;
        (root, child)
    }
}

#[derive(Debug, Clone, Copy)]
enum PortClass {
    Hydraulic,
    Mechanical,
}

impl PortClass {
    fn label(self) -> &'static str {
        match self {
            PortClass::Hydraulic => "hydraulic",
            PortClass::Mechanical => "mechanical",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PortRecord {
    class: PortClass,
    potential: VarId,
    flow: VarId,
}

/// Builder for constructing a network incrementally.
///
/// Components allocate variables and ports during their own construction,
/// register themselves with `add_component`, and composites connect child
/// ports with the `connect_*` methods. `build()` validates the structure
/// and freezes it into an immutable [`Network`].
#[derive(Default)]
pub struct NetworkBuilder {
    vars: Vec<VarMeta>,
    uf: UnionFind,
    components: Vec<Box<dyn Component>>,
    ports: Vec<PortRecord>,
    connected_flows: HashSet<u32>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a scalar variable and return its id.
    pub fn add_var(&mut self, name: impl Into<String>, kind: VarKind, init: f64) -> VarId {
        let id = VarId::from_index(self.vars.len() as u32);
        self.vars.push(VarMeta {
            name: name.into(),
            kind,
            init,
        });
        self.uf.push();
        id
    }

    /// Allocate a hydraulic port (pressure + mass flow).
    pub fn hydraulic_port(&mut self, name: &str, p_init: f64) -> HydraulicPort {
        let p = self.add_var(format!("{name}.p"), VarKind::Algebraic, p_init);
        let dm = self.add_var(format!("{name}.dm"), VarKind::Algebraic, 0.0);
        self.ports.push(PortRecord {
            class: PortClass::Hydraulic,
            potential: p,
            flow: dm,
        });
        HydraulicPort { p, dm }
    }

    /// Allocate a mechanical port (velocity + force).
    pub fn mechanical_port(&mut self, name: &str, v_init: f64, f_init: f64) -> MechanicalPort {
        let v = self.add_var(format!("{name}.v"), VarKind::Algebraic, v_init);
        let f = self.add_var(format!("{name}.f"), VarKind::Algebraic, f_init);
        self.ports.push(PortRecord {
            class: PortClass::Mechanical,
            potential: v,
            flow: f,
        });
        MechanicalPort { v, f }
    }

    /// Allocate a signal port.
    pub fn signal_port(&mut self, name: &str, init: f64) -> SignalPort {
        let s = self.add_var(format!("{name}.s"), VarKind::Algebraic, init);
        SignalPort { s }
    }

    /// Register a component and return its id.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> CompId {
        let id = CompId::from_index(self.components.len() as u32);
        self.components.push(component);
        id
    }

    fn alias(&mut self, a: VarId, b: VarId) -> NetworkResult<()> {
        let ra = self.uf.find(a.index());
        let rb = self.uf.find(b.index());
        if self.vars[ra as usize].kind != self.vars[rb as usize].kind {
            return Err(NetworkError::AliasKindMismatch { a, b });
        }
        self.uf.union(ra, rb);
        Ok(())
    }

    /// Connect ≥2 hydraulic ports into one node: pressures are aliased,
    /// and the node contributes one Σ dm = 0 balance at build time.
    ///
    /// Connecting a port that is already part of a node merges the nodes.
    pub fn connect_hydraulic(&mut self, ports: &[HydraulicPort]) -> NetworkResult<()> {
        if ports.len() < 2 {
            return Err(NetworkError::ConnectionTooSmall);
        }
        for pair in ports.windows(2) {
            self.alias(pair[0].p, pair[1].p)?;
        }
        for port in ports {
            self.connected_flows.insert(port.dm.index());
        }
        Ok(())
    }

    /// Connect ≥2 mechanical ports into one node: velocities are aliased,
    /// and the node contributes one Σ f = 0 balance at build time.
    pub fn connect_mechanical(&mut self, ports: &[MechanicalPort]) -> NetworkResult<()> {
        if ports.len() < 2 {
            return Err(NetworkError::ConnectionTooSmall);
        }
        for pair in ports.windows(2) {
            self.alias(pair[0].v, pair[1].v)?;
        }
        for port in ports {
            self.connected_flows.insert(port.f.index());
        }
        Ok(())
    }

    /// Connect ≥2 signal ports: values are aliased, no balance.
    pub fn connect_signal(&mut self, ports: &[SignalPort]) -> NetworkResult<()> {
        if ports.len() < 2 {
            return Err(NetworkError::ConnectionTooSmall);
        }
        for pair in ports.windows(2) {
            self.alias(pair[0].s, pair[1].s)?;
        }
        Ok(())
    }

    /// Validate and freeze the network.
    ///
    /// Checks for dangling ports and structural imbalance between
    /// unknowns and equations, then resolves the union-find into a
    /// compact slot table.
    pub fn build(mut self) -> NetworkResult<Network> {
        // Every hydraulic/mechanical port must be part of a connection.
        for rec in &self.ports {
            if !self.connected_flows.contains(&rec.flow.index()) {
                return Err(NetworkError::DanglingPort {
                    kind: rec.class.label(),
                    var: rec.flow,
                });
            }
        }

        // Resolve aliases into slots. Union-by-min guarantees the root of
        // a class is its smallest index, so one forward pass suffices.
        let n_vars = self.vars.len();
        let mut slot_of_var = vec![u32::MAX; n_vars];
        let mut slots: Vec<SlotMeta> = Vec::new();
        for i in 0..n_vars as u32 {
            let root = self.uf.find(i);
            if slot_of_var[root as usize] == u32::MAX {
                let meta = &self.vars[root as usize];
                slot_of_var[root as usize] = slots.len() as u32;
                slots.push(SlotMeta {
                    name: meta.name.clone(),
                    kind: meta.kind,
                    init: meta.init,
                });
            }
            slot_of_var[i as usize] = slot_of_var[root as usize];
        }

        // Group connected ports into nodes by canonical potential slot.
        let mut node_flows: Vec<(u32, Vec<u32>)> = Vec::new();
        let mut seen_flows: HashSet<u32> = HashSet::new();
        for rec in &self.ports {
            let pot_slot = slot_of_var[rec.potential.index() as usize];
            let flow_slot = slot_of_var[rec.flow.index() as usize];
            if !seen_flows.insert(flow_slot) {
                continue;
            }
            match node_flows.iter_mut().find(|(p, _)| *p == pot_slot) {
                Some((_, flows)) => flows.push(flow_slot),
                None => node_flows.push((pot_slot, vec![flow_slot])),
            }
        }
        let balances: Vec<Vec<u32>> = node_flows.into_iter().map(|(_, flows)| flows).collect();

        // Structural well-posedness: one equation per unknown.
        let eq_counts: Vec<usize> = self.components.iter().map(|c| c.num_equations()).collect();
        let n_component_eqs: usize = eq_counts.iter().sum();
        let n_equations = n_component_eqs + balances.len();
        let n_slots = slots.len();
        if n_equations < n_slots {
            return Err(NetworkError::Underdetermined {
                unknowns: n_slots,
                equations: n_equations,
            });
        }
        if n_equations > n_slots {
            return Err(NetworkError::Overdetermined {
                unknowns: n_slots,
                equations: n_equations,
            });
        }

        Ok(Network::new(
            slots,
            slot_of_var,
            self.components,
            eq_counts,
            balances,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{EvalContext, Residuals};
    use nalgebra::DVector;

    /// Test-only flow source: pushes a fixed mass flow into its node.
    struct TestSource {
        port: HydraulicPort,
        dm: f64,
    }

    impl Component for TestSource {
        fn name(&self) -> &str {
            "test_source"
        }
        fn num_equations(&self) -> usize {
            1
        }
        fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
            out.push(ctx.val(self.port.dm) + self.dm);
        }
    }

    /// Test-only pressure reference.
    struct TestRef {
        port: HydraulicPort,
        p: f64,
    }

    impl Component for TestRef {
        fn name(&self) -> &str {
            "test_ref"
        }
        fn num_equations(&self) -> usize {
            1
        }
        fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
            out.push(ctx.val(self.port.p) - self.p);
        }
    }

    fn source_and_ref() -> (NetworkBuilder, HydraulicPort, HydraulicPort) {
        let mut net = NetworkBuilder::new();
        let sp = net.hydraulic_port("src.port", 1e5);
        let rp = net.hydraulic_port("ref.port", 1e5);
        net.add_component(Box::new(TestSource { port: sp, dm: -0.5 }));
        net.add_component(Box::new(TestRef { port: rp, p: 1e5 }));
        (net, sp, rp)
    }

    #[test]
    fn build_simple_network() {
        let (mut net, sp, rp) = source_and_ref();
        net.connect_hydraulic(&[sp, rp]).unwrap();
        let network = net.build().unwrap();
        // One shared pressure slot + two flow slots.
        assert_eq!(network.n_slots(), 3);
        assert_eq!(network.n_equations(), 3);
        // Aliased pressures read the same slot.
        assert_eq!(network.slot_of(sp.p), network.slot_of(rp.p));
        assert_ne!(network.slot_of(sp.dm), network.slot_of(rp.dm));
    }

    #[test]
    fn balance_sums_flows() {
        let (mut net, sp, rp) = source_and_ref();
        net.connect_hydraulic(&[sp, rp]).unwrap();
        let network = net.build().unwrap();

        let mut x = network.initial_state();
        let slot_a = network.slot_of(sp.dm);
        let slot_b = network.slot_of(rp.dm);
        x[slot_a] = 0.5;
        x[slot_b] = -0.5;
        let xdot = DVector::zeros(network.n_slots());
        let mut r = DVector::zeros(network.n_equations());
        network.residual(0.0, &x, &xdot, &mut r).unwrap();
        // Last row is the node balance.
        assert_eq!(r[network.n_equations() - 1], 0.0);
    }

    #[test]
    fn connection_too_small_rejected() {
        let (mut net, sp, _rp) = source_and_ref();
        let err = net.connect_hydraulic(&[sp]).unwrap_err();
        assert!(matches!(err, NetworkError::ConnectionTooSmall));
    }

    #[test]
    fn dangling_port_rejected() {
        let (net, _sp, _rp) = source_and_ref();
        let err = net.build().unwrap_err();
        assert!(matches!(err, NetworkError::DanglingPort { .. }));
    }

    #[test]
    fn underdetermined_rejected() {
        let mut net = NetworkBuilder::new();
        let sp = net.hydraulic_port("src.port", 1e5);
        let rp = net.hydraulic_port("ref.port", 1e5);
        // Two sources, no pressure reference: pressure slot is free.
        net.add_component(Box::new(TestSource { port: sp, dm: -0.5 }));
        net.add_component(Box::new(TestSource { port: rp, dm: 0.5 }));
        net.connect_hydraulic(&[sp, rp]).unwrap();
        let err = net.build().unwrap_err();
        assert!(matches!(err, NetworkError::Underdetermined { .. }));
    }

    #[test]
    fn overdetermined_rejected() {
        let mut net = NetworkBuilder::new();
        let sp = net.hydraulic_port("src.port", 1e5);
        let rp = net.hydraulic_port("ref.port", 1e5);
        // Two pressure references and a source: one equation too many.
        net.add_component(Box::new(TestSource { port: sp, dm: -0.5 }));
        net.add_component(Box::new(TestRef { port: sp, p: 1e5 }));
        net.add_component(Box::new(TestRef { port: rp, p: 2e5 }));
        net.connect_hydraulic(&[sp, rp]).unwrap();
        let err = net.build().unwrap_err();
        assert!(matches!(err, NetworkError::Overdetermined { .. }));
    }

    #[test]
    fn merged_connections_form_one_node() {
        let mut net = NetworkBuilder::new();
        let a = net.hydraulic_port("a", 1e5);
        let b = net.hydraulic_port("b", 1e5);
        let c = net.hydraulic_port("c", 1e5);
        net.add_component(Box::new(TestSource { port: a, dm: -0.5 }));
        net.add_component(Box::new(TestSource { port: b, dm: 0.25 }));
        net.add_component(Box::new(TestRef { port: c, p: 1e5 }));
        // Two connect calls sharing port b merge into a single node.
        net.connect_hydraulic(&[a, b]).unwrap();
        net.connect_hydraulic(&[b, c]).unwrap();
        let network = net.build().unwrap();
        // One pressure slot, three flow slots; 3 component eqs + 1 balance.
        assert_eq!(network.n_slots(), 4);
        assert_eq!(network.n_equations(), 4);
        assert_eq!(network.slot_of(a.p), network.slot_of(c.p));
    }
}
