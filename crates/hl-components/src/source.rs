//! Signal drives for valve area inputs.

use hl_network::{Component, EvalContext, NetworkBuilder, Residuals, SignalPort};

use crate::common::SourceFn;

/// Constant signal source.
#[derive(Clone)]
pub struct ConstantSignal {
    name: String,
    pub out: SignalPort,
    value: f64,
}

impl ConstantSignal {
    pub fn add(net: &mut NetworkBuilder, name: &str, value: f64) -> Self {
        let out = net.signal_port(&format!("{name}.out"), value);
        let sig = Self {
            name: name.to_string(),
            out,
            value,
        };
        net.add_component(Box::new(sig.clone()));
        sig
    }
}

impl Component for ConstantSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.out.s) - self.value);
    }
}

/// Time-varying signal source.
#[derive(Clone)]
pub struct TimeSignal {
    name: String,
    pub out: SignalPort,
    f: SourceFn,
}

impl TimeSignal {
    pub fn add(net: &mut NetworkBuilder, name: &str, f: SourceFn) -> Self {
        let out = net.signal_port(&format!("{name}.out"), f(0.0));
        let sig = Self {
            name: name.to_string(),
            out,
            f,
        };
        net.add_component(Box::new(sig.clone()));
        sig
    }
}

impl Component for TimeSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn residuals(&self, ctx: &EvalContext<'_>, out: &mut Residuals<'_>) {
        out.push(ctx.val(self.out.s) - (self.f)(ctx.t()));
    }
}
