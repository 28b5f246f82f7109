//! Simulation runner and trajectory recording.

use crate::error::{SimError, SimResult};
use crate::integrator::ImplicitEuler;
use hl_core::VarId;
use hl_network::Network;
use hl_solver::{NewtonConfig, initialize};
use nalgebra::DVector;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Nominal time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Smallest step the cutback policy may reach before failing
    pub min_dt: f64,
    /// Maximum number of accepted steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Newton configuration shared by initialization and steps
    pub newton: NewtonConfig,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            min_dt: 1e-9,
            max_steps: 1_000_000,
            record_every: 1,
            newton: NewtonConfig::default(),
        }
    }
}

/// Recorded trajectory of a simulation run.
#[derive(Clone, Debug)]
pub struct Trajectory {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<DVector<f64>>,
}

impl Trajectory {
    /// Final state.
    pub fn last(&self) -> &DVector<f64> {
        &self.x[self.x.len() - 1]
    }

    /// Sample one variable over the whole trajectory.
    pub fn sample(&self, network: &Network, var: VarId) -> Vec<f64> {
        let slot = network.slot_of(var);
        self.x.iter().map(|x| x[slot]).collect()
    }
}

/// Run a transient simulation.
///
/// Finds a consistent initial state, then advances with implicit Euler.
/// A failed step is retried at half the size down to `min_dt`; after a
/// success the step grows back toward the nominal `dt`. Non-convergence
/// at the minimum step is reported as `StepFailed`.
pub fn run_sim(network: &Network, opts: &SimOptions) -> SimResult<Trajectory> {
    if !(opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if !(opts.min_dt > 0.0 && opts.min_dt <= opts.dt) {
        return Err(SimError::InvalidArg {
            what: "min_dt must be positive and no larger than dt",
        });
    }
    if opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 || opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps and record_every must be positive",
        });
    }

    let init = initialize(network, &opts.newton)?;
    let integrator = ImplicitEuler::new(opts.newton.clone());

    let mut t = 0.0;
    let mut x = init.x;
    let mut h = opts.dt;

    let mut t_record = vec![t];
    let mut x_record = vec![x.clone()];

    let mut step = 0;
    while t < opts.t_end - 1e-12 && step < opts.max_steps {
        let h_try = h.min(opts.t_end - t);
        match integrator.step(network, t, &x, h_try) {
            Ok(x_next) => {
                t += h_try;
                x = x_next;
                step += 1;
                h = (2.0 * h).min(opts.dt);
                if step % opts.record_every == 0 {
                    t_record.push(t);
                    x_record.push(x.clone());
                }
            }
            Err(_) if h_try > opts.min_dt => {
                h = (0.5 * h_try).max(opts.min_dt);
                tracing::warn!(t, h, "step rejected, cutting back");
            }
            Err(_) => {
                return Err(SimError::StepFailed { t, dt: h_try });
            }
        }
    }

    // Always record the final state
    if step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(x);
    }

    Ok(Trajectory {
        t: t_record,
        x: x_record,
    })
}
