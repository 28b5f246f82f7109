//! hl-solver: nonlinear solves over assembled networks.
//!
//! Provides:
//! - finite-difference Jacobians (rayon-parallel columns)
//! - a damped Newton solver with backtracking line search
//! - consistent DAE initialization (differential states pinned,
//!   algebraic states and derivatives solved)
//! - steady-state solves (all time derivatives zero)

pub mod error;
pub mod initialization;
pub mod jacobian;
pub mod newton;
pub mod steady;

// Re-exports
pub use error::{SolverError, SolverResult};
pub use initialization::{InitialState, initialize};
pub use jacobian::finite_difference_jacobian;
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use steady::solve_steady;
