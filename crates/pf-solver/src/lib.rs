//! Steady hydraulic solver for a single oil pipe segment.
//!
//! This crate finds the flow rate that connects a known inlet pressure to a
//! known outlet pressure. The pipe momentum balance is marched along the
//! profile by a `ProfileIntegrator`, and the flow is found by a shooting
//! method over a `RootFinder` (dense Newton-Raphson by default).

pub mod error;
pub mod integrator;
pub mod jacobian;
pub mod newton;
pub mod pipe_model;
pub mod shooting;

pub use error::{SolverError, SolverResult};
pub use integrator::{Direction, EulerCorrector, FlowState, ProfileIntegrator, ProfileModel};
pub use newton::{NewtonConfig, NewtonRaphson, NewtonResult, RootFinder, newton_solve};
pub use pipe_model::{LocalHydraulics, SteadyPipeModel};
pub use shooting::{
    HydraulicPoint, ShootingConfig, ShootingSolver, SteadyFlowSolution, solve_flow_rate,
};
