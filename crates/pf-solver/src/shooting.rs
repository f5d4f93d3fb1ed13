//! Shooting method for the pressure-pressure boundary value problem.
//!
//! The inlet and outlet pressures are known; the flow is not. For a trial
//! flow the pipe is marched from the outlet back to the inlet and the
//! computed inlet pressure is compared with the target. The root-finder
//! drives that mismatch to zero.

use crate::error::{SolverError, SolverResult};
use crate::integrator::{Direction, EulerCorrector, FlowState, ProfileIntegrator};
use crate::newton::{NewtonConfig, NewtonRaphson, RootFinder};
use crate::pipe_model::SteadyPipeModel;
use nalgebra::DVector;
use pf_core::{DomainError, Pressure, Real, VolumeRate, ensure_finite, m3ps};
use pf_fluids::{FluidModel, speed_of_sound};
use pf_pipe::{FlowRegime, PipeProperties};
use rayon::prelude::*;

/// Shooting solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingConfig {
    /// Initial flow guess [m³/s]
    pub initial_flow: Real,
    pub newton: NewtonConfig,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            initial_flow: 0.0,
            newton: NewtonConfig::default(),
        }
    }
}

/// Flow quantities at one profile node of a solved pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicPoint {
    /// [m]
    pub coordinate: Real,
    /// [m]
    pub height: Real,
    /// [Pa]
    pub pressure: Real,
    /// [kg/m³]
    pub density: Real,
    /// [m/s]
    pub velocity: Real,
    pub reynolds: Real,
    pub friction_factor: Real,
    pub regime: FlowRegime,
    /// Wave speed in the elastic pipe [m/s]
    pub speed_of_sound: Real,
    /// Calibrated heat capacity [J/(kg·K)]
    pub heat_capacity: Real,
}

/// Converged steady solution.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyFlowSolution {
    /// [m³/s]
    pub flow_rate: Real,
    pub iterations: usize,
    /// Final inlet pressure mismatch [Pa]
    pub residual: Real,
    pub points: Vec<HydraulicPoint>,
}

/// Shooting solver over a pluggable integrator and root-finder.
#[derive(Debug, Clone)]
pub struct ShootingSolver<I = EulerCorrector, R = NewtonRaphson> {
    pub initial_flow: Real,
    pub integrator: I,
    pub root_finder: R,
}

impl Default for ShootingSolver {
    fn default() -> Self {
        Self::new(ShootingConfig::default())
    }
}

impl ShootingSolver {
    pub fn new(config: ShootingConfig) -> Self {
        Self {
            initial_flow: config.initial_flow,
            integrator: EulerCorrector,
            root_finder: NewtonRaphson::new(config.newton),
        }
    }
}

impl<I: ProfileIntegrator, R: RootFinder> ShootingSolver<I, R> {
    pub fn with_parts(initial_flow: Real, integrator: I, root_finder: R) -> Self {
        Self {
            initial_flow,
            integrator,
            root_finder,
        }
    }

    /// Check every input invariant before iterating.
    pub fn validate(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        p_in: Real,
        p_out: Real,
    ) -> SolverResult<()> {
        pipe.validate()?;
        fluid.validate()?;
        ensure_finite(p_in, "inlet pressure")?;
        ensure_finite(p_out, "outlet pressure")?;
        ensure_finite(self.initial_flow, "initial flow")?;
        if let Some(n) = fluid.point_count() {
            let expected = pipe.profile.point_count();
            if n != expected {
                return Err(DomainError::SizeMismatch {
                    what: "fluid profile points",
                    expected,
                    actual: n,
                }
                .into());
            }
        }
        Ok(())
    }

    /// March the pipe in `direction` from `start` at its first node.
    pub fn march(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        direction: Direction,
        start: FlowState,
    ) -> SolverResult<Vec<FlowState>> {
        let model = SteadyPipeModel::new(pipe, fluid);
        let mut out = vec![FlowState::default(); pipe.profile.point_count()];
        self.integrator.march(&model, direction, start, &mut out)?;
        Ok(out)
    }

    /// Inlet pressure reached by marching back from (`p_out`, `flow`).
    pub fn inlet_pressure(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        p_out: Real,
        flow: Real,
    ) -> SolverResult<Real> {
        let states = self.march(pipe, fluid, Direction::Backward, FlowState::new(p_out, flow))?;
        Ok(states[0].pressure)
    }

    /// Flow rate that carries the pipe from `p_in` down to `p_out`.
    pub fn solve_flow_rate(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        p_in: Pressure,
        p_out: Pressure,
    ) -> SolverResult<VolumeRate> {
        let (flow, _, _) = self.shoot(pipe, fluid, p_in.value, p_out.value)?;
        Ok(m3ps(flow))
    }

    /// Solve and report the hydraulic state at every node.
    pub fn solve_profile(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        p_in: Pressure,
        p_out: Pressure,
    ) -> SolverResult<SteadyFlowSolution> {
        let (flow, residual, iterations) = self.shoot(pipe, fluid, p_in.value, p_out.value)?;
        let states = self.march(
            pipe,
            fluid,
            Direction::Backward,
            FlowState::new(p_out.value, flow),
        )?;

        let model = SteadyPipeModel::new(pipe, fluid);
        let beta_wall = pipe.wall.compression_ratio();
        let points = states
            .iter()
            .enumerate()
            .map(|(node, state)| {
                let local = model.local(node, state);
                HydraulicPoint {
                    coordinate: pipe.profile.coordinates()[node],
                    height: pipe.profile.heights()[node],
                    pressure: state.pressure,
                    density: local.density,
                    velocity: local.velocity,
                    reynolds: local.reynolds,
                    friction_factor: local.friction_factor,
                    regime: local.regime,
                    speed_of_sound: speed_of_sound(
                        beta_wall,
                        fluid.compression_ratio(),
                        local.density,
                    ),
                    heat_capacity: pipe.heat_capacity(fluid.heat_capacity(node)),
                }
            })
            .collect();

        Ok(SteadyFlowSolution {
            flow_rate: flow,
            iterations,
            residual,
            points,
        })
    }

    fn shoot(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        p_in: Real,
        p_out: Real,
    ) -> SolverResult<(Real, Real, usize)> {
        self.validate(pipe, fluid, p_in, p_out)?;

        let residual = |x: &DVector<Real>| -> SolverResult<DVector<Real>> {
            let computed = self.inlet_pressure(pipe, fluid, p_out, x[0])?;
            Ok(DVector::from_element(1, p_in - computed))
        };

        let result = self
            .root_finder
            .solve(residual, DVector::from_element(1, self.initial_flow))?;
        let flow = result.x[0];

        if !result.converged || !flow.is_finite() {
            tracing::warn!(
                p_in,
                p_out,
                flow,
                residual = result.residual_norm,
                iterations = result.iterations,
                "shooting did not converge"
            );
            return Err(SolverError::Convergence {
                p_in,
                p_out,
                last_flow: flow,
                residual: result.residual_norm,
                iterations: result.iterations,
            });
        }

        tracing::info!(
            p_in,
            p_out,
            flow,
            iterations = result.iterations,
            "shooting converged"
        );
        Ok((flow, result.residual_norm, result.iterations))
    }
}

impl<I, R> ShootingSolver<I, R>
where
    I: ProfileIntegrator + Sync,
    R: RootFinder + Sync,
{
    /// Solve independent (p_in, p_out) scenarios in parallel.
    pub fn solve_many(
        &self,
        pipe: &PipeProperties,
        fluid: &dyn FluidModel,
        boundaries: &[(Pressure, Pressure)],
    ) -> Vec<SolverResult<SteadyFlowSolution>> {
        boundaries
            .par_iter()
            .map(|&(p_in, p_out)| self.solve_profile(pipe, fluid, p_in, p_out))
            .collect()
    }
}

/// Solve with the default integrator, Newton settings and zero initial flow.
pub fn solve_flow_rate(
    pipe: &PipeProperties,
    fluid: &dyn FluidModel,
    p_in: Pressure,
    p_out: Pressure,
) -> SolverResult<VolumeRate> {
    ShootingSolver::new(ShootingConfig::default()).solve_flow_rate(pipe, fluid, p_in, p_out)
}
