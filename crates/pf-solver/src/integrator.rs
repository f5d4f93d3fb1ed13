//! Marching integrators along a pipe profile.

use crate::error::{SolverError, SolverResult};
use pf_core::Real;

/// Hydraulic state at one grid node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowState {
    /// Pressure [Pa]
    pub pressure: Real,
    /// Volumetric flow [m³/s]
    pub flow: Real,
}

impl FlowState {
    pub fn new(pressure: Real, flow: Real) -> Self {
        Self { pressure, flow }
    }

    /// `self + h * d`
    fn advanced(&self, h: Real, d: &FlowState) -> FlowState {
        FlowState {
            pressure: self.pressure + h * d.pressure,
            flow: self.flow + h * d.flow,
        }
    }

    fn is_finite(&self) -> bool {
        self.pressure.is_finite() && self.flow.is_finite()
    }
}

/// Marching direction along the profile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Inlet to outlet (+1)
    Forward,
    /// Outlet to inlet (-1)
    Backward,
}

/// Spatial right-hand side `d(state)/dx` on a discrete profile.
pub trait ProfileModel {
    fn point_count(&self) -> usize;

    fn coordinate(&self, node: usize) -> Real;

    /// Derivative at `node`, using the geometry of `segment` (nodes
    /// `segment` and `segment + 1`).
    fn derivative(&self, node: usize, segment: usize, state: &FlowState)
    -> SolverResult<FlowState>;
}

/// Trait for profile integrators.
pub trait ProfileIntegrator {
    /// Fill `out` (one entry per node) starting from `initial` at the first
    /// node in `direction`.
    fn march<M: ProfileModel>(
        &self,
        model: &M,
        direction: Direction,
        initial: FlowState,
        out: &mut [FlowState],
    ) -> SolverResult<()>;
}

/// Euler predictor with trapezoidal corrector (Heun), 2nd order.
#[derive(Clone, Debug, Default)]
pub struct EulerCorrector;

impl ProfileIntegrator for EulerCorrector {
    fn march<M: ProfileModel>(
        &self,
        model: &M,
        direction: Direction,
        initial: FlowState,
        out: &mut [FlowState],
    ) -> SolverResult<()> {
        let n = model.point_count();
        if out.len() != n {
            return Err(SolverError::Integration {
                what: format!("output buffer has {} entries for {} nodes", out.len(), n),
            });
        }
        if n == 0 {
            return Ok(());
        }

        let node_at = |step: usize| match direction {
            Direction::Forward => step,
            Direction::Backward => n - 1 - step,
        };

        out[node_at(0)] = initial;
        for step in 1..n {
            let from = node_at(step - 1);
            let node = node_at(step);
            let segment = from.min(node);
            let h = model.coordinate(node) - model.coordinate(from);
            let state = out[from];

            let k1 = model.derivative(from, segment, &state)?;
            let predicted = state.advanced(h, &k1);
            let k2 = model.derivative(node, segment, &predicted)?;
            let corrected = FlowState {
                pressure: state.pressure + 0.5 * h * (k1.pressure + k2.pressure),
                flow: state.flow + 0.5 * h * (k1.flow + k2.flow),
            };

            if !corrected.is_finite() {
                return Err(SolverError::Integration {
                    what: format!("non-finite state at node {node}: {corrected:?}"),
                });
            }
            out[node] = corrected;
        }

        Ok(())
    }
}
