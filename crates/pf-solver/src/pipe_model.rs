//! Steady momentum balance of a liquid-filled pipe.

use crate::error::{SolverError, SolverResult};
use crate::integrator::{FlowState, ProfileModel};
use pf_core::Real;
use pf_core::constants::G0_MPS2;
use pf_fluids::{FluidModel, pressure_area};
use pf_pipe::{FlowRegime, PipeProperties, classify};

/// Local flow quantities at one node for a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHydraulics {
    /// [kg/m³]
    pub density: Real,
    /// Pressure-dilated flow area [m²]
    pub area: Real,
    /// Mean velocity [m/s]
    pub velocity: Real,
    pub reynolds: Real,
    /// Calibrated Darcy friction factor
    pub friction_factor: Real,
    pub regime: FlowRegime,
}

/// Right-hand side `dp/dx = -4 τ_w / d - ρ g dz/dx`, `dQ/dx = 0`.
pub struct SteadyPipeModel<'a> {
    pipe: &'a PipeProperties,
    fluid: &'a dyn FluidModel,
}

impl<'a> SteadyPipeModel<'a> {
    pub fn new(pipe: &'a PipeProperties, fluid: &'a dyn FluidModel) -> Self {
        Self { pipe, fluid }
    }

    pub fn local(&self, node: usize, state: &FlowState) -> LocalHydraulics {
        let wall = &self.pipe.wall;
        let diameter = self.pipe.effective_diameter();
        let density = self.fluid.density(node, state.pressure);
        let area = pressure_area(
            self.pipe.effective_area(),
            wall.compression_ratio(),
            state.pressure,
            wall.nominal_pressure.value,
        );
        let velocity = state.flow / area;
        let reynolds = velocity.abs() * diameter / self.fluid.viscosity(node);

        LocalHydraulics {
            density,
            area,
            velocity,
            reynolds,
            friction_factor: self.pipe.resistance(reynolds),
            regime: classify(reynolds, self.pipe.relative_roughness()),
        }
    }
}

impl ProfileModel for SteadyPipeModel<'_> {
    fn point_count(&self) -> usize {
        self.pipe.profile.point_count()
    }

    fn coordinate(&self, node: usize) -> Real {
        self.pipe.profile.coordinates()[node]
    }

    fn derivative(
        &self,
        node: usize,
        segment: usize,
        state: &FlowState,
    ) -> SolverResult<FlowState> {
        let local = self.local(node, state);
        let diameter = self.pipe.effective_diameter();

        let tau_w =
            local.friction_factor / 8.0 * local.density * local.velocity * local.velocity.abs();
        let slope = self.pipe.profile.height_derivative(segment);
        let dp_dx = -4.0 * tau_w / diameter - local.density * G0_MPS2 * slope;

        if !dp_dx.is_finite() {
            return Err(SolverError::Integration {
                what: format!(
                    "non-finite pressure gradient at node {node} (Re = {}, ρ = {})",
                    local.reynolds, local.density
                ),
            });
        }

        Ok(FlowState::new(dp_dx, 0.0))
    }
}
