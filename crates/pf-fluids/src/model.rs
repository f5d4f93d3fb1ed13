//! Fluid property model trait.

use pf_core::{DomainResult, Real};

/// Per-node liquid properties consumed by the pipe right-hand side.
///
/// Implementations must be thread-safe (Send + Sync) so that independent
/// solves can share one model.
pub trait FluidModel: Send + Sync {
    /// Number of grid nodes the model is defined on, `None` if uniform.
    fn point_count(&self) -> Option<usize>;

    /// Reject parameters that make any property non-finite or non-physical.
    fn validate(&self) -> DomainResult<()>;

    /// Density [kg/m³] at `node` and `pressure` [Pa].
    fn density(&self, node: usize, pressure: Real) -> Real;

    /// Kinematic viscosity [m²/s] at `node`.
    fn viscosity(&self, node: usize) -> Real;

    /// Fluid compression ratio [1/Pa].
    fn compression_ratio(&self) -> Real;

    /// Specific heat capacity [J/(kg·K)] at `node`.
    fn heat_capacity(&self, node: usize) -> Real;
}
