//! Pipe wall: geometry, roughness and elastic compliance.

use pf_core::constants::ATM_PA;
use pf_core::{DomainError, DomainResult, Length, Pressure, Real, ensure_positive, pa};

#[derive(Debug, Clone, PartialEq)]
pub struct PipeWall {
    /// Inner diameter
    pub diameter: Length,
    pub wall_thickness: Length,
    /// Equivalent (absolute) roughness
    pub equivalent_roughness: Length,
    /// Pressure at which the cross-section is nominal
    pub nominal_pressure: Pressure,
    /// Young's modulus of the wall material
    pub wall_elasticity_modulus: Pressure,
    pub poisson_ratio: Real,
}

impl PipeWall {
    /// Steel wall with the given geometry.
    pub fn new(
        diameter: Length,
        wall_thickness: Length,
        equivalent_roughness: Length,
    ) -> DomainResult<Self> {
        let wall = Self {
            diameter,
            wall_thickness,
            equivalent_roughness,
            nominal_pressure: pa(ATM_PA),
            wall_elasticity_modulus: pa(2e11),
            poisson_ratio: 0.28,
        };
        wall.validate()?;
        Ok(wall)
    }

    pub fn with_elasticity(
        mut self,
        wall_elasticity_modulus: Pressure,
        poisson_ratio: Real,
    ) -> DomainResult<Self> {
        self.wall_elasticity_modulus = wall_elasticity_modulus;
        self.poisson_ratio = poisson_ratio;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_positive(self.diameter.value, "pipe diameter")?;
        ensure_positive(self.wall_thickness.value, "pipe wall thickness")?;
        ensure_positive(self.equivalent_roughness.value, "pipe roughness")?;
        ensure_positive(self.wall_elasticity_modulus.value, "wall elasticity modulus")?;
        if !self.nominal_pressure.value.is_finite() {
            return Err(DomainError::NonFinite {
                what: "wall nominal pressure",
                value: self.nominal_pressure.value,
            });
        }
        if !(0.0..0.5).contains(&self.poisson_ratio) {
            return Err(DomainError::InvalidArg {
                what: "poisson ratio must lie in [0, 0.5)",
            });
        }
        Ok(())
    }

    /// Cross-section compression ratio β_wall = (1 - ν²) d / (E δ) [1/Pa]
    pub fn compression_ratio(&self) -> Real {
        (1.0 - self.poisson_ratio.powi(2)) * self.diameter.value
            / (self.wall_elasticity_modulus.value * self.wall_thickness.value)
    }

    pub fn relative_roughness(&self) -> Real {
        self.equivalent_roughness.value / self.diameter.value
    }

    /// Nominal flow area πd²/4 [m²]
    pub fn nominal_area(&self) -> Real {
        std::f64::consts::PI * self.diameter.value.powi(2) / 4.0
    }
}
