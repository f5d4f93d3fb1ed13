//! Pipe properties aggregate handed to the hydraulic solver.

use crate::adaptation::AdaptationParameters;
use crate::friction::FrictionModel;
use crate::profile::PipeProfile;
use crate::wall::PipeWall;
use pf_core::{DomainResult, Real};

/// Profile, wall, calibration and friction strategy of one pipe segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeProperties {
    pub profile: PipeProfile,
    pub wall: PipeWall,
    pub adaptation: AdaptationParameters,
    pub friction: FrictionModel,
}

impl PipeProperties {
    pub fn new(profile: PipeProfile, wall: PipeWall) -> DomainResult<Self> {
        let pipe = Self {
            profile,
            wall,
            adaptation: AdaptationParameters::default(),
            friction: FrictionModel::default(),
        };
        pipe.validate()?;
        Ok(pipe)
    }

    pub fn with_friction(mut self, friction: FrictionModel) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_adaptation(mut self, adaptation: AdaptationParameters) -> DomainResult<Self> {
        adaptation.validate()?;
        self.adaptation = adaptation;
        Ok(self)
    }

    /// Re-check every invariant; fields are public and may have been edited.
    pub fn validate(&self) -> DomainResult<()> {
        self.profile.validate()?;
        self.wall.validate()?;
        self.adaptation.validate()
    }

    /// Inner diameter with the diameter calibration applied [m]
    pub fn effective_diameter(&self) -> Real {
        self.wall.diameter.value * self.adaptation.diameter
    }

    /// Nominal flow area of the effective diameter [m²]
    pub fn effective_area(&self) -> Real {
        std::f64::consts::PI * self.effective_diameter().powi(2) / 4.0
    }

    /// Roughness relative to the effective diameter
    pub fn relative_roughness(&self) -> Real {
        self.wall.equivalent_roughness.value / self.effective_diameter()
    }

    /// Calibrated friction factor at `reynolds`.
    pub fn resistance(&self, reynolds: Real) -> Real {
        self.friction.factor(reynolds, self.relative_roughness()) * self.adaptation.friction
    }

    /// Calibrated heat capacity for a raw oil value [J/(kg·K)]
    pub fn heat_capacity(&self, raw: Real) -> Real {
        raw * self.adaptation.heat_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friction::hydraulic_resistance_isaev;
    use pf_core::{Tolerances, m, nearly_equal};

    fn pipe() -> PipeProperties {
        let profile = PipeProfile::uniform(0.0, 1000.0, 0.0, 0.0, 11).unwrap();
        let wall = PipeWall::new(m(0.5), m(0.008), m(5e-5)).unwrap();
        PipeProperties::new(profile, wall).unwrap()
    }

    #[test]
    fn neutral_adaptation_matches_wall() {
        let p = pipe();
        assert_eq!(p.effective_diameter(), 0.5);
        assert_eq!(p.relative_roughness(), p.wall.relative_roughness());
        assert_eq!(
            p.resistance(1e5),
            hydraulic_resistance_isaev(1e5, p.wall.relative_roughness())
        );
    }

    #[test]
    fn adaptation_scales_friction_and_diameter() {
        let p = pipe()
            .with_adaptation(AdaptationParameters {
                friction: 1.1,
                diameter: 0.98,
                heat_capacity: 1.05,
            })
            .unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(p.effective_diameter(), 0.49, tol));
        assert!(nearly_equal(
            p.resistance(1e5),
            1.1 * hydraulic_resistance_isaev(1e5, 5e-5 / 0.49),
            tol
        ));
        assert!(nearly_equal(p.heat_capacity(2000.0), 2100.0, tol));
    }

    #[test]
    fn selected_friction_model_is_used() {
        let p = pipe().with_friction(FrictionModel::Shifrinson);
        assert_eq!(p.resistance(10.0), p.resistance(1e7));
    }
}
