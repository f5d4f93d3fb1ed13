//! Fluid properties sampled on the pipe grid.

use crate::model::FluidModel;
use crate::oil::{OilDensityParameters, OilHeatParameters, OilModel};
use crate::viscosity::{ViscosityGrid, ViscosityModel, reconstruct};
use pf_core::{DomainError, DomainResult, Real, ensure_positive};

/// Nominal density, viscosity law and temperature at every grid node.
///
/// All node vectors have the same length, which must match the pipe
/// profile the model is used with.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidPropertiesProfile {
    nominal_density: Vec<Real>,
    viscosity: Vec<ViscosityModel>,
    temperature: Vec<Real>,
    compressibility: OilDensityParameters,
    heat: OilHeatParameters,
}

impl FluidPropertiesProfile {
    pub fn new(
        nominal_density: Vec<Real>,
        viscosity: Vec<ViscosityModel>,
        temperature: Vec<Real>,
        compressibility: OilDensityParameters,
    ) -> DomainResult<Self> {
        let profile = Self {
            nominal_density,
            viscosity,
            temperature,
            compressibility,
            heat: OilHeatParameters::default(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Node vectors agree in length and every node has a finite, positive
    /// density and viscosity.
    pub fn validate(&self) -> DomainResult<()> {
        self.compressibility.validate()?;
        ensure_positive(self.heat.heat_capacity, "heat capacity")?;
        let n = self.nominal_density.len();
        if n == 0 {
            return Err(DomainError::InvalidArg {
                what: "fluid profile needs at least one node",
            });
        }
        for (what, len) in [
            ("fluid profile viscosity", self.viscosity.len()),
            ("fluid profile temperature", self.temperature.len()),
        ] {
            if len != n {
                return Err(DomainError::SizeMismatch {
                    what,
                    expected: n,
                    actual: len,
                });
            }
        }
        for node in 0..n {
            ensure_positive(self.nominal_density[node], "fluid profile density")?;
            ensure_positive(self.temperature[node], "fluid profile temperature")?;
            ensure_positive(
                self.viscosity[node].evaluate(self.temperature[node]),
                "fluid profile viscosity",
            )?;
        }
        Ok(())
    }

    /// `point_count` copies of a uniform oil.
    pub fn uniform(oil: &OilModel, point_count: usize) -> DomainResult<Self> {
        oil.validate()?;
        let profile = Self::new(
            vec![oil.density.nominal_density; point_count],
            vec![oil.viscosity.to_model(); point_count],
            vec![oil.working_temperature(); point_count],
            oil.density,
        )?;
        Ok(profile.with_heat(oil.heat))
    }

    /// Reconstruct a viscosity law per node from three samples on `grid`.
    pub fn from_samples(
        grid: &ViscosityGrid,
        nominal_density: Vec<Real>,
        samples: &[[Real; 3]],
        temperature: Vec<Real>,
        compressibility: OilDensityParameters,
    ) -> DomainResult<Self> {
        let viscosity = samples
            .iter()
            .map(|s| reconstruct(grid, *s))
            .collect::<DomainResult<Vec<_>>>()?;
        Self::new(nominal_density, viscosity, temperature, compressibility)
    }

    pub fn with_heat(mut self, heat: OilHeatParameters) -> Self {
        self.heat = heat;
        self
    }

    pub fn len(&self) -> usize {
        self.nominal_density.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nominal_density.is_empty()
    }

    pub fn viscosity_models(&self) -> &[ViscosityModel] {
        &self.viscosity
    }

    pub fn temperatures(&self) -> &[Real] {
        &self.temperature
    }
}

impl FluidModel for FluidPropertiesProfile {
    fn point_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn validate(&self) -> DomainResult<()> {
        FluidPropertiesProfile::validate(self)
    }

    fn density(&self, node: usize, pressure: Real) -> Real {
        self.compressibility.density_from(self.nominal_density[node], pressure)
    }

    fn viscosity(&self, node: usize) -> Real {
        self.viscosity[node].evaluate(self.temperature[node])
    }

    fn compression_ratio(&self) -> Real {
        self.compressibility.compression_ratio()
    }

    fn heat_capacity(&self, _node: usize) -> Real {
        self.heat.heat_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oil::OilViscosityParameters;
    use pf_core::constants::ATM_PA;
    use pf_core::{Tolerances, nearly_equal};

    #[test]
    fn uniform_matches_oil() {
        let oil = OilModel::new(
            OilDensityParameters::default(),
            OilViscosityParameters {
                temperature_coefficient: 0.03,
                ..Default::default()
            },
            303.15,
        )
        .unwrap();
        let profile = FluidPropertiesProfile::uniform(&oil, 5).unwrap();
        assert_eq!(profile.point_count(), Some(5));
        for node in 0..5 {
            assert!(nearly_equal(
                profile.viscosity(node),
                oil.viscosity(node),
                Tolerances::default()
            ));
            assert_eq!(profile.density(node, 2e6), oil.density(node, 2e6));
        }
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = FluidPropertiesProfile::new(
            vec![850.0; 3],
            vec![ViscosityModel::Constant { nu: 1e-5 }; 2],
            vec![293.15; 3],
            OilDensityParameters::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::SizeMismatch {
                what: "fluid profile viscosity",
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn per_node_samples_are_reconstructed() {
        let grid = ViscosityGrid::default();
        let law = |t: Real| 1e-6 * (300.0 / (t - 200.0)).exp();
        let samples = [grid.temperatures.map(law), [8e-6; 3]];
        let profile = FluidPropertiesProfile::from_samples(
            &grid,
            vec![860.0, 840.0],
            &samples,
            vec![293.15, 293.15],
            OilDensityParameters::default(),
        )
        .unwrap();

        assert!(matches!(
            profile.viscosity_models()[0],
            ViscosityModel::General { .. }
        ));
        assert!(nearly_equal(
            profile.viscosity(0),
            law(293.15),
            Tolerances::relative(1e-6)
        ));
        assert_eq!(profile.viscosity(1), 8e-6);
        assert_eq!(profile.density(1, ATM_PA), 840.0);
    }

    #[test]
    fn bad_samples_fail_before_use() {
        let grid = ViscosityGrid::default();
        let result = FluidPropertiesProfile::from_samples(
            &grid,
            vec![850.0],
            &[[30e-6, 20e-6, 25e-6]],
            vec![293.15],
            OilDensityParameters::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn infinite_viscosity_at_vogel_pole_is_rejected() {
        // T == theta puts the law on its pole
        let err = FluidPropertiesProfile::new(
            vec![850.0; 3],
            vec![
                ViscosityModel::General {
                    nu_inf: 1e-6,
                    theta: 293.15,
                    b: 300.0,
                };
                3
            ],
            vec![293.15; 3],
            OilDensityParameters::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NonFinite {
                what: "fluid profile viscosity",
                ..
            }
        ));
    }

    #[test]
    fn trait_validation_covers_later_edits() {
        let profile = FluidPropertiesProfile::uniform(&OilModel::default(), 3)
            .unwrap()
            .with_heat(OilHeatParameters { heat_capacity: 0.0 });
        let fluid: &dyn FluidModel = &profile;
        assert!(matches!(
            fluid.validate(),
            Err(DomainError::NonPositive {
                what: "heat capacity",
                ..
            })
        ));
    }

    #[test]
    fn vanishing_viscosity_is_rejected() {
        let err = FluidPropertiesProfile::new(
            vec![850.0],
            vec![ViscosityModel::Constant { nu: 0.0 }],
            vec![293.15],
            OilDensityParameters::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::NonPositive { .. }));
    }
}
