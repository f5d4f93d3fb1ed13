//! Oil as a slightly compressible liquid.

use crate::model::FluidModel;
use crate::viscosity::{ViscosityDataPoint, ViscosityModel};
use pf_core::constants::ATM_PA;
use pf_core::{DomainError, DomainResult, Real, ensure_finite, ensure_positive};

/// Linear compressible-liquid density law.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OilDensityParameters {
    /// Density at the nominal pressure [kg/m³]
    pub nominal_density: Real,
    /// Bulk elasticity modulus K [Pa]
    pub fluid_elasticity_modulus: Real,
    /// Pressure at which `nominal_density` holds [Pa]
    pub nominal_pressure: Real,
}

impl Default for OilDensityParameters {
    fn default() -> Self {
        Self {
            nominal_density: 850.0,
            fluid_elasticity_modulus: 1.5e9,
            nominal_pressure: ATM_PA,
        }
    }
}

impl OilDensityParameters {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_positive(self.nominal_density, "nominal density")?;
        ensure_positive(self.fluid_elasticity_modulus, "fluid elasticity modulus")?;
        ensure_finite(self.nominal_pressure, "nominal pressure")?;
        Ok(())
    }

    /// Fluid compression ratio β = 1/K [1/Pa]
    pub fn compression_ratio(&self) -> Real {
        1.0 / self.fluid_elasticity_modulus
    }

    /// ρ(p) = ρ0 (1 + β (p - p0))
    pub fn density(&self, pressure: Real) -> Real {
        self.density_from(self.nominal_density, pressure)
    }

    /// Same law for an arbitrary nominal density sharing this compressibility.
    pub fn density_from(&self, nominal_density: Real, pressure: Real) -> Real {
        nominal_density * (1.0 + self.compression_ratio() * (pressure - self.nominal_pressure))
    }
}

/// Exponential viscosity law `nu(T) = nu0 exp(-k (T - T0))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OilViscosityParameters {
    /// [K]
    pub nominal_temperature: Real,
    /// [m²/s]
    pub nominal_viscosity: Real,
    /// [1/K]
    pub temperature_coefficient: Real,
}

impl Default for OilViscosityParameters {
    fn default() -> Self {
        Self {
            nominal_temperature: 293.15,
            nominal_viscosity: 15e-6,
            temperature_coefficient: 0.0,
        }
    }
}

impl OilViscosityParameters {
    /// Fit the exponential law through two samples; the first is the nominal point.
    pub fn from_samples(
        first: ViscosityDataPoint,
        second: ViscosityDataPoint,
    ) -> DomainResult<Self> {
        let (t1, t2) = (first.temperature.value, second.temperature.value);
        let v1 = ensure_positive(first.viscosity.value, "viscosity sample")?;
        let v2 = ensure_positive(second.viscosity.value, "viscosity sample")?;
        ensure_finite(t1, "sample temperature")?;
        ensure_finite(t2, "sample temperature")?;
        if t1 == t2 {
            return Err(DomainError::Degenerate {
                what: format!("viscosity samples share temperature {t1} K"),
            });
        }

        Ok(Self {
            nominal_temperature: t1,
            nominal_viscosity: v1,
            temperature_coefficient: (v1 / v2).ln() / (t2 - t1),
        })
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_finite(self.nominal_temperature, "nominal temperature")?;
        ensure_positive(self.nominal_viscosity, "nominal viscosity")?;
        ensure_finite(self.temperature_coefficient, "viscosity temperature coefficient")?;
        Ok(())
    }

    pub fn viscosity(&self, temperature: Real) -> Real {
        self.nominal_viscosity
            * (-self.temperature_coefficient * (temperature - self.nominal_temperature)).exp()
    }

    /// The same law expressed as a reconstructed viscosity model.
    pub fn to_model(&self) -> ViscosityModel {
        if self.temperature_coefficient == 0.0 {
            ViscosityModel::Constant {
                nu: self.nominal_viscosity,
            }
        } else {
            ViscosityModel::Exponential {
                nu_nominal: self.nominal_viscosity,
                k: self.temperature_coefficient,
                t_nominal: self.nominal_temperature,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OilHeatParameters {
    /// Specific heat capacity [J/(kg·K)]
    pub heat_capacity: Real,
}

impl Default for OilHeatParameters {
    fn default() -> Self {
        Self {
            heat_capacity: 2000.0,
        }
    }
}

/// Uniform oil at a single working temperature.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OilModel {
    pub density: OilDensityParameters,
    pub viscosity: OilViscosityParameters,
    pub heat: OilHeatParameters,
    /// Working temperature [K]; `None` evaluates viscosity at its nominal temperature.
    pub temperature: Option<Real>,
}

impl OilModel {
    pub fn new(
        density: OilDensityParameters,
        viscosity: OilViscosityParameters,
        temperature: Real,
    ) -> DomainResult<Self> {
        let oil = Self {
            density,
            viscosity,
            heat: OilHeatParameters::default(),
            temperature: Some(temperature),
        };
        oil.validate()?;
        Ok(oil)
    }

    pub fn with_heat(mut self, heat: OilHeatParameters) -> Self {
        self.heat = heat;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.density.validate()?;
        self.viscosity.validate()?;
        ensure_positive(self.heat.heat_capacity, "heat capacity")?;
        if let Some(t) = self.temperature {
            ensure_positive(t, "oil temperature")?;
        }
        ensure_positive(self.working_viscosity(), "working viscosity")?;
        Ok(())
    }

    pub fn working_temperature(&self) -> Real {
        self.temperature.unwrap_or(self.viscosity.nominal_temperature)
    }

    /// Kinematic viscosity at the working temperature.
    pub fn working_viscosity(&self) -> Real {
        self.viscosity.viscosity(self.working_temperature())
    }
}

impl FluidModel for OilModel {
    fn point_count(&self) -> Option<usize> {
        None
    }

    fn validate(&self) -> DomainResult<()> {
        OilModel::validate(self)
    }

    fn density(&self, _node: usize, pressure: Real) -> Real {
        self.density.density(pressure)
    }

    fn viscosity(&self, _node: usize) -> Real {
        self.working_viscosity()
    }

    fn compression_ratio(&self) -> Real {
        self.density.compression_ratio()
    }

    fn heat_capacity(&self, _node: usize) -> Real {
        self.heat.heat_capacity
    }
}

/// Wave speed in a liquid-filled elastic pipe: `sqrt(1 / (ρ (β_wall + β_fluid)))`.
pub fn speed_of_sound(beta_wall: Real, beta_fluid: Real, density: Real) -> Real {
    (1.0 / (density * (beta_wall + beta_fluid))).sqrt()
}

/// Flow area dilated by pressure: `S0 (1 + β_wall (p - p0))`.
pub fn pressure_area(
    nominal_area: Real,
    beta_wall: Real,
    pressure: Real,
    nominal_pressure: Real,
) -> Real {
    nominal_area * (1.0 + beta_wall * (pressure - nominal_pressure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{Tolerances, k, m2ps, nearly_equal};

    #[test]
    fn density_at_nominal_pressure_is_nominal() {
        let params = OilDensityParameters::default();
        assert_eq!(params.density(ATM_PA), 850.0);
    }

    #[test]
    fn density_grows_linearly_with_pressure() {
        let params = OilDensityParameters::default();
        let dp = 1.5e7;
        let rho = params.density(ATM_PA + dp);
        assert!(nearly_equal(rho, 850.0 * 1.01, Tolerances::default()));
    }

    #[test]
    fn zero_modulus_is_rejected() {
        let params = OilDensityParameters {
            fluid_elasticity_modulus: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn two_point_fit_passes_through_samples() {
        let first = ViscosityDataPoint::new(k(273.15), m2ps(40e-6));
        let second = ViscosityDataPoint::new(k(323.15), m2ps(8e-6));
        let params = OilViscosityParameters::from_samples(first, second).unwrap();
        let tol = Tolerances::relative(1e-12);
        assert!(nearly_equal(params.viscosity(273.15), 40e-6, tol));
        assert!(nearly_equal(params.viscosity(323.15), 8e-6, tol));
        assert!(params.temperature_coefficient > 0.0);
    }

    #[test]
    fn two_point_fit_rejects_same_temperature() {
        let first = ViscosityDataPoint::new(k(293.15), m2ps(10e-6));
        let second = ViscosityDataPoint::new(k(293.15), m2ps(8e-6));
        assert!(OilViscosityParameters::from_samples(first, second).is_err());
    }

    #[test]
    fn to_model_matches_law() {
        let params = OilViscosityParameters {
            temperature_coefficient: 0.03,
            ..Default::default()
        };
        let model = params.to_model();
        for t in [273.15, 293.15, 313.15] {
            assert!(nearly_equal(
                model.evaluate(t),
                params.viscosity(t),
                Tolerances::default()
            ));
        }
        assert!(matches!(
            OilViscosityParameters::default().to_model(),
            ViscosityModel::Constant { .. }
        ));
    }

    #[test]
    fn speed_of_sound_of_rigid_pipe() {
        // Rigid wall: a = sqrt(K/ρ)
        let a = speed_of_sound(0.0, 1.0 / 1.5e9, 850.0);
        assert!(nearly_equal(a, (1.5e9_f64 / 850.0).sqrt(), Tolerances::default()));
    }

    #[test]
    fn pressure_area_dilates() {
        let s = pressure_area(1.0, 1e-9, ATM_PA + 1e6, ATM_PA);
        assert!(nearly_equal(s, 1.001, Tolerances::default()));
    }

    #[test]
    fn oil_model_uses_working_temperature() {
        let viscosity = OilViscosityParameters {
            temperature_coefficient: 0.02,
            ..Default::default()
        };
        let oil = OilModel::new(OilDensityParameters::default(), viscosity, 303.15).unwrap();
        let expected = 15e-6 * (-0.2_f64).exp();
        assert!(nearly_equal(oil.viscosity(0), expected, Tolerances::default()));
        assert_eq!(oil.heat_capacity(0), 2000.0);
    }

    #[test]
    fn underflowing_working_viscosity_is_rejected() {
        let viscosity = OilViscosityParameters {
            temperature_coefficient: 1e3,
            ..Default::default()
        };
        let err = OilModel::new(OilDensityParameters::default(), viscosity, 323.15).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NonPositive {
                what: "working viscosity",
                ..
            }
        ));
    }
}
