//! YAML scenario file: one pipe, one oil, one pair of boundary pressures.

use crate::error::{CliError, CliResult};
use pf_core::constants::ATM_PA;
use pf_core::{Pressure, m, pa};
use pf_fluids::{
    FluidModel, FluidPropertiesProfile, OilDensityParameters, OilHeatParameters, OilModel,
    OilViscosityParameters, ViscosityGrid,
};
use pf_pipe::{AdaptationParameters, FrictionModel, PipeProfile, PipeProperties, PipeWall};
use pf_solver::{NewtonConfig, ShootingConfig, ShootingSolver};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub pipe: PipeDef,
    #[serde(default)]
    pub oil: OilDef,
    pub boundary: BoundaryDef,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipeDef {
    /// Route length for a straight profile [m]
    #[serde(default)]
    pub length: Option<f64>,
    /// Surveyed coordinates [m]; takes precedence over `length`
    #[serde(default)]
    pub coordinates: Option<Vec<f64>>,
    /// Surveyed heights [m], one per coordinate
    #[serde(default)]
    pub heights: Option<Vec<f64>>,
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default)]
    pub inlet_height: f64,
    #[serde(default)]
    pub outlet_height: f64,
    pub diameter: f64,
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f64,
    #[serde(default = "default_roughness")]
    pub roughness: f64,
    #[serde(default = "default_friction")]
    pub friction: String,
    #[serde(default)]
    pub adaptation: AdaptationDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdaptationDef {
    #[serde(default = "one")]
    pub friction: f64,
    #[serde(default = "one")]
    pub diameter: f64,
    #[serde(default = "one")]
    pub heat_capacity: f64,
}

impl Default for AdaptationDef {
    fn default() -> Self {
        Self {
            friction: 1.0,
            diameter: 1.0,
            heat_capacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OilDef {
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default = "default_elasticity_modulus")]
    pub elasticity_modulus: f64,
    #[serde(default = "default_nominal_pressure")]
    pub nominal_pressure: f64,
    /// Working temperature [K]
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_heat_capacity")]
    pub heat_capacity: f64,
    #[serde(default)]
    pub viscosity: Option<ViscosityDef>,
    /// Kinematic viscosity at 0, 20 and 50 °C [m²/s]
    #[serde(default)]
    pub viscosity_samples: Option<[f64; 3]>,
}

impl Default for OilDef {
    fn default() -> Self {
        Self {
            density: default_density(),
            elasticity_modulus: default_elasticity_modulus(),
            nominal_pressure: default_nominal_pressure(),
            temperature: None,
            heat_capacity: default_heat_capacity(),
            viscosity: None,
            viscosity_samples: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViscosityDef {
    pub nominal_temperature: f64,
    pub nominal_viscosity: f64,
    #[serde(default)]
    pub temperature_coefficient: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryDef {
    pub inlet_pressure: f64,
    pub outlet_pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverDef {
    #[serde(default)]
    pub initial_flow: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_derivative_step")]
    pub derivative_step: f64,
    /// `null` disables the step boundary
    #[serde(default = "default_relative_boundary")]
    pub relative_boundary: Option<f64>,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            initial_flow: 0.0,
            max_iterations: default_max_iterations(),
            derivative_step: default_derivative_step(),
            relative_boundary: default_relative_boundary(),
        }
    }
}

fn default_points() -> usize {
    101
}

fn default_wall_thickness() -> f64 {
    0.01
}

fn default_roughness() -> f64 {
    1e-4
}

fn default_friction() -> String {
    FrictionModel::default().name().to_string()
}

fn one() -> f64 {
    1.0
}

fn default_density() -> f64 {
    OilDensityParameters::default().nominal_density
}

fn default_elasticity_modulus() -> f64 {
    OilDensityParameters::default().fluid_elasticity_modulus
}

fn default_nominal_pressure() -> f64 {
    ATM_PA
}

fn default_heat_capacity() -> f64 {
    OilHeatParameters::default().heat_capacity
}

fn default_max_iterations() -> usize {
    NewtonConfig::default().max_iterations
}

fn default_derivative_step() -> f64 {
    NewtonConfig::default().derivative_step
}

fn default_relative_boundary() -> Option<f64> {
    NewtonConfig::default().relative_boundary
}

pub fn load_yaml(path: &Path) -> CliResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    Scenario::from_yaml(&content)
}

impl Scenario {
    pub fn from_yaml(content: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn pipe(&self) -> CliResult<PipeProperties> {
        let def = &self.pipe;
        let profile = match (&def.coordinates, &def.heights) {
            (Some(coordinates), Some(heights)) => {
                PipeProfile::from_heights(coordinates.clone(), heights.clone())?
                    .resampled(def.points)?
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(CliError::Argument {
                    what: "pipe coordinates and heights must be given together".into(),
                });
            }
            (None, None) => {
                let length = def.length.ok_or_else(|| CliError::Argument {
                    what: "pipe needs either `length` or `coordinates` + `heights`".into(),
                })?;
                PipeProfile::uniform(0.0, length, def.inlet_height, def.outlet_height, def.points)?
            }
        };

        let wall = PipeWall::new(m(def.diameter), m(def.wall_thickness), m(def.roughness))?;
        let adaptation = AdaptationParameters {
            friction: def.adaptation.friction,
            diameter: def.adaptation.diameter,
            heat_capacity: def.adaptation.heat_capacity,
        };
        let friction: FrictionModel = def.friction.parse()?;

        Ok(PipeProperties::new(profile, wall)?
            .with_friction(friction)
            .with_adaptation(adaptation)?)
    }

    /// Uniform oil, or a per-node profile when viscosity samples are given.
    pub fn fluid(&self, point_count: usize) -> CliResult<Box<dyn FluidModel>> {
        let def = &self.oil;
        let density = OilDensityParameters {
            nominal_density: def.density,
            fluid_elasticity_modulus: def.elasticity_modulus,
            nominal_pressure: def.nominal_pressure,
        };
        let heat = OilHeatParameters {
            heat_capacity: def.heat_capacity,
        };

        match (&def.viscosity, def.viscosity_samples) {
            (Some(_), Some(_)) => Err(CliError::Argument {
                what: "oil takes either `viscosity` or `viscosity_samples`, not both".into(),
            }),
            (_, Some(samples)) => {
                let grid = ViscosityGrid::default();
                let temperature = def
                    .temperature
                    .unwrap_or(OilViscosityParameters::default().nominal_temperature);
                let profile = FluidPropertiesProfile::from_samples(
                    &grid,
                    vec![def.density; point_count],
                    &vec![samples; point_count],
                    vec![temperature; point_count],
                    density,
                )?;
                Ok(Box::new(profile.with_heat(heat)))
            }
            (viscosity, None) => {
                let viscosity = viscosity
                    .as_ref()
                    .map(|v| OilViscosityParameters {
                        nominal_temperature: v.nominal_temperature,
                        nominal_viscosity: v.nominal_viscosity,
                        temperature_coefficient: v.temperature_coefficient,
                    })
                    .unwrap_or_default();
                let oil = OilModel {
                    density,
                    viscosity,
                    heat,
                    temperature: def.temperature,
                };
                oil.validate()?;
                Ok(Box::new(oil))
            }
        }
    }

    pub fn solver(&self) -> ShootingSolver {
        let def = &self.solver;
        ShootingSolver::new(ShootingConfig {
            initial_flow: def.initial_flow,
            newton: NewtonConfig {
                max_iterations: def.max_iterations,
                derivative_step: def.derivative_step,
                relative_boundary: def.relative_boundary,
                ..Default::default()
            },
        })
    }

    pub fn boundaries(&self) -> (Pressure, Pressure) {
        (
            pa(self.boundary.inlet_pressure),
            pa(self.boundary.outlet_pressure),
        )
    }
}
