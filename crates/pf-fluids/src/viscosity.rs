//! Viscosity-temperature laws reconstructed from three samples.
//!
//! Three kinematic viscosities measured on a fixed temperature grid are
//! classified into one of three analytic families:
//!
//! - constant: `nu(T) = nu`
//! - exponential (Filonov-Reynolds): `nu(T) = nu_nominal * exp(-k (T - T2))`
//! - general (Reynolds-Vogel): `nu(T) = nu_inf * exp(b / (T - theta))`

use pf_core::{
    DomainError, DomainResult, KinVisc, Real, Temperature, ensure_positive,
    ensure_strictly_increasing, is_near_unity,
};

/// Closeness to unity that selects the constant and exponential regimes.
pub const REGIME_EPS: Real = 1e-4;

/// One measured (temperature, kinematic viscosity) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViscosityDataPoint {
    pub temperature: Temperature,
    pub viscosity: KinVisc,
}

impl ViscosityDataPoint {
    pub fn new(temperature: Temperature, viscosity: KinVisc) -> Self {
        Self {
            temperature,
            viscosity,
        }
    }
}

/// Temperatures (K) at which the three viscosity samples are taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViscosityGrid {
    pub temperatures: [Real; 3],
}

impl Default for ViscosityGrid {
    /// 0 °C, 20 °C and 50 °C.
    fn default() -> Self {
        Self {
            temperatures: [273.15, 293.15, 323.15],
        }
    }
}

impl ViscosityGrid {
    pub fn new(temperatures: [Real; 3]) -> DomainResult<Self> {
        let grid = Self { temperatures };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_strictly_increasing(&self.temperatures, "viscosity grid temperatures")
    }

    /// Spacing ratio `(T3 - T2) / (T2 - T1)`.
    fn spacing_ratio(&self) -> Real {
        let [t1, t2, t3] = self.temperatures;
        (t3 - t2) / (t2 - t1)
    }
}

/// Reconstructed viscosity law.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViscosityModel {
    Constant {
        nu: Real,
    },
    Exponential {
        nu_nominal: Real,
        k: Real,
        t_nominal: Real,
    },
    General {
        nu_inf: Real,
        theta: Real,
        b: Real,
    },
}

impl ViscosityModel {
    /// Kinematic viscosity (m²/s) at temperature `t` (K).
    pub fn evaluate(&self, t: Real) -> Real {
        match *self {
            ViscosityModel::Constant { nu } => nu,
            ViscosityModel::Exponential {
                nu_nominal,
                k,
                t_nominal,
            } => nu_nominal * (-k * (t - t_nominal)).exp(),
            ViscosityModel::General { nu_inf, theta, b } => nu_inf * (b / (t - theta)).exp(),
        }
    }

    /// Legacy NaN-tagged coefficient triple.
    ///
    /// The exponential nominal temperature is not part of the triple; it is
    /// implied by the grid's middle temperature.
    pub fn to_triple(&self) -> [Real; 3] {
        match *self {
            ViscosityModel::Constant { nu } => [nu, Real::NAN, Real::NAN],
            ViscosityModel::Exponential { nu_nominal, k, .. } => [nu_nominal, k, Real::NAN],
            ViscosityModel::General { nu_inf, theta, b } => [nu_inf, theta, b],
        }
    }

    /// Decode a NaN-tagged triple produced on `grid`.
    pub fn from_triple(grid: &ViscosityGrid, coeffs: [Real; 3]) -> DomainResult<Self> {
        match (coeffs[0].is_nan(), coeffs[1].is_nan(), coeffs[2].is_nan()) {
            (false, true, true) => Ok(ViscosityModel::Constant { nu: coeffs[0] }),
            (false, false, true) => Ok(ViscosityModel::Exponential {
                nu_nominal: coeffs[0],
                k: coeffs[1],
                t_nominal: grid.temperatures[1],
            }),
            (false, false, false) => Ok(ViscosityModel::General {
                nu_inf: coeffs[0],
                theta: coeffs[1],
                b: coeffs[2],
            }),
            _ => Err(DomainError::Degenerate {
                what: format!("ambiguous viscosity coefficient triple {coeffs:?}"),
            }),
        }
    }
}

/// Classify three samples taken on `grid` and fit the matching law.
pub fn reconstruct(grid: &ViscosityGrid, samples: [Real; 3]) -> DomainResult<ViscosityModel> {
    grid.validate()?;
    for v in samples {
        ensure_positive(v, "viscosity sample")?;
    }

    let [t1, t2, t3] = grid.temperatures;
    let [v0, v1, v2] = samples;

    let r23 = v1 / v2;
    let r31 = v2 / v0;
    if is_near_unity(r23, REGIME_EPS) && is_near_unity(r31, REGIME_EPS) {
        return Ok(ViscosityModel::Constant { nu: v0 });
    }

    let log01 = (v0 / v1).ln();
    let a = grid.spacing_ratio() * log01 / r23.ln();
    if !a.is_finite() {
        return Err(DomainError::Degenerate {
            what: format!("viscosity regime exponent is not finite for samples {samples:?}"),
        });
    }

    if is_near_unity(a, REGIME_EPS) {
        tracing::debug!(a, ?samples, "viscosity samples fall on the exponential law");
        return Ok(ViscosityModel::Exponential {
            nu_nominal: v1,
            k: log01 / (t2 - t1),
            t_nominal: t2,
        });
    }

    if a < 1.0 {
        return Err(DomainError::Degenerate {
            what: format!("viscosity regime exponent {a} < 1 for samples {samples:?}"),
        });
    }

    let nu_inf = v2 * r31.powf(1.0 / (a - 1.0));
    let theta = (t3 - a * t1) / (1.0 - a);
    let b = (t1 - theta) * (t2 - theta) / (t2 - t1) * log01;

    if !(nu_inf.is_finite() && theta.is_finite() && b.is_finite()) {
        return Err(DomainError::Degenerate {
            what: format!("general viscosity law is not finite for samples {samples:?}"),
        });
    }

    Ok(ViscosityModel::General { nu_inf, theta, b })
}

/// Scale `samples` so the reconstructed law passes through
/// (`working_temperature`, `working_viscosity`).
pub fn adapt(
    grid: &ViscosityGrid,
    samples: [Real; 3],
    working_viscosity: Real,
    working_temperature: Real,
) -> DomainResult<[Real; 3]> {
    ensure_positive(working_viscosity, "working viscosity")?;
    let model = reconstruct(grid, samples)?;
    let evaluated = model.evaluate(working_temperature);
    if evaluated == 0.0 {
        return Err(DomainError::Degenerate {
            what: format!("viscosity law evaluates to zero at {working_temperature} K"),
        });
    }

    let factor = working_viscosity / evaluated;
    if !factor.is_finite() {
        return Err(DomainError::NonFinite {
            what: "viscosity adaptation factor",
            value: factor,
        });
    }

    Ok(samples.map(|v| v * factor))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rel_close(a: Real, b: Real) -> bool {
        ((a - b) / b).abs() < 1e-6
    }

    proptest! {
        #[test]
        fn general_round_trip(
            nu_inf in 1e-7_f64..1e-5,
            theta in 100.0_f64..250.0,
            b in 50.0_f64..1000.0,
        ) {
            let grid = ViscosityGrid::default();
            let samples = grid.temperatures.map(|t| nu_inf * (b / (t - theta)).exp());
            let model = reconstruct(&grid, samples).unwrap();
            for (t, v) in grid.temperatures.iter().zip(samples.iter()) {
                prop_assert!(rel_close(model.evaluate(*t), *v));
            }
        }

        #[test]
        fn exponential_round_trip(nu in 1e-6_f64..1e-4, k in 0.005_f64..0.1) {
            let grid = ViscosityGrid::default();
            let samples = grid.temperatures.map(|t| nu * (-k * (t - 293.15)).exp());
            let model = reconstruct(&grid, samples).unwrap();
            let is_exponential = matches!(model, ViscosityModel::Exponential { .. });
            prop_assert!(is_exponential);
            for (t, v) in grid.temperatures.iter().zip(samples.iter()) {
                prop_assert!(rel_close(model.evaluate(*t), *v));
            }
        }

        #[test]
        fn adapted_samples_are_fixed_point(scale in 0.2_f64..5.0, t_work in 280.0_f64..320.0) {
            let grid = ViscosityGrid::default();
            let samples = grid.temperatures.map(|t| 1e-6 * (300.0 / (t - 200.0)).exp());
            let target = scale * 2e-5;
            let once = adapt(&grid, samples, target, t_work).unwrap();
            let twice = adapt(&grid, once, target, t_work).unwrap();
            for (a, b) in once.iter().zip(twice.iter()) {
                prop_assert!(((a - b) / a).abs() < 1e-9);
            }
        }
    }
}
