//! Darcy friction factor correlations.
//!
//! The default correlation (Isaev) blends laminar, transitional, smooth
//! turbulent and fully rough branches. Branch thresholds are exact:
//! `Re = 1`, `Re = 2320`, `Re = 4000` and `Re = 560 / k`.

use pf_core::{DomainError, DomainResult, Real};

pub const RE_LAMINAR_FLOOR: Real = 1.0;
pub const RE_LAMINAR_LIMIT: Real = 2320.0;
pub const RE_TURBULENT_START: Real = 4000.0;
pub const ROUGH_ZONE_NUMBER: Real = 560.0;

/// Branch of the Isaev correlation selected by (Re, k).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    /// Re < 1, factor held at its Re = 1 value
    Creeping,
    Laminar,
    Transitional,
    /// Smooth-to-transitional turbulent
    Turbulent,
    FullyRough,
}

pub fn classify(reynolds: Real, relative_roughness: Real) -> FlowRegime {
    if reynolds < RE_LAMINAR_FLOOR {
        FlowRegime::Creeping
    } else if reynolds < RE_LAMINAR_LIMIT {
        FlowRegime::Laminar
    } else if reynolds < RE_TURBULENT_START {
        FlowRegime::Transitional
    } else if reynolds < ROUGH_ZONE_NUMBER / relative_roughness {
        FlowRegime::Turbulent
    } else {
        FlowRegime::FullyRough
    }
}

fn laminar(reynolds: Real) -> Real {
    64.0 / reynolds
}

fn blasius(reynolds: Real) -> Real {
    0.3164 / reynolds.powf(0.25)
}

/// True when `reynolds` sits exactly on one of the Isaev branch thresholds.
pub fn on_regime_boundary(reynolds: Real, relative_roughness: Real) -> bool {
    [
        RE_LAMINAR_FLOOR,
        RE_LAMINAR_LIMIT,
        RE_TURBULENT_START,
        ROUGH_ZONE_NUMBER / relative_roughness,
    ]
    .contains(&reynolds)
}

/// Isaev correlation over all flow regimes.
pub fn hydraulic_resistance_isaev(reynolds: Real, relative_roughness: Real) -> Real {
    if on_regime_boundary(reynolds, relative_roughness) {
        tracing::debug!(
            reynolds,
            relative_roughness,
            "Reynolds number on a friction regime threshold"
        );
    }
    match classify(reynolds, relative_roughness) {
        FlowRegime::Creeping => laminar(RE_LAMINAR_FLOOR),
        FlowRegime::Laminar => laminar(reynolds),
        FlowRegime::Transitional => {
            let gamma = 1.0 - (-0.002 * (reynolds - RE_LAMINAR_LIMIT)).exp();
            (1.0 - gamma) * laminar(reynolds) + gamma * blasius(reynolds)
        }
        FlowRegime::Turbulent => {
            let arg = 6.8 / reynolds + (relative_roughness / 3.7).powf(1.1);
            1.0 / (-1.8 * arg.log10()).powi(2)
        }
        FlowRegime::FullyRough => hydraulic_resistance_shifrinson(relative_roughness),
    }
}

/// Shifrinson: fully rough pipes, independent of Re.
pub fn hydraulic_resistance_shifrinson(relative_roughness: Real) -> Real {
    0.11 * relative_roughness.powf(0.25)
}

/// Altshul: turbulent pipes, `0.11 (k + 68/Re)^0.25`.
pub fn hydraulic_resistance_altshul(reynolds: Real, relative_roughness: Real) -> Real {
    0.11 * (relative_roughness + 68.0 / reynolds).powf(0.25)
}

/// Friction factor strategy chosen when the pipe is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrictionModel {
    #[default]
    Isaev,
    Shifrinson,
    Altshul,
}

impl FrictionModel {
    pub fn factor(self, reynolds: Real, relative_roughness: Real) -> Real {
        match self {
            FrictionModel::Isaev => hydraulic_resistance_isaev(reynolds, relative_roughness),
            FrictionModel::Shifrinson => hydraulic_resistance_shifrinson(relative_roughness),
            FrictionModel::Altshul => hydraulic_resistance_altshul(reynolds, relative_roughness),
        }
    }

    /// `factor` with the inputs checked for a well-defined regime.
    pub fn checked_factor(self, reynolds: Real, relative_roughness: Real) -> DomainResult<Real> {
        if !relative_roughness.is_finite() || relative_roughness <= 0.0 {
            return Err(DomainError::NonPositive {
                what: "relative roughness",
                value: relative_roughness,
            });
        }
        if !reynolds.is_finite() || reynolds < 0.0 {
            return Err(DomainError::NonFinite {
                what: "Reynolds number",
                value: reynolds,
            });
        }
        Ok(self.factor(reynolds, relative_roughness))
    }

    pub fn name(self) -> &'static str {
        match self {
            FrictionModel::Isaev => "isaev",
            FrictionModel::Shifrinson => "shifrinson",
            FrictionModel::Altshul => "altshul",
        }
    }
}

impl std::str::FromStr for FrictionModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "isaev" => Ok(FrictionModel::Isaev),
            "shifrinson" => Ok(FrictionModel::Shifrinson),
            "altshul" => Ok(FrictionModel::Altshul),
            _ => Err(DomainError::InvalidArg {
                what: "unknown friction model",
            }),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn laminar_branch_decreases(re1 in 1.0_f64..2319.0, delta in 1e-3_f64..1000.0) {
            let re2 = (re1 + delta).min(2319.999);
            prop_assume!(re2 > re1);
            let k = 1e-4 / 0.7;
            prop_assert!(hydraulic_resistance_isaev(re1, k) > hydraulic_resistance_isaev(re2, k));
        }

        #[test]
        fn factor_is_positive_and_finite(re in 0.0_f64..1e8, k in 1e-6_f64..1e-2) {
            let f = hydraulic_resistance_isaev(re, k);
            prop_assert!(f.is_finite() && f > 0.0);
        }
    }
}
