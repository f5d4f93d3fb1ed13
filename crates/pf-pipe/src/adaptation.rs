use pf_core::{DomainResult, Real, ensure_positive};

/// Calibration multipliers fitted against measured operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptationParameters {
    /// Multiplier on the friction factor
    pub friction: Real,
    /// Multiplier on the inner diameter
    pub diameter: Real,
    /// Multiplier on the oil heat capacity
    pub heat_capacity: Real,
}

impl Default for AdaptationParameters {
    fn default() -> Self {
        Self {
            friction: 1.0,
            diameter: 1.0,
            heat_capacity: 1.0,
        }
    }
}

impl AdaptationParameters {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_positive(self.friction, "friction adaptation factor")?;
        ensure_positive(self.diameter, "diameter adaptation factor")?;
        ensure_positive(self.heat_capacity, "heat capacity adaptation factor")?;
        Ok(())
    }
}
