use crate::error::{DomainError, DomainResult};

/// Floating point type used throughout the system
pub type Real = f64;

/// Absolute + relative tolerance pair
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Purely relative tolerance.
    pub const fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// True when `ratio` lies strictly within `eps` of one.
pub fn is_near_unity(ratio: Real, eps: Real) -> bool {
    (ratio - 1.0).abs() < eps
}

pub fn ensure_finite(v: Real, what: &'static str) -> DomainResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DomainError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> DomainResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(DomainError::NonPositive { what, value: v })
    }
}

/// Check that `values` is finite and strictly increasing.
pub fn ensure_strictly_increasing(values: &[Real], what: &'static str) -> DomainResult<()> {
    for (i, &v) in values.iter().enumerate() {
        ensure_finite(v, what)?;
        if i > 0 && v <= values[i - 1] {
            return Err(DomainError::NotMonotonic { what, index: i });
        }
    }
    Ok(())
}
