//! Route profile of a pipe segment.

use pf_core::{DomainError, DomainResult, Real, ensure_finite, ensure_strictly_increasing};

/// Coordinates, elevations and capacity at every grid node.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeProfile {
    coordinates: Vec<Real>,
    heights: Vec<Real>,
    capacity: Vec<Real>,
}

impl PipeProfile {
    /// Build a profile, checking sizes and monotonic coordinates.
    pub fn new(
        coordinates: Vec<Real>,
        heights: Vec<Real>,
        capacity: Vec<Real>,
    ) -> DomainResult<Self> {
        let profile = Self {
            coordinates,
            heights,
            capacity,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Profile with zero capacity at every node.
    pub fn from_heights(coordinates: Vec<Real>, heights: Vec<Real>) -> DomainResult<Self> {
        let capacity = vec![0.0; coordinates.len()];
        Self::new(coordinates, heights, capacity)
    }

    /// Uniform grid of `points` nodes from `start` to `end`, elevation
    /// interpolated linearly between `start_height` and `end_height`.
    pub fn uniform(
        start: Real,
        end: Real,
        start_height: Real,
        end_height: Real,
        points: usize,
    ) -> DomainResult<Self> {
        if points < 2 {
            return Err(DomainError::SizeMismatch {
                what: "profile points",
                expected: 2,
                actual: points,
            });
        }
        let step = (end - start) / (points - 1) as Real;
        let coordinates: Vec<Real> = (0..points).map(|i| start + step * i as Real).collect();
        let heights = interpolate_linear(&coordinates, start, end, start_height, end_height);
        Self::from_heights(coordinates, heights)
    }

    /// Resample the same route onto `points` uniform nodes.
    pub fn resampled(&self, points: usize) -> DomainResult<Self> {
        let mut resampled = Self::uniform(self.start(), self.end(), 0.0, 0.0, points)?;
        resampled.heights = resampled
            .coordinates
            .iter()
            .map(|&x| self.height_at(x))
            .collect();
        Ok(resampled)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let n = self.coordinates.len();
        if n < 2 {
            return Err(DomainError::SizeMismatch {
                what: "profile points",
                expected: 2,
                actual: n,
            });
        }
        for (what, len) in [
            ("profile heights", self.heights.len()),
            ("profile capacity", self.capacity.len()),
        ] {
            if len != n {
                return Err(DomainError::SizeMismatch {
                    what,
                    expected: n,
                    actual: len,
                });
            }
        }
        ensure_strictly_increasing(&self.coordinates, "profile coordinates")?;
        for &h in &self.heights {
            ensure_finite(h, "profile height")?;
        }
        for &c in &self.capacity {
            ensure_finite(c, "profile capacity")?;
        }
        Ok(())
    }

    pub fn point_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinates(&self) -> &[Real] {
        &self.coordinates
    }

    pub fn heights(&self) -> &[Real] {
        &self.heights
    }

    pub fn capacity(&self) -> &[Real] {
        &self.capacity
    }

    pub fn start(&self) -> Real {
        self.coordinates[0]
    }

    pub fn end(&self) -> Real {
        self.coordinates[self.coordinates.len() - 1]
    }

    pub fn length(&self) -> Real {
        self.end() - self.start()
    }

    /// Elevation slope dz/dx of the segment between nodes `segment` and `segment + 1`.
    pub fn height_derivative(&self, segment: usize) -> Real {
        let dz = self.heights[segment + 1] - self.heights[segment];
        let dx = self.coordinates[segment + 1] - self.coordinates[segment];
        dz / dx
    }

    /// Elevation at `x`, clamped to the end nodes.
    pub fn height_at(&self, x: Real) -> Real {
        if x <= self.start() {
            return self.heights[0];
        }
        if x >= self.end() {
            return self.heights[self.heights.len() - 1];
        }
        let i = self.coordinates.partition_point(|&c| c <= x) - 1;
        self.heights[i] + self.height_derivative(i) * (x - self.coordinates[i])
    }
}

fn interpolate_linear(xs: &[Real], x0: Real, x1: Real, y0: Real, y1: Real) -> Vec<Real> {
    let slope = (y1 - y0) / (x1 - x0);
    xs.iter().map(|&x| y0 + slope * (x - x0)).collect()
}
