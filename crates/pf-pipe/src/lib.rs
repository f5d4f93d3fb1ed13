//! pf-pipe: pipe segment description for steady hydraulics.
//!
//! Provides:
//! - `PipeWall`: geometry, elastic compliance and roughness
//! - `PipeProfile`: coordinates, elevations and capacity along the route
//! - `FrictionModel`: Darcy friction factor correlations (Isaev by default)
//! - `PipeProperties`: the aggregate handed to the solver, with calibration
//!   multipliers in `AdaptationParameters`
//!
//! # Example
//!
//! ```
//! use pf_core::m;
//! use pf_pipe::{PipeProfile, PipeProperties, PipeWall};
//!
//! let profile = PipeProfile::uniform(0.0, 12_000.0, 0.0, 0.0, 101).unwrap();
//! let wall = PipeWall::new(m(0.7), m(0.01), m(1e-4)).unwrap();
//! let pipe = PipeProperties::new(profile, wall).unwrap();
//! assert_eq!(pipe.profile.point_count(), 101);
//! ```

pub mod adaptation;
pub mod friction;
pub mod profile;
pub mod properties;
pub mod wall;

// Re-exports
pub use adaptation::AdaptationParameters;
pub use friction::{
    FlowRegime, FrictionModel, classify, hydraulic_resistance_altshul,
    hydraulic_resistance_isaev, hydraulic_resistance_shifrinson, on_regime_boundary,
};
pub use profile::PipeProfile;
pub use properties::PipeProperties;
pub use wall::PipeWall;
