//! pf-fluids: liquid property models for pipeline hydraulics.
//!
//! Provides:
//! - Compressible-liquid density and exponential viscosity laws for oil
//! - Three-point viscosity regime reconstruction (constant / exponential / general)
//! - The `FluidModel` trait consumed by the pipe right-hand side, with a
//!   uniform `OilModel` and a per-node `FluidPropertiesProfile`
//!
//! # Example
//!
//! ```
//! use pf_fluids::{ViscosityGrid, reconstruct};
//!
//! let grid = ViscosityGrid::default();
//! let model = reconstruct(&grid, [60e-6, 25e-6, 11e-6]).unwrap();
//! let nu = model.evaluate(grid.temperatures[1]);
//! assert!((nu - 25e-6).abs() < 1e-12);
//! ```

pub mod model;
pub mod oil;
pub mod profile;
pub mod viscosity;

// Re-exports
pub use model::FluidModel;
pub use oil::{
    OilDensityParameters, OilHeatParameters, OilModel, OilViscosityParameters, pressure_area,
    speed_of_sound,
};
pub use profile::FluidPropertiesProfile;
pub use viscosity::{
    REGIME_EPS, ViscosityDataPoint, ViscosityGrid, ViscosityModel, adapt, reconstruct,
};
