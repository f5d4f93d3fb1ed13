//! pf-core: shared foundation for pipeflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (domain errors shared by the property and pipe models)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{DomainError, DomainResult};
pub use numeric::*;
pub use units::*;
