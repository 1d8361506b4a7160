//! ps-core: shared foundation for plantsim.
//!
//! Contains:
//! - numeric (Real + tolerances + parameter guards)
//! - units (uom SI types + constructors)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
