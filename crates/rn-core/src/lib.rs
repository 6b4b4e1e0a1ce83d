//! rn-core: stable foundation for reliefnet.
//!
//! Contains:
//! - units (uom SI types + constructors, US-customary conversions for API-520)
//! - numeric (finite / positive guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RnError, RnResult};
pub use numeric::*;
pub use units::*;
