//! Common utilities for segment calculations.

use crate::error::{ComponentError, ComponentResult};
use rn_core::numeric::ensure_finite;

/// Reynolds number at or below which flow is laminar.
pub const LAMINAR_RE_LIMIT: f64 = 2300.0;

/// Reynolds number at or above which flow is fully turbulent.
pub const TURBULENT_RE_LIMIT: f64 = 4000.0;

/// Ensure a computed value is finite, reporting a numeric domain error if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|e| ComponentError::NumericDomain {
        what: e.to_string(),
    })
}

/// Circular flow area [m²] for an inner diameter [m].
pub fn circular_area(diameter_m: f64) -> f64 {
    std::f64::consts::PI * diameter_m.powi(2) / 4.0
}

/// Velocity head ρv²/2 expressed through the mass flux G = ρv.
pub fn velocity_head(mass_flux: f64, rho: f64) -> f64 {
    mass_flux * mass_flux / (2.0 * rho)
}
