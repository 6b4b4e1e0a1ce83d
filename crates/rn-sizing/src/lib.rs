//! rn-sizing: API-520 relief orifice sizing and inlet compliance.
//!
//! Areas are computed with the US-customary API-520 Part I equations and
//! reported in mm². The selected orifice is the smallest API-526 letter
//! covering the required area.
//!
//! # Example
//!
//! ```
//! use rn_core::units::{cp, k, kgph, kpa};
//! use rn_fluids::Fluid;
//! use rn_sizing::{SizingInputs, SizingMethod, size_orifice};
//!
//! let air = Fluid::gas(28.96, 1.0, 1.4, cp(0.018));
//! let inputs = SizingInputs::new(kgph(5_000.0), kpa(1_000.0), kpa(101.325), k(320.0), air);
//! let out = size_orifice(&inputs, SizingMethod::Gas).unwrap();
//! assert!(out.is_critical_flow);
//! assert!(out.percent_used <= 100.0);
//! ```

pub mod compliance;
pub mod error;
pub mod gas;
pub mod inputs;
pub mod liquid;
pub mod orifice;
pub mod sizing;
pub mod steam;
pub mod two_phase;

pub use compliance::{
    BackpressureCheck, InletDropCheck, Severity, ValveType, validate_built_up_backpressure,
    validate_estimate, validate_inlet_drop, validate_psv,
};
pub use error::{SizingError, SizingResult};
pub use inputs::{
    AppliedCoefficients, Coefficients, SizingInputs, SizingMethod, SizingOutputs,
    ViscosityCorrection, relieving_pressure,
};
pub use orifice::{API_526_ORIFICES, OrificeSelection, StandardOrifice, select_orifice};
pub use sizing::size_orifice;
