//! rn-fluids: phase-aware fluid description for relief network calculations.
//!
//! Provides:
//! - `Phase` and the user-supplied `Fluid` property container
//! - Validation of a `Fluid` into solver-ready `FluidProps`
//! - Ideal-gas helpers (density, speed of sound, critical pressure ratio)
//! - `FlowState` (pressure + temperature) with physical validation
//!
//! Property values are supplied by the caller; no equation-of-state backend
//! is consulted. A fluid missing a property its phase requires is rejected
//! instead of being filled with defaults.
//!
//! # Example
//!
//! ```
//! use rn_fluids::{Fluid, FluidProps};
//! use rn_core::units::{cp, k, pa};
//!
//! let air = Fluid::gas(28.96, 1.0, 1.4, cp(0.018));
//! let props = air.validate().unwrap();
//! let rho = props.density(pa(500_000.0), k(300.0));
//! assert!(rho.value > 5.0);
//! assert!(matches!(props, FluidProps::Compressible(_)));
//! ```

pub mod error;
pub mod fluid;
pub mod gas;
pub mod state;

// Re-exports for ergonomics
pub use error::{FluidError, FluidResult};
pub use fluid::{Fluid, FluidProps, Phase};
pub use gas::{GasProps, critical_pressure_ratio};
pub use state::FlowState;
