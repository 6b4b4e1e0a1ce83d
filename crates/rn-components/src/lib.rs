//! rn-components: single pipe segment hydraulics.
//!
//! Provides the pressure-drop model for one segment of a relief line:
//! - Darcy-Weisbach friction (laminar 64/Re, Haaland above Re = 2300)
//! - Fitting K-factor catalogue with a user safety factor
//! - Hydrostatic elevation term
//! - Control valve (Cv) and orifice plate (β-ratio) restrictions
//! - Choked-flow capping for gases and API RP-14E erosional checks
//!
//! Segments are deterministic functions of their inputs and can be solved
//! from either end, which is what the network traversal builds on.
//!
//! # Example
//!
//! ```
//! use rn_components::{FittingType, FlowDirection, PipeSegment, SegmentSettings, solve_segment};
//! use rn_core::units::{cp, k, kg_m3, kgph, m, mm, pa};
//! use rn_fluids::Fluid;
//!
//! let water = Fluid::liquid(kg_m3(998.0), cp(1.0));
//! let seg = PipeSegment::new("L1", "PSV inlet", 1, mm(102.3), m(12.0))
//!     .with_fitting(FittingType::Elbow90LongRadius, 2);
//!
//! let result = solve_segment(
//!     &seg,
//!     &water,
//!     kgph(40_000.0),
//!     pa(1_100_000.0),
//!     k(303.15),
//!     FlowDirection::Forward,
//!     &SegmentSettings::default(),
//! )
//! .unwrap();
//! assert!(result.outlet.pressure < result.inlet.pressure);
//! ```

pub mod checks;
pub mod common;
pub mod error;
pub mod fittings;
pub mod friction;
pub mod restriction;
pub mod segment;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use fittings::{Fitting, FittingType};
pub use friction::FlowRegime;
pub use restriction::{ControlValve, OrificePlate};
pub use segment::{
    FlowDirection, GasFlowModel, PipeSegment, PressureDropBreakdown, SegmentEnd, SegmentResult,
    SegmentSettings, solve_segment,
};
