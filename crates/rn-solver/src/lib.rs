//! Relief-line network solver.
//!
//! Chains single-segment solves along an ordered list of pipe segments. One
//! boundary condition anchors the chain: forward anchors the first inlet,
//! backward anchors the last outlet (e.g. a known destination pressure).
//! Results always read source → destination.

pub mod batch;
pub mod boundary;
pub mod error;
pub mod network;
pub mod traverse;

pub use batch::{NetworkCase, solve_networks_parallel};
pub use boundary::BoundaryCondition;
pub use error::{SolverError, SolverResult};
pub use network::{NetworkResult, NetworkWarning, PressureDropEstimate, SolverSettings};
pub use rn_components::FlowDirection;
pub use traverse::{estimate_network, linear_fallback, solve_network, try_solve_network};
