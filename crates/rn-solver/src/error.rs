//! Error types for network solving.

use rn_components::ComponentError;
use rn_core::error::RnError;
use rn_fluids::FluidError;
use thiserror::Error;

/// Errors that prevent a full physics solve of a chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Insufficient boundary data: {what}")]
    InsufficientBoundaryData { what: &'static str },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Segment '{segment}' failed: {source}")]
    Segment {
        segment: String,
        #[source]
        source: ComponentError,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for RnError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InsufficientBoundaryData { what } => RnError::InvalidArg {
                what: what.to_string(),
            },
            SolverError::Fluid(fluid) => fluid.into(),
            SolverError::Segment { source, .. } => source.into(),
        }
    }
}
