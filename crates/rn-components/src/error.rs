//! Error types for segment calculations.

use rn_core::error::RnError;
use rn_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while solving a single pipe segment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Invalid fluid: {0}")]
    InvalidFluid(#[from] FluidError),

    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: String },

    #[error("Insufficient boundary data: {what}")]
    InsufficientBoundaryData { what: &'static str },

    #[error("Numeric domain error: {what}")]
    NumericDomain { what: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for RnError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidFluid(fluid) => fluid.into(),
            ComponentError::InvalidGeometry { what } => RnError::InvalidArg { what },
            ComponentError::InsufficientBoundaryData { what } => RnError::InvalidArg {
                what: what.to_string(),
            },
            ComponentError::NumericDomain { what } => RnError::Domain { what },
        }
    }
}
