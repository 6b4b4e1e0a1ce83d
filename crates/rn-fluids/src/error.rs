//! Fluid property errors.

use crate::fluid::Phase;
use rn_core::RnError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised while validating a fluid or a flow state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// A property required by the declared phase was not supplied.
    #[error("{phase} fluid requires {property}")]
    MissingProperty {
        phase: Phase,
        property: &'static str,
    },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<FluidError> for RnError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::MissingProperty { .. } | FluidError::InvalidArg { .. } => {
                RnError::InvalidArg {
                    what: format!("fluid: {err}"),
                }
            }
            FluidError::NonPhysical { .. } => RnError::Domain {
                what: format!("fluid: {err}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::MissingProperty {
            phase: Phase::Liquid,
            property: "density",
        };
        assert_eq!(err.to_string(), "liquid fluid requires density");

        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn error_to_rn_error() {
        let fluid_err = FluidError::NonPhysical { what: "viscosity" };
        let rn_err: RnError = fluid_err.into();
        assert!(matches!(rn_err, RnError::Domain { .. }));
    }
}
