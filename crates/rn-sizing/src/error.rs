//! Error types for relief valve sizing.

use crate::inputs::SizingMethod;
use rn_core::error::RnError;
use rn_core::numeric::ensure_positive;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Invalid sizing input: {what}")]
    InvalidInput { what: String },

    #[error("{method} sizing requires {property}")]
    MissingProperty {
        method: SizingMethod,
        property: &'static str,
    },

    #[error(
        "Relieving pressure ({relieving_pa:.0} Pa) must exceed back pressure ({back_pa:.0} Pa)"
    )]
    NonPositiveDifferential { relieving_pa: f64, back_pa: f64 },

    #[error("Numeric domain error: {what}")]
    NumericDomain { what: String },
}

pub type SizingResult<T> = Result<T, SizingError>;

impl From<SizingError> for RnError {
    fn from(e: SizingError) -> Self {
        match e {
            SizingError::InvalidInput { what } => RnError::InvalidArg { what },
            SizingError::MissingProperty { .. } => RnError::InvalidArg {
                what: e.to_string(),
            },
            SizingError::NonPositiveDifferential { .. } => RnError::Domain {
                what: e.to_string(),
            },
            SizingError::NumericDomain { what } => RnError::Domain { what },
        }
    }
}

/// Finite and strictly positive, or an `InvalidInput` naming the value.
pub(crate) fn require_positive(value: f64, what: &'static str) -> SizingResult<f64> {
    ensure_positive(value, what).map_err(|e| SizingError::InvalidInput {
        what: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differential_message_names_both_pressures() {
        let err = SizingError::NonPositiveDifferential {
            relieving_pa: 500_000.0,
            back_pa: 600_000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("500000") && msg.contains("600000"));
        assert!(matches!(RnError::from(err), RnError::Domain { .. }));
    }

    #[test]
    fn require_positive_rejects_nan_and_zero() {
        assert!(matches!(
            require_positive(f64::NAN, "flow"),
            Err(SizingError::InvalidInput { what }) if what.contains("flow")
        ));
        assert!(require_positive(0.0, "flow").is_err());
        assert_eq!(require_positive(2.0, "flow").unwrap(), 2.0);
    }
}
