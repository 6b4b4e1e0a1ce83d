//! Pressure/temperature state carried along a pipe chain.

use crate::error::{FluidError, FluidResult};
use rn_core::units::{Pressure, Temperature};

/// Thermodynamic state at one end of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    p: Pressure,
    t: Temperature,
}

impl FlowState {
    /// Create a state from pressure and temperature.
    ///
    /// Validates that pressure and temperature are positive and finite.
    pub fn from_pt(p: Pressure, t: Temperature) -> FluidResult<Self> {
        let p_val = p.value;
        if !p_val.is_finite() || p_val <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }

        let t_val = t.value;
        if !t_val.is_finite() || t_val <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }

        Ok(Self { p, t })
    }

    /// Get pressure.
    pub fn pressure(&self) -> Pressure {
        self.p
    }

    /// Get temperature.
    pub fn temperature(&self) -> Temperature {
        self.t
    }
}
