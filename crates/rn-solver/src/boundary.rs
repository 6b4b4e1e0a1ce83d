//! The single boundary condition anchoring a chain.

use crate::error::{SolverError, SolverResult};
use rn_components::FlowDirection;
use rn_core::units::{MassRate, Pressure, Temperature};

/// Known state at one end of the chain plus the relieving mass flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCondition {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub mass_flow_rate: MassRate,
    /// Forward: `pressure`/`temperature` are the first segment's inlet.
    /// Backward: they are the last segment's outlet.
    pub direction: FlowDirection,
}

impl BoundaryCondition {
    pub fn forward(pressure: Pressure, temperature: Temperature, mass_flow_rate: MassRate) -> Self {
        Self {
            pressure,
            temperature,
            mass_flow_rate,
            direction: FlowDirection::Forward,
        }
    }

    pub fn backward(pressure: Pressure, temperature: Temperature, mass_flow_rate: MassRate) -> Self {
        Self {
            pressure,
            temperature,
            mass_flow_rate,
            direction: FlowDirection::Backward,
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.pressure.value) {
            return Err(SolverError::InsufficientBoundaryData {
                what: "boundary pressure must be positive",
            });
        }
        if !positive(self.temperature.value) {
            return Err(SolverError::InsufficientBoundaryData {
                what: "boundary temperature must be positive",
            });
        }
        if !positive(self.mass_flow_rate.value) {
            return Err(SolverError::InsufficientBoundaryData {
                what: "mass flow rate must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::units::{k, kgph, pa};

    #[test]
    fn accepts_positive_values() {
        let bc = BoundaryCondition::forward(pa(500_000.0), k(300.0), kgph(1_000.0));
        assert!(bc.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_values() {
        let bc = BoundaryCondition::backward(pa(0.0), k(300.0), kgph(1_000.0));
        assert!(matches!(
            bc.validate(),
            Err(SolverError::InsufficientBoundaryData { .. })
        ));
        let bc = BoundaryCondition::forward(pa(1e5), k(-1.0), kgph(1_000.0));
        assert!(bc.validate().is_err());
        let bc = BoundaryCondition::forward(pa(1e5), k(300.0), kgph(0.0));
        assert!(bc.validate().is_err());
    }
}
