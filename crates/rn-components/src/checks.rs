//! Non-fatal flow checks: erosional velocity and choking.

/// Default API RP-14E constant for continuous service.
pub const EROSIONAL_C_CONTINUOUS: f64 = 100.0;

/// API RP-14E constant for intermittent service.
pub const EROSIONAL_C_INTERMITTENT: f64 = 125.0;

/// Conversion from the US-customary form `V[ft/s] = C/√ρ[lb/ft³]` to SI.
const EROSIONAL_SI_FACTOR: f64 = 1.22;

/// Erosional velocity limit [m/s] for density ρ [kg/m³].
pub fn erosional_velocity(c: f64, rho: f64) -> f64 {
    EROSIONAL_SI_FACTOR * c / rho.sqrt()
}

/// True when `p_down/p_up` has reached the critical ratio.
pub fn is_choked(p_up: f64, p_down: f64, critical_ratio: f64) -> bool {
    p_down <= 0.0 || p_down / p_up <= critical_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_fluids::critical_pressure_ratio;

    #[test]
    fn erosional_limit_for_water() {
        // C = 100, ρ = 1000 kg/m³ → ≈ 3.86 m/s
        let ve = erosional_velocity(EROSIONAL_C_CONTINUOUS, 1000.0);
        assert!((ve - 3.858).abs() < 0.01);
    }

    #[test]
    fn lighter_fluid_tolerates_higher_velocity() {
        assert!(erosional_velocity(100.0, 5.0) > erosional_velocity(100.0, 500.0));
    }

    #[test]
    fn choke_at_point_four_for_k_one_point_four() {
        let rc = critical_pressure_ratio(1.4);
        assert!((rc - 0.528).abs() < 1e-3);
        assert!(is_choked(1.0e6, 0.4e6, rc));
        assert!(!is_choked(1.0e6, 0.6e6, rc));
    }
}
