//! Darcy friction factor correlations.

use crate::common::{LAMINAR_RE_LIMIT, TURBULENT_RE_LIMIT, check_finite};
use crate::error::{ComponentError, ComponentResult};
use std::fmt;

/// Flow regime label derived from the Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Transition,
    Turbulent,
}

impl FlowRegime {
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds <= LAMINAR_RE_LIMIT {
            FlowRegime::Laminar
        } else if reynolds < TURBULENT_RE_LIMIT {
            FlowRegime::Transition
        } else {
            FlowRegime::Turbulent
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowRegime::Laminar => write!(f, "laminar"),
            FlowRegime::Transition => write!(f, "transition"),
            FlowRegime::Turbulent => write!(f, "turbulent"),
        }
    }
}

/// Darcy friction factor.
///
/// `f = 64/Re` up to and including Re = 2300, the Haaland approximation of
/// Colebrook-White above it. The transition band uses Haaland as well.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> ComponentResult<f64> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(ComponentError::NumericDomain {
            what: format!("Reynolds number must be positive (got {reynolds})"),
        });
    }

    if reynolds <= LAMINAR_RE_LIMIT {
        return Ok(64.0 / reynolds);
    }

    haaland(reynolds, relative_roughness)
}

/// Haaland: `f = (−1.8·log10((ε/D/3.7)^1.11 + 6.9/Re))^−2`
pub fn haaland(reynolds: f64, relative_roughness: f64) -> ComponentResult<f64> {
    if relative_roughness < 0.0 {
        return Err(ComponentError::NumericDomain {
            what: format!("relative roughness must be non-negative (got {relative_roughness})"),
        });
    }

    let arg = (relative_roughness / 3.7).powf(1.11) + 6.9 / reynolds;
    if arg <= 0.0 || !arg.is_finite() {
        return Err(ComponentError::NumericDomain {
            what: format!("Haaland logarithm argument must be positive (got {arg})"),
        });
    }

    let inv_sqrt_f = -1.8 * arg.log10();
    if inv_sqrt_f <= 0.0 {
        return Err(ComponentError::NumericDomain {
            what: format!("Haaland correlation out of range (Re={reynolds}, ε/D={relative_roughness})"),
        });
    }

    check_finite(inv_sqrt_f.powi(-2), "friction factor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn laminar_at_boundary() {
        let f = friction_factor(2300.0, 0.0).unwrap();
        assert_relative_eq!(f, 64.0 / 2300.0);
        assert_eq!(FlowRegime::from_reynolds(2300.0), FlowRegime::Laminar);
    }

    #[test]
    fn haaland_just_above_boundary() {
        let f = friction_factor(2301.0, 0.0).unwrap();
        assert_relative_eq!(f, haaland(2301.0, 0.0).unwrap());
        assert_ne!(f, 64.0 / 2301.0);
        assert_eq!(FlowRegime::from_reynolds(2301.0), FlowRegime::Transition);
    }

    #[test]
    fn boundary_jump_is_bounded_by_the_correlations() {
        let laminar = friction_factor(2300.0, 0.0).unwrap();
        let turbulent = friction_factor(2301.0, 0.0).unwrap();
        // Smooth-pipe Haaland sits above 64/Re at the switch, by less than a factor of two.
        assert!(turbulent > laminar);
        assert!(turbulent / laminar < 2.0);
    }

    #[test]
    fn haaland_matches_moody_chart() {
        // Commercial steel, Re = 1e5, ε/D = 0.0009 → f ≈ 0.0216 (Colebrook 0.0217)
        let f = friction_factor(1.0e5, 0.0009).unwrap();
        assert_relative_eq!(f, 0.0216, epsilon = 5e-4);
        assert_eq!(FlowRegime::from_reynolds(1.0e5), FlowRegime::Turbulent);
    }

    #[test]
    fn rejects_non_positive_reynolds() {
        assert!(matches!(
            friction_factor(0.0, 0.001),
            Err(ComponentError::NumericDomain { .. })
        ));
        assert!(friction_factor(-5.0, 0.001).is_err());
        assert!(friction_factor(f64::NAN, 0.001).is_err());
    }

    #[test]
    fn rougher_pipe_has_higher_friction() {
        let smooth = friction_factor(5.0e5, 1e-5).unwrap();
        let rough = friction_factor(5.0e5, 1e-2).unwrap();
        assert!(rough > smooth);
    }
}
