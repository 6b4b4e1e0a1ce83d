//! Fitting loss coefficient catalogue.

use crate::error::{ComponentError, ComponentResult};
use std::fmt;
use std::str::FromStr;

/// Fitting types with catalogue resistance coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FittingType {
    Elbow90Standard,
    Elbow90LongRadius,
    Elbow45,
    TeeThrough,
    TeeBranch,
    GateValve,
    GlobeValve,
    BallValve,
    ButterflyValve,
    SwingCheckValve,
    PipeEntrance,
    PipeExit,
    /// User-specified K value.
    Custom { k: f64 },
}

impl FittingType {
    /// Loss coefficient K (dimensionless, multiplies ρv²/2).
    pub fn k(&self) -> f64 {
        match self {
            FittingType::Elbow90Standard => 0.75,
            FittingType::Elbow90LongRadius => 0.45,
            FittingType::Elbow45 => 0.35,
            FittingType::TeeThrough => 0.40,
            FittingType::TeeBranch => 1.00,
            FittingType::GateValve => 0.17,
            FittingType::GlobeValve => 6.00,
            FittingType::BallValve => 0.05,
            FittingType::ButterflyValve => 0.80,
            FittingType::SwingCheckValve => 2.00,
            FittingType::PipeEntrance => 0.50,
            FittingType::PipeExit => 1.00,
            FittingType::Custom { k } => *k,
        }
    }
}

impl fmt::Display for FittingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FittingType::Elbow90Standard => "elbow_90",
            FittingType::Elbow90LongRadius => "elbow_90_lr",
            FittingType::Elbow45 => "elbow_45",
            FittingType::TeeThrough => "tee_through",
            FittingType::TeeBranch => "tee_branch",
            FittingType::GateValve => "gate_valve",
            FittingType::GlobeValve => "globe_valve",
            FittingType::BallValve => "ball_valve",
            FittingType::ButterflyValve => "butterfly_valve",
            FittingType::SwingCheckValve => "check_valve",
            FittingType::PipeEntrance => "entrance",
            FittingType::PipeExit => "exit",
            FittingType::Custom { k } => return write!(f, "custom(K={k})"),
        };
        write!(f, "{name}")
    }
}

impl FromStr for FittingType {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "elbow_90" | "elbow90" => FittingType::Elbow90Standard,
            "elbow_90_lr" | "elbow90lr" => FittingType::Elbow90LongRadius,
            "elbow_45" | "elbow45" => FittingType::Elbow45,
            "tee_through" | "tee_run" => FittingType::TeeThrough,
            "tee_branch" => FittingType::TeeBranch,
            "gate_valve" => FittingType::GateValve,
            "globe_valve" => FittingType::GlobeValve,
            "ball_valve" => FittingType::BallValve,
            "butterfly_valve" => FittingType::ButterflyValve,
            "check_valve" | "swing_check_valve" => FittingType::SwingCheckValve,
            "entrance" | "pipe_entrance" => FittingType::PipeEntrance,
            "exit" | "pipe_exit" => FittingType::PipeExit,
            other => {
                return Err(ComponentError::InvalidGeometry {
                    what: format!("unknown fitting type '{other}'"),
                });
            }
        };
        Ok(kind)
    }
}

/// A fitting type and how many of it sit in the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitting {
    pub kind: FittingType,
    pub count: u32,
}

impl Fitting {
    pub fn new(kind: FittingType, count: u32) -> Self {
        Self { kind, count }
    }
}

/// Sum of K·count over all fittings, scaled by `1 + safety_factor_pct/100`.
pub fn total_k(fittings: &[Fitting], safety_factor_pct: f64) -> ComponentResult<f64> {
    if !safety_factor_pct.is_finite() || safety_factor_pct < 0.0 {
        return Err(ComponentError::InvalidGeometry {
            what: format!("fitting safety factor must be non-negative (got {safety_factor_pct}%)"),
        });
    }

    let mut sum = 0.0;
    for fitting in fittings {
        let k = fitting.kind.k();
        if !k.is_finite() || k < 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: format!("fitting K must be non-negative (got {k})"),
            });
        }
        sum += k * f64::from(fitting.count);
    }

    Ok(sum * (1.0 + safety_factor_pct / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_k_sums_counts() {
        let fittings = [
            Fitting::new(FittingType::Elbow90Standard, 2),
            Fitting::new(FittingType::GateValve, 1),
        ];
        let k = total_k(&fittings, 0.0).unwrap();
        assert!((k - (2.0 * 0.75 + 0.17)).abs() < 1e-12);
    }

    #[test]
    fn safety_factor_scales_total() {
        let fittings = [Fitting::new(FittingType::Custom { k: 2.0 }, 1)];
        let k = total_k(&fittings, 25.0).unwrap();
        assert!((k - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_fitting_list_has_zero_k() {
        assert_eq!(total_k(&[], 10.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_negative_inputs() {
        assert!(total_k(&[], -1.0).is_err());
        let bad = [Fitting::new(FittingType::Custom { k: -0.5 }, 1)];
        assert!(total_k(&bad, 0.0).is_err());
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            "elbow_90".parse::<FittingType>().unwrap(),
            FittingType::Elbow90Standard
        );
        assert_eq!(
            " Globe_Valve ".parse::<FittingType>().unwrap(),
            FittingType::GlobeValve
        );
        assert!("weld_neck".parse::<FittingType>().is_err());
    }
}
