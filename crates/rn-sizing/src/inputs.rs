//! Sizing inputs, outputs and correction coefficients.

use crate::error::{SizingError, SizingResult, require_positive};
use crate::orifice::StandardOrifice;
use rn_core::units::{Area, MassRate, Pressure, Temperature, pa};
use rn_fluids::{Fluid, Phase};
use std::fmt;

/// Which API-520 equation set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizingMethod {
    Gas,
    Liquid,
    Steam,
    TwoPhase,
}

impl From<Phase> for SizingMethod {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Gas => SizingMethod::Gas,
            Phase::Liquid => SizingMethod::Liquid,
            Phase::Steam => SizingMethod::Steam,
            Phase::TwoPhase => SizingMethod::TwoPhase,
        }
    }
}

impl fmt::Display for SizingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingMethod::Gas => write!(f, "gas"),
            SizingMethod::Liquid => write!(f, "liquid"),
            SizingMethod::Steam => write!(f, "steam"),
            SizingMethod::TwoPhase => write!(f, "two-phase"),
        }
    }
}

/// How the liquid viscosity correction Kv is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViscosityCorrection {
    /// Size with Kv = 1, correct once at the preliminary orifice.
    #[default]
    TwoPass,
    /// Repeat the correction until Kv changes by less than `tolerance`.
    Converged { tolerance: f64, max_passes: usize },
}

impl ViscosityCorrection {
    pub fn converged() -> Self {
        ViscosityCorrection::Converged {
            tolerance: 1e-4,
            max_passes: 20,
        }
    }
}

/// API-520 correction coefficients supplied by the user.
///
/// `kd = None` picks the method default (0.975 gas/steam, 0.65 liquid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub kd: Option<f64>,
    /// Backpressure correction (gas, steam)
    pub kb: f64,
    /// Combination correction for an upstream rupture disk
    pub kc: f64,
    /// Backpressure correction for balanced-bellows liquid service
    pub kw: f64,
}

impl Coefficients {
    pub const KD_GAS: f64 = 0.975;
    pub const KD_LIQUID: f64 = 0.65;
    pub const KC_RUPTURE_DISK: f64 = 0.9;

    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = Some(kd);
        self
    }

    pub fn with_kb(mut self, kb: f64) -> Self {
        self.kb = kb;
        self
    }

    pub fn with_kw(mut self, kw: f64) -> Self {
        self.kw = kw;
        self
    }

    /// Kc for a rupture disk installed upstream of the valve.
    pub fn with_rupture_disk(mut self) -> Self {
        self.kc = Self::KC_RUPTURE_DISK;
        self
    }

    pub(crate) fn kd_for(&self, liquid: bool) -> f64 {
        match (self.kd, liquid) {
            (Some(kd), _) => kd,
            (None, true) => Self::KD_LIQUID,
            (None, false) => Self::KD_GAS,
        }
    }

    fn validate(&self) -> SizingResult<()> {
        if let Some(kd) = self.kd {
            require_positive(kd, "Kd")?;
        }
        require_positive(self.kb, "Kb")?;
        require_positive(self.kc, "Kc")?;
        require_positive(self.kw, "Kw")?;
        Ok(())
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            kd: None,
            kb: 1.0,
            kc: 1.0,
            kw: 1.0,
        }
    }
}

/// Relief case handed to [`crate::size_orifice`].
#[derive(Debug, Clone, PartialEq)]
pub struct SizingInputs {
    pub mass_flow: MassRate,
    /// Absolute relieving pressure P1 (set + overpressure + atmosphere)
    pub relieving_pressure: Pressure,
    /// Absolute total back pressure P2
    pub back_pressure: Pressure,
    pub temperature: Temperature,
    pub fluid: Fluid,
    pub coefficients: Coefficients,
    pub viscosity_correction: ViscosityCorrection,
}

impl SizingInputs {
    pub fn new(
        mass_flow: MassRate,
        relieving_pressure: Pressure,
        back_pressure: Pressure,
        temperature: Temperature,
        fluid: Fluid,
    ) -> Self {
        Self {
            mass_flow,
            relieving_pressure,
            back_pressure,
            temperature,
            fluid,
            coefficients: Coefficients::default(),
            viscosity_correction: ViscosityCorrection::default(),
        }
    }

    pub fn with_coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_viscosity_correction(mut self, correction: ViscosityCorrection) -> Self {
        self.viscosity_correction = correction;
        self
    }

    /// Checks shared by every method; property checks are per method.
    pub(crate) fn validate(&self) -> SizingResult<()> {
        require_positive(self.mass_flow.value, "mass flow rate")?;
        require_positive(self.relieving_pressure.value, "relieving pressure")?;
        require_positive(self.temperature.value, "relieving temperature")?;
        let back = self.back_pressure.value;
        if !back.is_finite() || back < 0.0 {
            return Err(SizingError::InvalidInput {
                what: format!("back pressure must be finite and non-negative (got {back})"),
            });
        }
        self.coefficients.validate()
    }
}

/// Coefficients actually used for the governing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedCoefficients {
    pub kd: f64,
    pub kb: f64,
    pub kc: f64,
    pub kw: f64,
    /// Liquid viscosity correction; 1.0 for gas and steam
    pub kv: f64,
    /// Napier correction; 1.0 outside steam
    pub kn: f64,
}

/// Sizing result with the selected API-526 orifice.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingOutputs {
    pub method: SizingMethod,
    pub required_area: Area,
    pub selected: StandardOrifice,
    /// Required / selected area × 100
    pub percent_used: f64,
    /// Flow the selected orifice passes at the same conditions
    pub rated_capacity: MassRate,
    pub coefficients: AppliedCoefficients,
    pub is_critical_flow: bool,
    pub exceeds_largest_orifice: bool,
    pub messages: Vec<String>,
}

impl SizingOutputs {
    pub fn required_area_mm2(&self) -> f64 {
        rn_core::units::to_mm2(self.required_area)
    }

    pub fn selected_area_mm2(&self) -> f64 {
        self.selected.area_mm2()
    }
}

/// Absolute relieving pressure from a gauge set pressure.
///
/// `P1 = set × (1 + overpressure/100) + atmospheric`
pub fn relieving_pressure(
    set_pressure_gauge: Pressure,
    overpressure_pct: f64,
    atmospheric: Pressure,
) -> SizingResult<Pressure> {
    require_positive(set_pressure_gauge.value, "set pressure")?;
    require_positive(atmospheric.value, "atmospheric pressure")?;
    if !overpressure_pct.is_finite() || overpressure_pct < 0.0 {
        return Err(SizingError::InvalidInput {
            what: format!("overpressure must be a non-negative percentage (got {overpressure_pct})"),
        });
    }
    Ok(pa(
        set_pressure_gauge.value * (1.0 + overpressure_pct / 100.0) + atmospheric.value,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::units::{constants::atmosphere, cp, k, kg_m3, kgph, kpa};

    #[test]
    fn default_kd_depends_on_service() {
        let c = Coefficients::default();
        assert_eq!(c.kd_for(false), 0.975);
        assert_eq!(c.kd_for(true), 0.65);
        assert_eq!(c.with_kd(0.8).kd_for(true), 0.8);
    }

    #[test]
    fn rupture_disk_sets_kc() {
        assert_eq!(Coefficients::default().with_rupture_disk().kc, 0.9);
    }

    #[test]
    fn relieving_pressure_adds_overpressure_and_atmosphere() {
        let p1 = relieving_pressure(kpa(1_000.0), 10.0, atmosphere()).unwrap();
        assert!((p1.value - 1_201_325.0).abs() < 1e-6);
        assert!(relieving_pressure(kpa(0.0), 10.0, atmosphere()).is_err());
        assert!(relieving_pressure(kpa(500.0), -1.0, atmosphere()).is_err());
    }

    #[test]
    fn negative_back_pressure_rejected() {
        let inputs = SizingInputs::new(
            kgph(1_000.0),
            kpa(800.0),
            kpa(-1.0),
            k(300.0),
            Fluid::liquid(kg_m3(800.0), cp(1.0)),
        );
        assert!(matches!(
            inputs.validate(),
            Err(SizingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn method_follows_phase() {
        assert_eq!(SizingMethod::from(Phase::Steam), SizingMethod::Steam);
        assert_eq!(SizingMethod::TwoPhase.to_string(), "two-phase");
    }
}
