//! API-520 Part I liquid sizing with the viscosity correction Kv.

use crate::error::{SizingError, SizingResult, require_positive};
use crate::inputs::{SizingInputs, SizingMethod, ViscosityCorrection};
use crate::orifice::select_orifice;
use crate::sizing::BranchArea;
use rn_core::units::constants::WATER_DENSITY_KG_M3;
use rn_core::units::us::{m3h_to_gpm, pa_to_psi};
use rn_core::units::{to_cp, to_kgph};
use tracing::{debug, warn};

const LIQUID_CONSTANT: f64 = 38.0;

/// Lowest valve Reynolds number the Kv correlation is evaluated at.
///
/// Below Re ≈ 26 the `342.75/Re^1.5` term makes `Q/Kv` fall as `Q` rises, so
/// the required area would shrink with more flow. Kv is held at its value
/// here instead.
pub const MIN_VALVE_REYNOLDS: f64 = 30.0;

/// `Kv = (0.9935 + 2.878/Re^0.5 + 342.75/Re^1.5)^−1`, capped at 1 and held
/// constant below [`MIN_VALVE_REYNOLDS`].
pub fn viscosity_correction(reynolds: f64) -> SizingResult<f64> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(SizingError::NumericDomain {
            what: format!("liquid Reynolds number must be positive (got {reynolds})"),
        });
    }
    let re = reynolds.max(MIN_VALVE_REYNOLDS);
    let kv = 1.0 / (0.9935 + 2.878 / re.sqrt() + 342.75 / re.powf(1.5));
    Ok(kv.min(1.0))
}

/// Valve Reynolds number `Re = Q·2800·G/(μ·√A)`, Q in gpm, μ in cP, A in in².
pub fn valve_reynolds(q_gpm: f64, specific_gravity: f64, viscosity_cp: f64, area_in2: f64) -> f64 {
    q_gpm * 2800.0 * specific_gravity / (viscosity_cp * area_in2.sqrt())
}

pub(crate) fn size_liquid(inputs: &SizingInputs, method: SizingMethod) -> SizingResult<BranchArea> {
    let fluid = &inputs.fluid;
    let density = fluid
        .density
        .ok_or(SizingError::MissingProperty {
            method,
            property: "density",
        })?
        .value;
    let viscosity = fluid.viscosity.ok_or(SizingError::MissingProperty {
        method,
        property: "viscosity",
    })?;
    require_positive(density, "liquid density")?;
    let mu_cp = require_positive(to_cp(viscosity), "liquid viscosity")?;

    let dp_pa = inputs.relieving_pressure.value - inputs.back_pressure.value;
    if dp_pa <= 0.0 {
        return Err(SizingError::NonPositiveDifferential {
            relieving_pa: inputs.relieving_pressure.value,
            back_pa: inputs.back_pressure.value,
        });
    }

    let coeffs = &inputs.coefficients;
    let kd = coeffs.kd_for(true);
    let g = density / WATER_DENSITY_KG_M3;
    let q_gpm = m3h_to_gpm(to_kgph(inputs.mass_flow) / density);
    let dp_psi = pa_to_psi(dp_pa);

    // Area at Kv = 1; every later pass divides this by Kv.
    let base_area = q_gpm / (LIQUID_CONSTANT * kd * coeffs.kw * coeffs.kc) * (g / dp_psi).sqrt();
    let correct = |area: f64| -> SizingResult<(char, f64, f64)> {
        let preliminary = select_orifice(area).orifice;
        let re = valve_reynolds(q_gpm, g, mu_cp, preliminary.area_in2);
        Ok((preliminary.letter, re, viscosity_correction(re)?))
    };

    let mut messages = Vec::new();
    let mut last_re = f64::INFINITY;
    let kv = match inputs.viscosity_correction {
        ViscosityCorrection::TwoPass => {
            let (letter, re, kv) = correct(base_area)?;
            debug!(preliminary = %letter, reynolds = re, kv, "liquid viscosity correction");
            last_re = re;
            kv
        }
        ViscosityCorrection::Converged {
            tolerance,
            max_passes,
        } => {
            require_positive(tolerance, "viscosity correction tolerance")?;
            if max_passes == 0 {
                return Err(SizingError::InvalidInput {
                    what: "viscosity correction needs at least one pass".into(),
                });
            }
            let mut kv = 1.0;
            let mut converged = false;
            for pass in 1..=max_passes {
                let (letter, re, next) = correct(base_area / kv)?;
                debug!(
                    pass,
                    preliminary = %letter,
                    reynolds = re,
                    kv = next,
                    "liquid viscosity correction"
                );
                let change = (next - kv).abs();
                kv = next;
                last_re = re;
                if change < tolerance {
                    converged = true;
                    break;
                }
            }
            if !converged {
                messages.push(format!(
                    "Viscosity correction did not converge within {max_passes} passes; last Kv = {kv:.4}"
                ));
            }
            kv
        }
    };

    if last_re < MIN_VALVE_REYNOLDS {
        warn!(reynolds = last_re, kv, "valve Reynolds number below Kv correlation range");
        messages.push(format!(
            "Valve Reynolds number {last_re:.1} is below {MIN_VALVE_REYNOLDS}; \
             Kv held at {kv:.4}, its value at Re = {MIN_VALVE_REYNOLDS}"
        ));
    }

    Ok(BranchArea {
        area_in2: base_area / kv,
        kd,
        kv,
        kn: 1.0,
        is_critical: false,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_tends_to_one_at_high_reynolds() {
        assert_eq!(viscosity_correction(1e9).unwrap(), 1.0);
        let kv = viscosity_correction(100_000.0).unwrap();
        assert!(kv > 0.98 && kv <= 1.0);
    }

    #[test]
    fn kv_drops_for_viscous_flow() {
        let kv = viscosity_correction(100.0).unwrap();
        assert!((kv - 1.0 / (0.9935 + 0.2878 + 0.34275)).abs() < 1e-12);
    }

    #[test]
    fn kv_is_held_below_the_reynolds_floor() {
        let floor = viscosity_correction(MIN_VALVE_REYNOLDS).unwrap();
        assert_eq!(viscosity_correction(5.0).unwrap(), floor);
        assert_eq!(viscosity_correction(0.01).unwrap(), floor);
        assert!(viscosity_correction(MIN_VALVE_REYNOLDS + 1.0).unwrap() > floor);
    }

    #[test]
    fn kv_rejects_non_positive_reynolds() {
        assert!(matches!(
            viscosity_correction(0.0),
            Err(SizingError::NumericDomain { .. })
        ));
    }
}
