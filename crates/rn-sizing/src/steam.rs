//! Saturated steam sizing with the Napier equation.

use crate::error::SizingResult;
use crate::inputs::SizingInputs;
use crate::sizing::BranchArea;
use rn_core::units::to_kgph;
use rn_core::units::us::{kgph_to_lbph, pa_to_psi};

const NAPIER_CONSTANT: f64 = 51.5;
/// Superheat correction; saturated steam only.
const KSH_SATURATED: f64 = 1.0;
const NAPIER_LIMIT_PSIA: f64 = 1_500.0;
const NAPIER_CORRECTION_MAX_PSIA: f64 = 3_200.0;

/// Napier correction Kn for relieving pressure `p1` [psia].
pub fn napier_correction(p1_psia: f64) -> f64 {
    if p1_psia <= NAPIER_LIMIT_PSIA {
        1.0
    } else {
        (0.1906 * p1_psia - 1_000.0) / (0.2292 * p1_psia - 1_061.0)
    }
}

pub(crate) fn size_steam(inputs: &SizingInputs) -> SizingResult<BranchArea> {
    let coeffs = &inputs.coefficients;
    let kd = coeffs.kd_for(false);
    let w = kgph_to_lbph(to_kgph(inputs.mass_flow));
    let p1 = pa_to_psi(inputs.relieving_pressure.value);
    let kn = napier_correction(p1);

    let mut messages = Vec::new();
    if p1 > NAPIER_CORRECTION_MAX_PSIA {
        messages.push(format!(
            "Relieving pressure {p1:.0} psia is above the {NAPIER_CORRECTION_MAX_PSIA:.0} psia range of the Napier correction"
        ));
    }

    let area_in2 = w / (NAPIER_CONSTANT * p1 * kd * coeffs.kb * coeffs.kc * kn * KSH_SATURATED);
    Ok(BranchArea {
        area_in2,
        kd,
        kv: 1.0,
        kn,
        // Napier assumes critical flow.
        is_critical: true,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kn_is_one_up_to_1500_psia() {
        assert_eq!(napier_correction(1_500.0), 1.0);
        assert!(napier_correction(2_000.0) > 1.0);
    }
}
