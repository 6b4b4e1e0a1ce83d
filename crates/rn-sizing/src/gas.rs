//! API-520 Part I gas and vapour sizing (US customary units).

use crate::error::{SizingError, SizingResult};
use crate::inputs::{SizingInputs, SizingMethod};
use crate::sizing::BranchArea;
use rn_core::units::to_kgph;
use rn_core::units::us::{kelvin_to_rankine, kgph_to_lbph, pa_to_psi};
use rn_fluids::critical_pressure_ratio;

/// Subcritical equation constant.
const SUBCRITICAL_CONSTANT: f64 = 735.0;

/// Gas coefficient `C = 520·√(k·(2/(k+1))^((k+1)/(k−1)))`.
pub fn coefficient_c(k: f64) -> f64 {
    520.0 * (k * (2.0 / (k + 1.0)).powf((k + 1.0) / (k - 1.0))).sqrt()
}

/// Subcritical flow coefficient F2 at pressure ratio `r = P2/P1`.
pub fn coefficient_f2(k: f64, r: f64) -> f64 {
    let exp = (k - 1.0) / k;
    ((k / (k - 1.0)) * r.powf(2.0 / k) * (1.0 - r.powf(exp)) / (1.0 - r)).sqrt()
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GasProperties {
    pub molecular_weight: f64,
    pub z: f64,
    pub k: f64,
}

pub(crate) fn gas_properties(
    inputs: &SizingInputs,
    method: SizingMethod,
) -> SizingResult<GasProperties> {
    let fluid = &inputs.fluid;
    let molecular_weight = fluid
        .molecular_weight
        .ok_or(SizingError::MissingProperty {
            method,
            property: "molecular weight",
        })?;
    let z = fluid.compressibility.ok_or(SizingError::MissingProperty {
        method,
        property: "compressibility factor",
    })?;
    let k = fluid
        .specific_heat_ratio
        .ok_or(SizingError::MissingProperty {
            method,
            property: "specific heat ratio",
        })?;

    crate::error::require_positive(molecular_weight, "molecular weight")?;
    crate::error::require_positive(z, "compressibility factor")?;
    if !k.is_finite() || k <= 1.0 {
        return Err(SizingError::InvalidInput {
            what: format!("specific heat ratio must exceed 1 (got {k})"),
        });
    }
    Ok(GasProperties {
        molecular_weight,
        z,
        k,
    })
}

pub(crate) fn size_gas(inputs: &SizingInputs, method: SizingMethod) -> SizingResult<BranchArea> {
    let props = gas_properties(inputs, method)?;
    let coeffs = &inputs.coefficients;
    let kd = coeffs.kd_for(false);

    let w = kgph_to_lbph(to_kgph(inputs.mass_flow));
    let p1 = pa_to_psi(inputs.relieving_pressure.value);
    let p2 = pa_to_psi(inputs.back_pressure.value);
    let t = kelvin_to_rankine(inputs.temperature.value);
    let p_cf = p1 * critical_pressure_ratio(props.k);

    let (area_in2, critical) = if p2 <= p_cf {
        let c = coefficient_c(props.k);
        let area = w / (c * kd * p1 * coeffs.kb * coeffs.kc)
            * (t * props.z / props.molecular_weight).sqrt();
        (area, true)
    } else {
        if p1 - p2 <= 0.0 {
            return Err(SizingError::NonPositiveDifferential {
                relieving_pa: inputs.relieving_pressure.value,
                back_pa: inputs.back_pressure.value,
            });
        }
        let f2 = coefficient_f2(props.k, p2 / p1);
        let area = w / (SUBCRITICAL_CONSTANT * f2 * kd * coeffs.kb * coeffs.kc)
            * (t * props.z / (props.molecular_weight * p1 * (p1 - p2))).sqrt();
        (area, false)
    };

    if !area_in2.is_finite() || area_in2 <= 0.0 {
        return Err(SizingError::NumericDomain {
            what: format!("gas area evaluated to {area_in2}"),
        });
    }

    Ok(BranchArea {
        area_in2,
        kd,
        kv: 1.0,
        kn: 1.0,
        is_critical: critical,
        messages: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_for_air() {
        // API-520 table value for k = 1.40 is 356.
        assert!((coefficient_c(1.4) - 356.06).abs() < 0.05);
    }

    #[test]
    fn f2_matches_critical_at_choke() {
        // 735·F2·√(1−r_c) reduces to C at the critical ratio, up to the
        // rounding in the 735 constant.
        let k = 1.3;
        let rc = critical_pressure_ratio(k);
        let lhs = 735.0 * coefficient_f2(k, rc) * (1.0 - rc).sqrt();
        assert!((lhs / coefficient_c(k) - 1.0).abs() < 1e-3);
    }
}
