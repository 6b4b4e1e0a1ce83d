//! Method dispatch and standard orifice selection.

use crate::error::SizingResult;
use crate::gas::size_gas;
use crate::inputs::{AppliedCoefficients, SizingInputs, SizingMethod, SizingOutputs};
use crate::liquid::size_liquid;
use crate::orifice::select_orifice;
use crate::steam::size_steam;
use crate::two_phase::size_two_phase;
use rn_core::units::us::in2_to_mm2;
use rn_core::units::{kgps, mm2, to_kgph};
use tracing::{info, warn};

/// Area computed by one equation set, before orifice selection.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BranchArea {
    pub area_in2: f64,
    pub kd: f64,
    pub kv: f64,
    pub kn: f64,
    pub is_critical: bool,
    pub messages: Vec<String>,
}

pub const EXCEEDS_LARGEST_MESSAGE: &str =
    "Required area exceeds largest standard orifice (T); multiple valves required";

/// Size the relief orifice and select the API-526 orifice that covers it.
pub fn size_orifice(inputs: &SizingInputs, method: SizingMethod) -> SizingResult<SizingOutputs> {
    inputs.validate()?;

    let branch = match method {
        SizingMethod::Gas => size_gas(inputs, method)?,
        SizingMethod::Liquid => size_liquid(inputs, method)?,
        SizingMethod::Steam => size_steam(inputs)?,
        SizingMethod::TwoPhase => size_two_phase(inputs)?,
    };

    let selection = select_orifice(branch.area_in2);
    let mut messages = branch.messages;
    if selection.exceeds_largest {
        warn!(required_in2 = branch.area_in2, "required area exceeds orifice T");
        messages.push(EXCEEDS_LARGEST_MESSAGE.to_string());
    }

    let percent_used = branch.area_in2 / selection.orifice.area_in2 * 100.0;
    let rated_capacity = kgps(inputs.mass_flow.value / (percent_used / 100.0));
    let c = &inputs.coefficients;

    info!(
        method = %method,
        required_mm2 = in2_to_mm2(branch.area_in2),
        orifice = %selection.orifice,
        percent_used,
        rated_kgph = to_kgph(rated_capacity),
        "orifice sized"
    );

    Ok(SizingOutputs {
        method,
        required_area: mm2(in2_to_mm2(branch.area_in2)),
        selected: selection.orifice,
        percent_used,
        rated_capacity,
        coefficients: AppliedCoefficients {
            kd: branch.kd,
            kb: c.kb,
            kc: c.kc,
            kw: c.kw,
            kv: branch.kv,
            kn: branch.kn,
        },
        is_critical_flow: branch.is_critical,
        exceeds_largest_orifice: selection.exceeds_largest,
        messages,
    })
}
