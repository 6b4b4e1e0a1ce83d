//! Two-phase relief: the larger of the gas and liquid areas.
//!
//! This is a screening approximation. It does not model flashing or slip
//! and must not be read as a rigorous two-phase (API-520 Annex C) result.

use crate::error::SizingResult;
use crate::gas::size_gas;
use crate::inputs::{SizingInputs, SizingMethod};
use crate::liquid::size_liquid;
use crate::sizing::BranchArea;
use tracing::warn;

pub const APPROXIMATION_NOTICE: &str = "Two-phase area is the larger of the all-gas and all-liquid areas; \
     this is a conservative approximation, not a rigorous two-phase calculation";

pub(crate) fn size_two_phase(inputs: &SizingInputs) -> SizingResult<BranchArea> {
    let gas = size_gas(inputs, SizingMethod::TwoPhase)?;
    let liquid = size_liquid(inputs, SizingMethod::TwoPhase)?;
    let gas_governs = gas.area_in2 >= liquid.area_in2;
    warn!(
        gas_in2 = gas.area_in2,
        liquid_in2 = liquid.area_in2,
        governing = if gas_governs { "gas" } else { "liquid" },
        "two-phase sizing approximated"
    );

    let (mut governing, other) = if gas_governs {
        (gas, liquid)
    } else {
        (liquid, gas)
    };
    governing.messages.extend(other.messages);
    governing.messages.push(APPROXIMATION_NOTICE.to_string());
    Ok(governing)
}
