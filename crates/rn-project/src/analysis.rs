//! Full case run: network, sizing and compliance.

use crate::ProjectResult;
use crate::build::{
    build_boundary, build_fluid, build_segments, build_settings, build_sizing_inputs,
};
use crate::schema::Case;
use rn_sizing::{
    BackpressureCheck, InletDropCheck, SizingOutputs, size_orifice,
    validate_built_up_backpressure, validate_estimate,
};
use rn_solver::{PressureDropEstimate, estimate_network};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct CaseAnalysis {
    pub estimate: PressureDropEstimate,
    pub sizing: Option<SizingOutputs>,
    pub inlet_check: Option<InletDropCheck>,
    pub backpressure_check: Option<BackpressureCheck>,
}

/// Solve the case's line only.
pub fn analyze_network(case: &Case) -> ProjectResult<PressureDropEstimate> {
    let fluid = build_fluid(&case.fluid);
    let segments = build_segments(&case.segments)?;
    let boundary = build_boundary(&case.boundary);
    let settings = build_settings(&case.settings);
    Ok(estimate_network(&segments, &fluid, &boundary, &settings))
}

/// Solve the line, then size and check the PSV when the case has one.
///
/// The line is taken to be the PSV inlet line; its drop is what the inlet
/// loss check classifies.
pub fn analyze_case(case: &Case) -> ProjectResult<CaseAnalysis> {
    let estimate = analyze_network(case)?;

    let Some(psv) = build_sizing_inputs(case)? else {
        info!(case = %case.name, "no PSV block, network only");
        return Ok(CaseAnalysis {
            estimate,
            sizing: None,
            inlet_check: None,
            backpressure_check: None,
        });
    };

    let sizing = size_orifice(&psv.inputs, psv.method)?;
    let inlet_check = validate_estimate(&estimate, psv.set_pressure)?;
    let backpressure_check = psv
        .built_up_back_pressure
        .map(|bp| validate_built_up_backpressure(bp, psv.set_pressure, psv.valve_type))
        .transpose()?;

    info!(
        case = %case.name,
        orifice = %sizing.selected,
        inlet_pct = inlet_check.percent,
        "case analysed"
    );

    Ok(CaseAnalysis {
        estimate,
        sizing: Some(sizing),
        inlet_check: Some(inlet_check),
        backpressure_check,
    })
}
