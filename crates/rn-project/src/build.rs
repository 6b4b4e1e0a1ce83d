//! Conversion from case definitions into solver and sizing values.

use crate::schema::{
    BoundaryDef, Case, DirectionDef, FittingDef, FluidDef, GasFlowModelDef, PhaseDef, SegmentDef,
    SettingsDef, SizingMethodDef, ValveTypeDef, ViscosityCorrectionDef,
};
use crate::validate::ValidationError;
use crate::{ProjectError, ProjectResult};
use rn_components::{
    ComponentError, ControlValve, Fitting, FittingType, FlowDirection, GasFlowModel,
    OrificePlate, PipeSegment, SegmentSettings,
};
use rn_core::units::{Pressure, cp, k, kg_m3, kgph, m, pa};
use rn_fluids::{Fluid, Phase};
use rn_sizing::{
    Coefficients, SizingInputs, SizingMethod, ValveType, ViscosityCorrection, relieving_pressure,
};
use rn_solver::{BoundaryCondition, SolverSettings};
use std::str::FromStr;

pub fn build_fluid(def: &FluidDef) -> Fluid {
    let phase = match def.phase {
        PhaseDef::Gas => Phase::Gas,
        PhaseDef::Liquid => Phase::Liquid,
        PhaseDef::Steam => Phase::Steam,
        PhaseDef::TwoPhase => Phase::TwoPhase,
    };
    Fluid {
        phase,
        density: def.density_kg_m3.map(kg_m3),
        viscosity: def.viscosity_cp.map(cp),
        molecular_weight: def.molecular_weight,
        compressibility: def.compressibility_z,
        specific_heat_ratio: def.specific_heat_ratio,
    }
}

pub fn build_fitting(def: &FittingDef) -> Result<Fitting, ComponentError> {
    let kind = if def.kind.trim().eq_ignore_ascii_case("custom") {
        let k = def.k.ok_or_else(|| ComponentError::InvalidGeometry {
            what: "custom fitting requires k".to_string(),
        })?;
        if !k.is_finite() || k < 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: format!("custom fitting K must be non-negative (got {k})"),
            });
        }
        FittingType::Custom { k }
    } else {
        FittingType::from_str(&def.kind)?
    };
    Ok(Fitting::new(kind, def.count))
}

fn build_direction(def: DirectionDef) -> FlowDirection {
    match def {
        DirectionDef::Forward => FlowDirection::Forward,
        DirectionDef::Backward => FlowDirection::Backward,
    }
}

pub fn build_segment(def: &SegmentDef) -> ProjectResult<PipeSegment> {
    let position = def.position.ok_or_else(|| ValidationError::Missing {
        field: "position".to_string(),
        context: format!("segment '{}'", def.id),
    })?;

    let mut segment = PipeSegment::new(
        def.id.clone(),
        def.name.clone(),
        position,
        m(def.diameter_m),
        m(def.length_m),
    )
    .with_elevation_change(m(def.elevation_change_m))
    .with_fitting_safety_factor(def.fitting_safety_factor_pct);

    if let Some(r) = def.roughness_m {
        segment = segment.with_roughness(m(r));
    }
    for fitting in &def.fittings {
        let fitting = build_fitting(fitting).map_err(|e| ProjectError::Build {
            what: format!("segment '{}': {e}", def.id),
        })?;
        segment.fittings.push(fitting);
    }
    if let Some(cv) = &def.control_valve {
        segment = segment.with_control_valve(ControlValve::new(cv.cv));
    }
    if let Some(orifice) = &def.orifice {
        let mut plate = OrificePlate::new(m(orifice.bore_m));
        if let Some(cd) = orifice.cd {
            plate = plate.with_cd(cd);
        }
        segment = segment.with_orifice(plate);
    }
    if let Some(dp) = def.user_pressure_drop_pa {
        segment = segment.with_user_pressure_drop(pa(dp));
    }
    if let Some(direction) = def.direction {
        segment = segment.with_direction(build_direction(direction));
    }
    Ok(segment)
}

pub fn build_segments(defs: &[SegmentDef]) -> ProjectResult<Vec<PipeSegment>> {
    defs.iter().map(build_segment).collect()
}

pub fn build_boundary(def: &BoundaryDef) -> BoundaryCondition {
    BoundaryCondition {
        pressure: pa(def.pressure_pa),
        temperature: k(def.temperature_k),
        mass_flow_rate: kgph(def.mass_flow_kg_per_h),
        direction: build_direction(def.direction),
    }
}

pub fn build_settings(def: &SettingsDef) -> SolverSettings {
    SolverSettings {
        segment: SegmentSettings {
            gas_flow_model: match def.gas_flow_model {
                GasFlowModelDef::Isothermal => GasFlowModel::Isothermal,
                GasFlowModelDef::Adiabatic => GasFlowModel::Adiabatic,
            },
            erosional_c: def.erosional_c,
        },
        fallback_pa_per_m: def.fallback_pa_per_m,
        chain_tolerance_pa: def.chain_tolerance_pa,
    }
}

/// Everything needed to size and check one relief valve.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingCase {
    pub inputs: SizingInputs,
    pub method: SizingMethod,
    /// Gauge set pressure
    pub set_pressure: Pressure,
    pub valve_type: ValveType,
    pub built_up_back_pressure: Option<Pressure>,
}

/// Sizing inputs for the case's PSV block, or `None` without one.
pub fn build_sizing_inputs(case: &Case) -> ProjectResult<Option<SizingCase>> {
    let Some(psv) = &case.psv else {
        return Ok(None);
    };

    let set_pressure = pa(psv.set_pressure_pa_g);
    let atmospheric = pa(psv.atmospheric_pa);
    let p1 = relieving_pressure(set_pressure, psv.overpressure_pct, atmospheric)?;
    let back_pressure = psv.back_pressure_pa.map(pa).unwrap_or(atmospheric);
    let flow = psv
        .relief_rate_kg_per_h
        .unwrap_or(case.boundary.mass_flow_kg_per_h);
    let temperature = psv
        .relieving_temperature_k
        .unwrap_or(case.boundary.temperature_k);

    let fluid = build_fluid(&case.fluid);
    let method = match psv.method {
        Some(SizingMethodDef::Gas) => SizingMethod::Gas,
        Some(SizingMethodDef::Liquid) => SizingMethod::Liquid,
        Some(SizingMethodDef::Steam) => SizingMethod::Steam,
        Some(SizingMethodDef::TwoPhase) => SizingMethod::TwoPhase,
        None => SizingMethod::from(fluid.phase),
    };

    let mut coefficients = Coefficients::default().with_kb(psv.kb).with_kw(psv.kw);
    if let Some(kd) = psv.kd {
        coefficients = coefficients.with_kd(kd);
    }
    if psv.rupture_disk {
        coefficients = coefficients.with_rupture_disk();
    }

    let correction = match psv.viscosity_correction {
        ViscosityCorrectionDef::TwoPass => ViscosityCorrection::TwoPass,
        ViscosityCorrectionDef::Converged {
            tolerance,
            max_passes,
        } => ViscosityCorrection::Converged {
            tolerance,
            max_passes,
        },
    };

    let inputs = SizingInputs::new(kgph(flow), p1, back_pressure, k(temperature), fluid)
        .with_coefficients(coefficients)
        .with_viscosity_correction(correction);

    Ok(Some(SizingCase {
        inputs,
        method,
        set_pressure,
        valve_type: match psv.valve_type {
            ValveTypeDef::Conventional => ValveType::Conventional,
            ValveTypeDef::BalancedBellows => ValveType::BalancedBellows,
        },
        built_up_back_pressure: psv.built_up_back_pressure_pa.map(pa),
    }))
}
