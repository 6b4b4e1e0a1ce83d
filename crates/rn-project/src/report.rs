//! Serializable data sheet for a solved case.

use crate::analysis::CaseAnalysis;
use crate::{ProjectResult, schema::Case};
use rn_components::SegmentResult;
use rn_core::units::{to_kgph, to_mm2};
use rn_sizing::{BackpressureCheck, InletDropCheck, SizingOutputs};
use rn_solver::PressureDropEstimate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSheet {
    pub case_name: String,
    pub fluid_phase: String,
    pub network: NetworkSheet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingSheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlet_check: Option<CheckSheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backpressure_check: Option<CheckSheet>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSheet {
    pub total_pressure_drop_pa: f64,
    /// True when the drop is the linear stand-in, not a hydraulic solve
    pub is_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    pub has_choked_flow: bool,
    pub has_erosional_velocity: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub segments: Vec<SegmentRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentRow {
    pub id: String,
    pub name: String,
    pub position: u32,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub regime: String,
    pub velocity_m_s: f64,
    pub mach: f64,
    pub erosional_velocity_m_s: f64,
    pub dp_friction_fitting_pa: f64,
    pub dp_elevation_pa: f64,
    pub dp_control_valve_pa: f64,
    pub dp_orifice_pa: f64,
    pub dp_user_pa: f64,
    pub dp_total_pa: f64,
    pub inlet_pressure_pa: f64,
    pub outlet_pressure_pa: f64,
    pub inlet_temperature_k: f64,
    pub outlet_temperature_k: f64,
    pub inlet_density_kg_m3: f64,
    pub outlet_density_kg_m3: f64,
    pub inlet_velocity_m_s: f64,
    pub outlet_velocity_m_s: f64,
    pub is_choked: bool,
    pub is_erosional: bool,
}

impl From<&SegmentResult> for SegmentRow {
    fn from(r: &SegmentResult) -> Self {
        let dp = &r.pressure_drop;
        Self {
            id: r.segment_id.clone(),
            name: r.segment_name.clone(),
            position: r.position,
            reynolds: r.reynolds,
            friction_factor: r.friction_factor,
            regime: r.regime.to_string(),
            velocity_m_s: r.velocity.value,
            mach: r.mach,
            erosional_velocity_m_s: r.erosional_velocity.value,
            dp_friction_fitting_pa: dp.friction_fitting.value,
            dp_elevation_pa: dp.elevation.value,
            dp_control_valve_pa: dp.control_valve.value,
            dp_orifice_pa: dp.orifice.value,
            dp_user_pa: dp.user_specified.value,
            dp_total_pa: dp.total.value,
            inlet_pressure_pa: r.inlet.pressure.value,
            outlet_pressure_pa: r.outlet.pressure.value,
            inlet_temperature_k: r.inlet.temperature.value,
            outlet_temperature_k: r.outlet.temperature.value,
            inlet_density_kg_m3: r.inlet.density.value,
            outlet_density_kg_m3: r.outlet.density.value,
            inlet_velocity_m_s: r.inlet.velocity.value,
            outlet_velocity_m_s: r.outlet.velocity.value,
            is_choked: r.is_choked,
            is_erosional: r.is_erosional,
        }
    }
}

impl From<&PressureDropEstimate> for NetworkSheet {
    fn from(estimate: &PressureDropEstimate) -> Self {
        match estimate {
            PressureDropEstimate::Solved(result) => Self {
                total_pressure_drop_pa: result.total_pressure_drop.value,
                is_fallback: false,
                fallback_reason: None,
                direction: Some(format!("{:?}", result.direction).to_lowercase()),
                has_choked_flow: result.has_choked_flow,
                has_erosional_velocity: result.has_erosional_velocity,
                warnings: result.warnings.iter().map(|w| w.to_string()).collect(),
                segments: result.segments.iter().map(SegmentRow::from).collect(),
            },
            PressureDropEstimate::LinearFallback {
                pressure_drop,
                reason,
                ..
            } => Self {
                total_pressure_drop_pa: pressure_drop.value,
                is_fallback: true,
                fallback_reason: Some(reason.clone()),
                direction: None,
                has_choked_flow: false,
                has_erosional_velocity: false,
                warnings: Vec::new(),
                segments: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizingSheet {
    pub method: String,
    pub required_area_mm2: f64,
    pub selected_orifice: String,
    pub selected_area_mm2: f64,
    pub percent_used: f64,
    pub rated_capacity_kg_per_h: f64,
    pub kd: f64,
    pub kb: f64,
    pub kc: f64,
    pub kw: f64,
    pub kv: f64,
    pub kn: f64,
    pub is_critical_flow: bool,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl From<&SizingOutputs> for SizingSheet {
    fn from(out: &SizingOutputs) -> Self {
        let c = &out.coefficients;
        Self {
            method: out.method.to_string(),
            required_area_mm2: to_mm2(out.required_area),
            selected_orifice: out.selected.to_string(),
            selected_area_mm2: out.selected_area_mm2(),
            percent_used: out.percent_used,
            rated_capacity_kg_per_h: to_kgph(out.rated_capacity),
            kd: c.kd,
            kb: c.kb,
            kc: c.kc,
            kw: c.kw,
            kv: c.kv,
            kn: c.kn,
            is_critical_flow: out.is_critical_flow,
            messages: out.messages.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckSheet {
    pub is_valid: bool,
    pub percent: f64,
    /// Band or limit the percentage was judged against
    pub verdict: String,
    pub message: String,
}

impl From<&InletDropCheck> for CheckSheet {
    fn from(c: &InletDropCheck) -> Self {
        Self {
            is_valid: c.is_valid,
            percent: c.percent,
            verdict: c.severity.to_string(),
            message: c.message.clone(),
        }
    }
}

impl From<&BackpressureCheck> for CheckSheet {
    fn from(c: &BackpressureCheck) -> Self {
        Self {
            is_valid: c.is_valid,
            percent: c.percent,
            verdict: format!("limit {}%", c.limit_pct),
            message: c.message.clone(),
        }
    }
}

impl DataSheet {
    pub fn new(case: &Case, analysis: &CaseAnalysis) -> Self {
        Self {
            case_name: case.name.clone(),
            fluid_phase: crate::build::build_fluid(&case.fluid).phase.to_string(),
            network: NetworkSheet::from(&analysis.estimate),
            sizing: analysis.sizing.as_ref().map(SizingSheet::from),
            inlet_check: analysis.inlet_check.as_ref().map(CheckSheet::from),
            backpressure_check: analysis.backpressure_check.as_ref().map(CheckSheet::from),
        }
    }

    pub fn to_json(&self) -> ProjectResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> ProjectResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
