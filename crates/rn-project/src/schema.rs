//! Case file schema.
//!
//! Field names carry their unit; set pressure is gauge, every other
//! pressure is absolute.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    pub fluid: FluidDef,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
    pub boundary: BoundaryDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psv: Option<PsvDef>,
    #[serde(default)]
    pub settings: SettingsDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDef {
    Gas,
    Liquid,
    Steam,
    TwoPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub phase: PhaseDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity_cp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressibility_z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_heat_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DirectionDef {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentDef {
    pub id: String,
    pub name: String,
    /// Absent only in version 1 files; filled in by migration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    pub diameter_m: f64,
    pub length_m: f64,
    #[serde(default)]
    pub elevation_change_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_m: Option<f64>,
    #[serde(default)]
    pub fittings: Vec<FittingDef>,
    #[serde(default)]
    pub fitting_safety_factor_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_valve: Option<ControlValveDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orifice: Option<OrificePlateDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_pressure_drop_pa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<DirectionDef>,
}

/// Catalogue fitting by name (`elbow_90`, `gate_valve`, ...) or `custom`
/// with an explicit `k`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FittingDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlValveDef {
    pub cv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrificePlateDef {
    pub bore_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cd: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryDef {
    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub mass_flow_kg_per_h: f64,
    #[serde(default)]
    pub direction: DirectionDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SizingMethodDef {
    Gas,
    Liquid,
    Steam,
    TwoPhase,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValveTypeDef {
    #[default]
    Conventional,
    BalancedBellows,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViscosityCorrectionDef {
    #[default]
    TwoPass,
    Converged { tolerance: f64, max_passes: usize },
}

/// Relief valve data for sizing and inlet compliance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PsvDef {
    pub set_pressure_pa_g: f64,
    #[serde(default = "default_overpressure_pct")]
    pub overpressure_pct: f64,
    #[serde(default = "default_atmospheric_pa")]
    pub atmospheric_pa: f64,
    /// Total back pressure; atmospheric when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_pressure_pa: Option<f64>,
    /// Defaults to the boundary flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relief_rate_kg_per_h: Option<f64>,
    /// Defaults to the boundary temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relieving_temperature_k: Option<f64>,
    /// Defaults to the fluid phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<SizingMethodDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<f64>,
    #[serde(default = "default_one")]
    pub kb: f64,
    #[serde(default = "default_one")]
    pub kw: f64,
    #[serde(default)]
    pub rupture_disk: bool,
    #[serde(default)]
    pub valve_type: ValveTypeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub built_up_back_pressure_pa: Option<f64>,
    #[serde(default)]
    pub viscosity_correction: ViscosityCorrectionDef,
}

fn default_overpressure_pct() -> f64 {
    10.0
}

fn default_atmospheric_pa() -> f64 {
    rn_core::units::constants::P_ATM_PA
}

fn default_one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GasFlowModelDef {
    #[default]
    Isothermal,
    Adiabatic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsDef {
    #[serde(default)]
    pub gas_flow_model: GasFlowModelDef,
    #[serde(default = "default_erosional_c")]
    pub erosional_c: f64,
    #[serde(default = "default_fallback_pa_per_m")]
    pub fallback_pa_per_m: f64,
    #[serde(default = "default_chain_tolerance_pa")]
    pub chain_tolerance_pa: f64,
}

fn default_erosional_c() -> f64 {
    rn_components::checks::EROSIONAL_C_CONTINUOUS
}

fn default_fallback_pa_per_m() -> f64 {
    rn_solver::SolverSettings::DEFAULT_FALLBACK_PA_PER_M
}

fn default_chain_tolerance_pa() -> f64 {
    rn_solver::SolverSettings::DEFAULT_CHAIN_TOLERANCE_PA
}

impl Default for SettingsDef {
    fn default() -> Self {
        Self {
            gas_flow_model: GasFlowModelDef::default(),
            erosional_c: default_erosional_c(),
            fallback_pa_per_m: default_fallback_pa_per_m(),
            chain_tolerance_pa: default_chain_tolerance_pa(),
        }
    }
}
