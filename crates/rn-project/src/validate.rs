//! Case validation.

use crate::schema::{Case, FittingDef, FluidDef, PsvDef, SegmentDef, SettingsDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Duplicate position {position} (segment '{id}')")]
    DuplicatePosition { position: u32, id: String },

    #[error("Missing value: {field} ({context})")]
    Missing { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    validate_fluid(&case.fluid)?;

    let mut ids = HashSet::new();
    let mut positions = HashSet::new();
    for segment in &case.segments {
        if !ids.insert(&segment.id) {
            return Err(ValidationError::DuplicateId {
                id: segment.id.clone(),
                context: "segments".to_string(),
            });
        }
        let position = segment.position.ok_or_else(|| ValidationError::Missing {
            field: "position".to_string(),
            context: format!("segment '{}'", segment.id),
        })?;
        if !positions.insert(position) {
            return Err(ValidationError::DuplicatePosition {
                position,
                id: segment.id.clone(),
            });
        }
        validate_segment(segment)?;
    }

    let b = &case.boundary;
    positive("boundary.pressure_pa", b.pressure_pa)?;
    positive("boundary.temperature_k", b.temperature_k)?;
    positive("boundary.mass_flow_kg_per_h", b.mass_flow_kg_per_h)?;

    if let Some(psv) = &case.psv {
        validate_psv(psv)?;
    }
    validate_settings(&case.settings)
}

fn validate_fluid(fluid: &FluidDef) -> Result<(), ValidationError> {
    let optional = [
        ("fluid.density_kg_m3", fluid.density_kg_m3),
        ("fluid.viscosity_cp", fluid.viscosity_cp),
        ("fluid.molecular_weight", fluid.molecular_weight),
        ("fluid.compressibility_z", fluid.compressibility_z),
    ];
    for (field, value) in optional {
        if let Some(v) = value {
            positive(field, v)?;
        }
    }
    if let Some(k) = fluid.specific_heat_ratio {
        if !k.is_finite() || k <= 1.0 {
            return Err(invalid("fluid.specific_heat_ratio", k, "must exceed 1"));
        }
    }
    // Phase requirements are enforced by the fluid model itself.
    crate::build::build_fluid(fluid)
        .validate()
        .map(|_| ())
        .map_err(|e| ValidationError::Missing {
            field: "fluid".to_string(),
            context: e.to_string(),
        })
}

fn validate_segment(segment: &SegmentDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("segment '{}'.{name}", segment.id);

    positive(field("diameter_m"), segment.diameter_m)?;
    non_negative(field("length_m"), segment.length_m)?;
    if !segment.elevation_change_m.is_finite() {
        return Err(invalid(
            field("elevation_change_m"),
            segment.elevation_change_m,
            "must be finite",
        ));
    }
    if let Some(r) = segment.roughness_m {
        non_negative(field("roughness_m"), r)?;
    }
    non_negative(
        field("fitting_safety_factor_pct"),
        segment.fitting_safety_factor_pct,
    )?;
    for fitting in &segment.fittings {
        validate_fitting(fitting, &field("fittings"))?;
    }
    if let Some(cv) = &segment.control_valve {
        positive(field("control_valve.cv"), cv.cv)?;
    }
    if let Some(orifice) = &segment.orifice {
        positive(field("orifice.bore_m"), orifice.bore_m)?;
        if orifice.bore_m >= segment.diameter_m {
            return Err(invalid(
                field("orifice.bore_m"),
                orifice.bore_m,
                "must be smaller than the pipe diameter",
            ));
        }
        if let Some(cd) = orifice.cd {
            if !(cd > 0.0 && cd <= 1.0) {
                return Err(invalid(field("orifice.cd"), cd, "must be in (0, 1]"));
            }
        }
    }
    if let Some(dp) = segment.user_pressure_drop_pa {
        if !dp.is_finite() {
            return Err(invalid(field("user_pressure_drop_pa"), dp, "must be finite"));
        }
    }
    Ok(())
}

fn validate_fitting(fitting: &FittingDef, context: &str) -> Result<(), ValidationError> {
    crate::build::build_fitting(fitting).map(|_| ()).map_err(|e| {
        ValidationError::InvalidValue {
            field: context.to_string(),
            value: fitting.kind.clone(),
            reason: e.to_string(),
        }
    })
}

fn validate_psv(psv: &PsvDef) -> Result<(), ValidationError> {
    positive("psv.set_pressure_pa_g", psv.set_pressure_pa_g)?;
    non_negative("psv.overpressure_pct", psv.overpressure_pct)?;
    positive("psv.atmospheric_pa", psv.atmospheric_pa)?;
    if let Some(bp) = psv.back_pressure_pa {
        non_negative("psv.back_pressure_pa", bp)?;
    }
    if let Some(w) = psv.relief_rate_kg_per_h {
        positive("psv.relief_rate_kg_per_h", w)?;
    }
    if let Some(t) = psv.relieving_temperature_k {
        positive("psv.relieving_temperature_k", t)?;
    }
    if let Some(kd) = psv.kd {
        positive("psv.kd", kd)?;
    }
    positive("psv.kb", psv.kb)?;
    positive("psv.kw", psv.kw)?;
    if let Some(bu) = psv.built_up_back_pressure_pa {
        non_negative("psv.built_up_back_pressure_pa", bu)?;
    }
    Ok(())
}

fn validate_settings(settings: &SettingsDef) -> Result<(), ValidationError> {
    positive("settings.erosional_c", settings.erosional_c)?;
    non_negative("settings.fallback_pa_per_m", settings.fallback_pa_per_m)?;
    positive("settings.chain_tolerance_pa", settings.chain_tolerance_pa)
}
