//! Inlet loss and built-up back pressure checks against API-520 Part II.
//!
//! Inlet loss bands, as a percentage of set pressure:
//!
//! | percent       | severity       |
//! |---------------|----------------|
//! | `< 3`         | compliant      |
//! | `3 ≤ p < 5`   | warning        |
//! | `≥ 5`         | non-compliant  |
//!
//! Exactly 3 % is a warning and exactly 5 % is non-compliant. A negative
//! drop (a downhill inlet line that gains static head) is compliant.

use crate::error::{SizingError, SizingResult, require_positive};
use rn_core::units::Pressure;
use rn_solver::{NetworkResult, PressureDropEstimate};
use std::fmt;
use tracing::{info, warn};

pub const INLET_LOSS_GUIDELINE_PCT: f64 = 3.0;
pub const INLET_LOSS_LIMIT_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Compliant,
    Warning,
    NonCompliant,
}

impl Severity {
    pub fn from_inlet_percent(percent: f64) -> Self {
        if percent < INLET_LOSS_GUIDELINE_PCT {
            Severity::Compliant
        } else if percent < INLET_LOSS_LIMIT_PCT {
            Severity::Warning
        } else {
            Severity::NonCompliant
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Compliant => write!(f, "compliant"),
            Severity::Warning => write!(f, "warning"),
            Severity::NonCompliant => write!(f, "non-compliant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InletDropCheck {
    /// False only when non-compliant
    pub is_valid: bool,
    pub percent: f64,
    pub severity: Severity,
    pub message: String,
}

/// Classify the PSV inlet pressure loss against the 3 % / 5 % bands.
///
/// `set_pressure` is gauge; both values share units so the ratio is
/// dimensionless. A negative `inlet_dp` means the line gains pressure and
/// is reported as compliant.
pub fn validate_inlet_drop(
    inlet_dp: Pressure,
    set_pressure: Pressure,
) -> SizingResult<InletDropCheck> {
    let set = require_positive(set_pressure.value, "set pressure")?;
    let dp = inlet_dp.value;
    if !dp.is_finite() {
        return Err(SizingError::InvalidInput {
            what: format!("inlet pressure drop must be finite (got {dp})"),
        });
    }

    let percent = dp / set * 100.0;
    let severity = Severity::from_inlet_percent(percent);
    let message = match severity {
        Severity::Compliant if percent < 0.0 => format!(
            "Inlet line gains {:.2}% of set pressure from static head; no inlet loss",
            -percent
        ),
        Severity::Compliant => format!(
            "Inlet loss {percent:.2}% of set pressure is within the {INLET_LOSS_GUIDELINE_PCT}% guideline"
        ),
        Severity::Warning => format!(
            "Inlet loss {percent:.2}% of set pressure exceeds the {INLET_LOSS_GUIDELINE_PCT}% guideline; \
             acceptable only with engineering justification"
        ),
        Severity::NonCompliant => format!(
            "Inlet loss {percent:.2}% of set pressure is at or above {INLET_LOSS_LIMIT_PCT}%; redesign the inlet line"
        ),
    };

    match severity {
        Severity::Compliant => info!(percent, "inlet loss compliant"),
        _ => warn!(percent, severity = %severity, "inlet loss above guideline"),
    }

    Ok(InletDropCheck {
        is_valid: severity != Severity::NonCompliant,
        percent,
        severity,
        message,
    })
}

/// Inlet check over a solved inlet line.
pub fn validate_psv(network: &NetworkResult, set_pressure: Pressure) -> SizingResult<InletDropCheck> {
    validate_inlet_drop(network.total_pressure_drop, set_pressure)
}

/// Inlet check over a solve or its linear stand-in; the latter is marked in
/// the message.
pub fn validate_estimate(
    estimate: &PressureDropEstimate,
    set_pressure: Pressure,
) -> SizingResult<InletDropCheck> {
    let mut check = validate_inlet_drop(estimate.pressure_drop(), set_pressure)?;
    if estimate.is_fallback() {
        check
            .message
            .push_str(" (linear fallback estimate, not a hydraulic solve)");
    }
    Ok(check)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValveType {
    Conventional,
    BalancedBellows,
}

impl ValveType {
    /// Allowable built-up back pressure, % of set pressure.
    pub fn built_up_limit_pct(self) -> f64 {
        match self {
            ValveType::Conventional => 10.0,
            ValveType::BalancedBellows => 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackpressureCheck {
    pub is_valid: bool,
    pub percent: f64,
    pub limit_pct: f64,
    pub message: String,
}

/// Built-up back pressure against the valve-type limit.
pub fn validate_built_up_backpressure(
    built_up: Pressure,
    set_pressure: Pressure,
    valve: ValveType,
) -> SizingResult<BackpressureCheck> {
    let set = require_positive(set_pressure.value, "set pressure")?;
    let bp = built_up.value;
    if !bp.is_finite() || bp < 0.0 {
        return Err(SizingError::InvalidInput {
            what: format!("built-up back pressure must be finite and non-negative (got {bp})"),
        });
    }

    let percent = bp / set * 100.0;
    let limit_pct = valve.built_up_limit_pct();
    let is_valid = percent <= limit_pct;
    let message = if is_valid {
        format!("Built-up back pressure {percent:.1}% of set is within the {limit_pct}% limit")
    } else {
        warn!(percent, limit_pct, valve = ?valve, "built-up back pressure above limit");
        format!(
            "Built-up back pressure {percent:.1}% of set exceeds the {limit_pct}% limit for a {valve:?} valve"
        )
    };

    Ok(BackpressureCheck {
        is_valid,
        percent,
        limit_pct,
        message,
    })
}
