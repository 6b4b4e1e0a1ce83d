//! In-line restrictions: control valves and orifice plates.
//!
//! Both are evaluated as incompressible losses at the density handed in by
//! the segment solver (the mean segment density for gases).

use crate::common::{check_finite, circular_area};
use crate::error::{ComponentError, ComponentResult};
use rn_core::units::Length;

/// Kv = 0.865·Cv (Kv in m³/h at 1 bar, Cv in US gpm at 1 psi).
pub const KV_PER_CV: f64 = 0.865;

/// Control valve characterised by its flow coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlValve {
    /// Flow coefficient Cv (US gpm at 1 psi)
    pub cv: f64,
}

impl ControlValve {
    pub fn new(cv: f64) -> Self {
        Self { cv }
    }

    pub fn kv(&self) -> f64 {
        self.cv * KV_PER_CV
    }

    /// Pressure drop [Pa] for a mass flow [kg/s] at density ρ [kg/m³].
    ///
    /// `ΔP[bar] = (ρ/1000)·(Q/Kv)²` with Q in m³/h.
    pub fn pressure_drop(&self, mdot_kgps: f64, rho: f64) -> ComponentResult<f64> {
        if !self.cv.is_finite() || self.cv <= 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: format!("control valve Cv must be positive (got {})", self.cv),
            });
        }
        let q_m3h = mdot_kgps * 3600.0 / rho;
        let dp_bar = (rho / 1000.0) * (q_m3h / self.kv()).powi(2);
        check_finite(dp_bar * 1.0e5, "control valve pressure drop")
    }
}

/// Thin square-edged orifice plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrificePlate {
    /// Bore diameter
    pub bore: Length,
    /// Discharge coefficient (dimensionless, typically ~0.61)
    pub cd: f64,
}

impl OrificePlate {
    pub const DEFAULT_CD: f64 = 0.61;

    pub fn new(bore: Length) -> Self {
        Self {
            bore,
            cd: Self::DEFAULT_CD,
        }
    }

    pub fn with_cd(mut self, cd: f64) -> Self {
        self.cd = cd;
        self
    }

    /// Diameter ratio β = d/D.
    pub fn beta(&self, pipe_diameter_m: f64) -> f64 {
        self.bore.value / pipe_diameter_m
    }

    /// Unrecoverable pressure loss [Pa].
    ///
    /// Differential: `Δp = ṁ²·(1−β⁴) / (2ρ·Cd²·A_o²)`; the permanent fraction
    /// follows ISO 5167-2:
    /// `(√(1−β⁴(1−Cd²)) − Cd·β²) / (√(1−β⁴(1−Cd²)) + Cd·β²)`.
    pub fn pressure_drop(
        &self,
        mdot_kgps: f64,
        rho: f64,
        pipe_diameter_m: f64,
    ) -> ComponentResult<f64> {
        let beta = self.beta(pipe_diameter_m);
        if !beta.is_finite() || beta <= 0.0 || beta >= 1.0 {
            return Err(ComponentError::InvalidGeometry {
                what: format!("orifice beta ratio must lie in (0, 1) (got {beta})"),
            });
        }
        if !self.cd.is_finite() || self.cd <= 0.0 || self.cd > 1.0 {
            return Err(ComponentError::InvalidGeometry {
                what: format!("orifice discharge coefficient must lie in (0, 1] (got {})", self.cd),
            });
        }

        let area = circular_area(self.bore.value);
        let beta4 = beta.powi(4);
        let differential =
            mdot_kgps.powi(2) * (1.0 - beta4) / (2.0 * rho * (self.cd * area).powi(2));

        let root = (1.0 - beta4 * (1.0 - self.cd * self.cd)).sqrt();
        let cb2 = self.cd * beta * beta;
        let permanent_fraction = (root - cb2) / (root + cb2);

        check_finite(differential * permanent_fraction, "orifice pressure loss")
    }
}
