//! Ideal-gas relations with a compressibility correction.

use rn_core::units::constants::R_UNIVERSAL;

/// Critical (sonic) pressure ratio `(2/(k+1))^(k/(k−1))`.
pub fn critical_pressure_ratio(k: f64) -> f64 {
    (2.0 / (k + 1.0)).powf(k / (k - 1.0))
}

/// Validated compressible-fluid properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasProps {
    /// Molecular weight [kg/kmol == g/mol]
    pub molecular_weight: f64,
    /// Compressibility factor Z
    pub compressibility: f64,
    /// Specific heat ratio k
    pub k: f64,
    /// Dynamic viscosity [Pa·s]
    pub viscosity_pa_s: f64,
}

impl GasProps {
    /// Specific gas constant R/M [J/(kg·K)].
    pub fn specific_gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molecular_weight
    }

    /// ρ = P·M / (Z·R·T) [kg/m³]
    pub fn density_kg_m3(&self, p_pa: f64, t_k: f64) -> f64 {
        p_pa / (self.compressibility * self.specific_gas_constant() * t_k)
    }

    /// a = √(k·Z·R·T/M) [m/s]
    pub fn speed_of_sound(&self, t_k: f64) -> f64 {
        (self.k * self.compressibility * self.specific_gas_constant() * t_k).sqrt()
    }

    /// Ideal-gas cp = k·R/((k−1)·M) [J/(kg·K)]
    pub fn cp(&self) -> f64 {
        self.k * self.specific_gas_constant() / (self.k - 1.0)
    }

    pub fn critical_pressure_ratio(&self) -> f64 {
        critical_pressure_ratio(self.k)
    }
}
