//! Phase-aware fluid property container.

use crate::error::{FluidError, FluidResult};
use crate::gas::GasProps;
use rn_core::units::{Density, DynVisc, Pressure, Temperature, kg_m3};
use std::fmt;

/// Fluid phase as declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Gas,
    Liquid,
    Steam,
    TwoPhase,
}

impl Phase {
    /// Gas and steam are treated with compressible-flow relations.
    pub fn is_compressible(self) -> bool {
        matches!(self, Phase::Gas | Phase::Steam)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Gas => write!(f, "gas"),
            Phase::Liquid => write!(f, "liquid"),
            Phase::Steam => write!(f, "steam"),
            Phase::TwoPhase => write!(f, "two-phase"),
        }
    }
}

/// User-supplied physical properties of the relieved fluid.
///
/// Which fields are required depends on [`Phase`]:
///
/// | phase     | required                                         |
/// |-----------|--------------------------------------------------|
/// | liquid    | density, viscosity                               |
/// | gas/steam | viscosity, molecular weight, Z, k                |
/// | two-phase | density (homogeneous mixture), viscosity         |
///
/// Nothing is defaulted: [`Fluid::validate`] rejects a fluid that lacks a
/// required property.
#[derive(Debug, Clone, PartialEq)]
pub struct Fluid {
    pub phase: Phase,
    pub density: Option<Density>,
    pub viscosity: Option<DynVisc>,
    /// Molecular weight [g/mol]
    pub molecular_weight: Option<f64>,
    /// Compressibility factor Z
    pub compressibility: Option<f64>,
    /// Specific heat ratio k = cp/cv
    pub specific_heat_ratio: Option<f64>,
}

impl Fluid {
    /// Empty property set for a phase; fill it with the `with_*` builders.
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            density: None,
            viscosity: None,
            molecular_weight: None,
            compressibility: None,
            specific_heat_ratio: None,
        }
    }

    pub fn liquid(density: Density, viscosity: DynVisc) -> Self {
        Self::new(Phase::Liquid)
            .with_density(density)
            .with_viscosity(viscosity)
    }

    pub fn gas(molecular_weight: f64, z: f64, k: f64, viscosity: DynVisc) -> Self {
        Self::new(Phase::Gas)
            .with_molecular_weight(molecular_weight)
            .with_compressibility(z)
            .with_specific_heat_ratio(k)
            .with_viscosity(viscosity)
    }

    pub fn steam(molecular_weight: f64, z: f64, k: f64, viscosity: DynVisc) -> Self {
        Self {
            phase: Phase::Steam,
            ..Self::gas(molecular_weight, z, k, viscosity)
        }
    }

    pub fn two_phase(mixture_density: Density, viscosity: DynVisc) -> Self {
        Self::new(Phase::TwoPhase)
            .with_density(mixture_density)
            .with_viscosity(viscosity)
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_viscosity(mut self, viscosity: DynVisc) -> Self {
        self.viscosity = Some(viscosity);
        self
    }

    pub fn with_molecular_weight(mut self, mw: f64) -> Self {
        self.molecular_weight = Some(mw);
        self
    }

    pub fn with_compressibility(mut self, z: f64) -> Self {
        self.compressibility = Some(z);
        self
    }

    pub fn with_specific_heat_ratio(mut self, k: f64) -> Self {
        self.specific_heat_ratio = Some(k);
        self
    }

    /// Check the phase invariants and produce solver-ready properties.
    pub fn validate(&self) -> FluidResult<FluidProps> {
        let viscosity = self.require_positive(
            self.viscosity.map(|mu| mu.value),
            "viscosity",
            "viscosity must be positive and finite",
        )?;

        if self.phase.is_compressible() {
            let molecular_weight = self.require_positive(
                self.molecular_weight,
                "molecular weight",
                "molecular weight must be positive and finite",
            )?;
            let compressibility = self.require_positive(
                self.compressibility,
                "compressibility factor",
                "compressibility factor must be positive and finite",
            )?;
            let k = self.require_positive(
                self.specific_heat_ratio,
                "specific heat ratio",
                "specific heat ratio must be finite",
            )?;
            if k <= 1.0 {
                return Err(FluidError::NonPhysical {
                    what: "specific heat ratio must exceed 1",
                });
            }
            Ok(FluidProps::Compressible(GasProps {
                molecular_weight,
                compressibility,
                k,
                viscosity_pa_s: viscosity,
            }))
        } else {
            let density = self.require_positive(
                self.density.map(|rho| rho.value),
                "density",
                "density must be positive and finite",
            )?;
            Ok(FluidProps::Incompressible {
                density_kg_m3: density,
                viscosity_pa_s: viscosity,
            })
        }
    }

    /// True when [`Fluid::validate`] would succeed.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn require_positive(
        &self,
        value: Option<f64>,
        property: &'static str,
        non_physical: &'static str,
    ) -> FluidResult<f64> {
        let v = value.ok_or(FluidError::MissingProperty {
            phase: self.phase,
            property,
        })?;
        if !v.is_finite() || v <= 0.0 {
            return Err(FluidError::NonPhysical { what: non_physical });
        }
        Ok(v)
    }
}

/// Validated fluid properties in SI base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FluidProps {
    /// Liquid, or a two-phase mixture treated with a homogeneous density.
    Incompressible {
        density_kg_m3: f64,
        viscosity_pa_s: f64,
    },
    /// Ideal gas with compressibility correction (gas and steam).
    Compressible(GasProps),
}

impl FluidProps {
    /// Density at the given state.
    pub fn density(&self, p: Pressure, t: Temperature) -> Density {
        match self {
            FluidProps::Incompressible { density_kg_m3, .. } => kg_m3(*density_kg_m3),
            FluidProps::Compressible(gas) => kg_m3(gas.density_kg_m3(p.value, t.value)),
        }
    }

    pub fn viscosity_pa_s(&self) -> f64 {
        match self {
            FluidProps::Incompressible { viscosity_pa_s, .. } => *viscosity_pa_s,
            FluidProps::Compressible(gas) => gas.viscosity_pa_s,
        }
    }

    pub fn gas(&self) -> Option<&GasProps> {
        match self {
            FluidProps::Compressible(gas) => Some(gas),
            FluidProps::Incompressible { .. } => None,
        }
    }
}
