// rn-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

/// Mass flow from kg/h, the unit relief loads are quoted in.
#[inline]
pub fn kgph(v: f64) -> MassRate {
    kgps(v / SECONDS_PER_HOUR)
}

/// Mass flow expressed in kg/h.
#[inline]
pub fn to_kgph(mdot: MassRate) -> f64 {
    mdot.value * SECONDS_PER_HOUR
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn mm2(v: f64) -> Area {
    use uom::si::area::square_millimeter;
    Area::new::<square_millimeter>(v)
}

#[inline]
pub fn to_mm2(area: Area) -> f64 {
    use uom::si::area::square_millimeter;
    area.get::<square_millimeter>()
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

/// Dynamic viscosity from centipoise (1 cP = 1 mPa·s).
#[inline]
pub fn cp(v: f64) -> DynVisc {
    pa_s(v * 1e-3)
}

#[inline]
pub fn to_cp(mu: DynVisc) -> f64 {
    mu.value * 1e3
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    /// Universal gas constant [J/(kmol·K)]
    pub const R_UNIVERSAL: f64 = 8_314.462_618;

    /// Standard atmosphere [Pa]
    pub const P_ATM_PA: f64 = 101_325.0;

    /// Water density used for liquid specific gravity in API-520 [kg/m³]
    pub const WATER_DENSITY_KG_M3: f64 = 999.0;

    #[inline]
    pub fn atmosphere() -> Pressure {
        pa(P_ATM_PA)
    }
}

/// US-customary conversions used by the API-520 sizing equations.
pub mod us {
    pub const PA_PER_PSI: f64 = 6_894.757_293_168;
    pub const KG_PER_LB: f64 = 0.453_592_37;
    pub const MM2_PER_IN2: f64 = 645.16;
    /// US gallons per minute in one m³/h
    pub const GPM_PER_M3H: f64 = 4.402_867_5;

    #[inline]
    pub fn pa_to_psi(p_pa: f64) -> f64 {
        p_pa / PA_PER_PSI
    }

    #[inline]
    pub fn psi_to_pa(p_psi: f64) -> f64 {
        p_psi * PA_PER_PSI
    }

    #[inline]
    pub fn kgph_to_lbph(w_kgph: f64) -> f64 {
        w_kgph / KG_PER_LB
    }

    #[inline]
    pub fn kelvin_to_rankine(t_k: f64) -> f64 {
        t_k * 1.8
    }

    #[inline]
    pub fn m3h_to_gpm(q_m3h: f64) -> f64 {
        q_m3h * GPM_PER_M3H
    }

    #[inline]
    pub fn in2_to_mm2(a_in2: f64) -> f64 {
        a_in2 * MM2_PER_IN2
    }

    #[inline]
    pub fn mm2_to_in2(a_mm2: f64) -> f64 {
        a_mm2 / MM2_PER_IN2
    }
}
