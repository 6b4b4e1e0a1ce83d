//! Pipe segment model and the single-segment solver.

use crate::checks::{self, EROSIONAL_C_CONTINUOUS};
use crate::common::{check_finite, circular_area, velocity_head};
use crate::error::{ComponentError, ComponentResult};
use crate::fittings::{Fitting, FittingType, total_k};
use crate::friction::{FlowRegime, friction_factor};
use crate::restriction::{ControlValve, OrificePlate};
use rn_core::numeric::ensure_positive;
use rn_core::units::constants::G0_MPS2;
use rn_core::units::{
    Density, Length, MassRate, Pressure, Temperature, Velocity, k, kg_m3, m, mm, mps, pa,
};
use rn_fluids::{FlowState, Fluid, FluidProps, GasProps};

/// Bounded number of density/temperature refinement passes for gases.
const MAX_COMPRESSIBLE_PASSES: usize = 100;

/// Relative change in the solved end state that ends the refinement.
const COMPRESSIBLE_RTOL: f64 = 1e-9;

/// Which end of a segment (or chain) carries the known state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowDirection {
    /// Inlet known; solve toward the outlet.
    #[default]
    Forward,
    /// Outlet known; solve back toward the inlet.
    Backward,
}

/// Temperature treatment for compressible segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasFlowModel {
    #[default]
    Isothermal,
    /// Stagnation temperature conserved along the segment.
    Adiabatic,
}

/// Tunables shared by every segment in a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSettings {
    pub gas_flow_model: GasFlowModel,
    /// API RP-14E erosional constant C (US-customary form)
    pub erosional_c: f64,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self {
            gas_flow_model: GasFlowModel::Isothermal,
            erosional_c: EROSIONAL_C_CONTINUOUS,
        }
    }
}

/// One straight run of pipe with its fittings and optional restrictions.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSegment {
    pub id: String,
    pub name: String,
    /// Ordered position in the chain (ascending = toward the destination)
    pub position: u32,
    /// Inner diameter
    pub diameter: Length,
    pub length: Length,
    /// Signed elevation change from inlet to outlet (positive = rise)
    pub elevation_change: Length,
    /// Absolute surface roughness
    pub roughness: Length,
    pub fittings: Vec<Fitting>,
    /// Percentage added on top of the summed fitting K values
    pub fitting_safety_factor_pct: f64,
    pub control_valve: Option<ControlValve>,
    pub orifice: Option<OrificePlate>,
    /// Fixed additional loss supplied by the user
    pub user_pressure_drop: Option<Pressure>,
    /// Per-segment direction override
    pub direction: Option<FlowDirection>,
}

impl PipeSegment {
    /// Commercial steel roughness used when none is given.
    pub const DEFAULT_ROUGHNESS_MM: f64 = 0.0457;

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: u32,
        diameter: Length,
        length: Length,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            diameter,
            length,
            elevation_change: m(0.0),
            roughness: mm(Self::DEFAULT_ROUGHNESS_MM),
            fittings: Vec::new(),
            fitting_safety_factor_pct: 0.0,
            control_valve: None,
            orifice: None,
            user_pressure_drop: None,
            direction: None,
        }
    }

    pub fn with_elevation_change(mut self, dz: Length) -> Self {
        self.elevation_change = dz;
        self
    }

    pub fn with_roughness(mut self, roughness: Length) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_fitting(mut self, kind: FittingType, count: u32) -> Self {
        self.fittings.push(Fitting::new(kind, count));
        self
    }

    pub fn with_fitting_safety_factor(mut self, pct: f64) -> Self {
        self.fitting_safety_factor_pct = pct;
        self
    }

    pub fn with_control_valve(mut self, valve: ControlValve) -> Self {
        self.control_valve = Some(valve);
        self
    }

    pub fn with_orifice(mut self, orifice: OrificePlate) -> Self {
        self.orifice = Some(orifice);
        self
    }

    pub fn with_user_pressure_drop(mut self, dp: Pressure) -> Self {
        self.user_pressure_drop = Some(dp);
        self
    }

    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Diameter must be positive; length and roughness non-negative.
    pub fn validate_geometry(&self) -> ComponentResult<()> {
        let d = self.diameter.value;
        if !d.is_finite() || d <= 0.0 {
            return Err(self.geometry_error(format!("diameter must be positive (got {d} m)")));
        }
        let l = self.length.value;
        if !l.is_finite() || l < 0.0 {
            return Err(self.geometry_error(format!("length must be non-negative (got {l} m)")));
        }
        let e = self.roughness.value;
        if !e.is_finite() || e < 0.0 {
            return Err(self.geometry_error(format!("roughness must be non-negative (got {e} m)")));
        }
        if !self.elevation_change.value.is_finite() {
            return Err(self.geometry_error("elevation change must be finite".to_string()));
        }
        Ok(())
    }

    /// Summed fitting resistance including the safety factor.
    pub fn total_k(&self) -> ComponentResult<f64> {
        total_k(&self.fittings, self.fitting_safety_factor_pct)
    }

    fn geometry_error(&self, detail: String) -> ComponentError {
        ComponentError::InvalidGeometry {
            what: format!("segment '{}': {detail}", self.name),
        }
    }
}

/// Pressure-drop contributions of one segment.
///
/// For a choked gas segment `total` is capped at the critical-ratio drop and
/// is then smaller than the sum of the other terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PressureDropBreakdown {
    /// Darcy-Weisbach pipe friction plus fitting K losses
    pub friction_fitting: Pressure,
    pub elevation: Pressure,
    pub control_valve: Pressure,
    pub orifice: Pressure,
    pub user_specified: Pressure,
    pub total: Pressure,
}

/// State at one end of a solved segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEnd {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub density: Density,
    pub velocity: Velocity,
}

/// Everything computed for one segment, reported inlet → outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentResult {
    pub segment_id: String,
    pub segment_name: String,
    pub position: u32,
    /// Direction the segment was solved in
    pub direction: FlowDirection,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub regime: FlowRegime,
    /// Velocity at the mean segment density
    pub velocity: Velocity,
    /// Highest end Mach number (zero for incompressible fluids)
    pub mach: f64,
    /// Most restrictive erosional velocity limit of the two ends
    pub erosional_velocity: Velocity,
    pub pressure_drop: PressureDropBreakdown,
    pub inlet: SegmentEnd,
    pub outlet: SegmentEnd,
    pub is_choked: bool,
    pub is_erosional: bool,
}

impl SegmentResult {
    pub fn total_drop(&self) -> Pressure {
        self.pressure_drop.total
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DropTerms {
    friction_fitting: f64,
    elevation: f64,
    control_valve: f64,
    orifice: f64,
    user: f64,
}

impl DropTerms {
    fn total(&self) -> f64 {
        self.friction_fitting + self.elevation + self.control_valve + self.orifice + self.user
    }

    fn breakdown(&self, total: f64) -> PressureDropBreakdown {
        PressureDropBreakdown {
            friction_fitting: pa(self.friction_fitting),
            elevation: pa(self.elevation),
            control_valve: pa(self.control_valve),
            orifice: pa(self.orifice),
            user_specified: pa(self.user),
            total: pa(total),
        }
    }
}

/// Flow quantities that do not depend on density.
struct Hydraulics<'a> {
    segment: &'a PipeSegment,
    mdot: f64,
    mass_flux: f64,
    friction_factor: f64,
    k_total: f64,
}

impl Hydraulics<'_> {
    fn terms(&self, rho: f64) -> ComponentResult<DropTerms> {
        let seg = self.segment;
        let d = seg.diameter.value;
        let head = velocity_head(self.mass_flux, rho);

        let friction_fitting = check_finite(
            (self.friction_factor * seg.length.value / d + self.k_total) * head,
            "friction pressure drop",
        )?;
        let elevation = rho * G0_MPS2 * seg.elevation_change.value;
        let control_valve = match seg.control_valve {
            Some(valve) => valve.pressure_drop(self.mdot, rho)?,
            None => 0.0,
        };
        let orifice = match seg.orifice {
            Some(plate) => plate.pressure_drop(self.mdot, rho, d)?,
            None => 0.0,
        };
        let user = seg.user_pressure_drop.map_or(0.0, |dp| dp.value);

        Ok(DropTerms {
            friction_fitting,
            elevation,
            control_valve,
            orifice,
            user,
        })
    }
}

/// Solve one segment from the state at its known end.
///
/// `known_pressure`/`known_temperature` describe the inlet for
/// [`FlowDirection::Forward`] and the outlet for [`FlowDirection::Backward`].
/// The result is always reported inlet → outlet with
/// `outlet.pressure = inlet.pressure − pressure_drop.total`.
pub fn solve_segment(
    segment: &PipeSegment,
    fluid: &Fluid,
    mass_flow: MassRate,
    known_pressure: Pressure,
    known_temperature: Temperature,
    direction: FlowDirection,
    settings: &SegmentSettings,
) -> ComponentResult<SegmentResult> {
    let props = fluid.validate()?;
    segment.validate_geometry()?;
    let known = FlowState::from_pt(known_pressure, known_temperature).map_err(|_| {
        ComponentError::InsufficientBoundaryData {
            what: "known pressure and temperature must be positive and finite",
        }
    })?;

    let d = segment.diameter.value;
    let mdot = mass_flow.value;
    let mass_flux = mdot / circular_area(d);
    let reynolds = mass_flux * d / props.viscosity_pa_s();
    let friction_factor = friction_factor(reynolds, segment.roughness.value / d)?;

    let hydraulics = Hydraulics {
        segment,
        mdot,
        mass_flux,
        friction_factor,
        k_total: segment.total_k()?,
    };

    let solved = match props {
        FluidProps::Incompressible { density_kg_m3, .. } => {
            solve_incompressible(&hydraulics, density_kg_m3, known, direction)?
        }
        FluidProps::Compressible(gas) => {
            solve_compressible(&hydraulics, &gas, known, direction, settings.gas_flow_model)?
        }
    };

    let end = |p: f64, t: f64, rho: f64| SegmentEnd {
        pressure: pa(p),
        temperature: k(t),
        density: kg_m3(rho),
        velocity: mps(mass_flux / rho),
    };
    let inlet = end(solved.p_in, solved.t_in, solved.rho_in);
    let outlet = end(solved.p_out, solved.t_out, solved.rho_out);

    let limit_in = checks::erosional_velocity(settings.erosional_c, solved.rho_in);
    let limit_out = checks::erosional_velocity(settings.erosional_c, solved.rho_out);
    let is_erosional =
        inlet.velocity.value > limit_in || outlet.velocity.value > limit_out;

    let mach = match props.gas() {
        Some(gas) => (inlet.velocity.value / gas.speed_of_sound(solved.t_in))
            .max(outlet.velocity.value / gas.speed_of_sound(solved.t_out)),
        None => 0.0,
    };

    Ok(SegmentResult {
        segment_id: segment.id.clone(),
        segment_name: segment.name.clone(),
        position: segment.position,
        direction,
        reynolds,
        friction_factor,
        regime: FlowRegime::from_reynolds(reynolds),
        velocity: mps(mass_flux / solved.rho_mean),
        mach,
        erosional_velocity: mps(limit_in.min(limit_out)),
        pressure_drop: solved.terms.breakdown(solved.total),
        inlet,
        outlet,
        is_choked: solved.is_choked,
        is_erosional,
    })
}

struct Solved {
    terms: DropTerms,
    total: f64,
    p_in: f64,
    p_out: f64,
    t_in: f64,
    t_out: f64,
    rho_in: f64,
    rho_out: f64,
    rho_mean: f64,
    is_choked: bool,
}

fn solve_incompressible(
    hydraulics: &Hydraulics<'_>,
    rho: f64,
    known: FlowState,
    direction: FlowDirection,
) -> ComponentResult<Solved> {
    let terms = hydraulics.terms(rho)?;
    let total = terms.total();
    let p_known = known.pressure().value;
    let t = known.temperature().value;

    let (p_in, p_out) = match direction {
        FlowDirection::Forward => (p_known, p_known - total),
        FlowDirection::Backward => (p_known + total, p_known),
    };
    ensure_positive_pressures(hydraulics.segment, p_in, p_out)?;

    Ok(Solved {
        terms,
        total,
        p_in,
        p_out,
        t_in: t,
        t_out: t,
        rho_in: rho,
        rho_out: rho,
        rho_mean: rho,
        is_choked: false,
    })
}

fn solve_compressible(
    hydraulics: &Hydraulics<'_>,
    gas: &GasProps,
    known: FlowState,
    direction: FlowDirection,
    model: GasFlowModel,
) -> ComponentResult<Solved> {
    let p_known = known.pressure().value;
    let t_known = known.temperature().value;
    let critical_ratio = gas.critical_pressure_ratio();

    let orient = |p_other: f64, t_other: f64| match direction {
        FlowDirection::Forward => (p_known, t_known, p_other, t_other),
        FlowDirection::Backward => (p_other, t_other, p_known, t_known),
    };

    let mut p_other = p_known;
    let mut t_other = t_known;
    let mut terms = DropTerms::default();
    let mut rho_mean = gas.density_kg_m3(p_known, t_known);
    let mut is_choked = false;

    for _ in 0..MAX_COMPRESSIBLE_PASSES {
        let (p_in, t_in, p_out, t_out) = orient(p_other, t_other);
        rho_mean = gas.density_kg_m3(0.5 * (p_in + p_out), 0.5 * (t_in + t_out));
        terms = hydraulics.terms(rho_mean)?;
        let raw = terms.total();

        let (cand_in, cand_out) = match direction {
            FlowDirection::Forward => (p_known, p_known - raw),
            FlowDirection::Backward => (p_known + raw, p_known),
        };
        is_choked = checks::is_choked(cand_in, cand_out, critical_ratio);
        let p_next = match (direction, is_choked) {
            (FlowDirection::Forward, true) => p_known * critical_ratio,
            (FlowDirection::Backward, true) => p_known / critical_ratio,
            (FlowDirection::Forward, false) => cand_out,
            (FlowDirection::Backward, false) => cand_in,
        };

        let t_next = match model {
            GasFlowModel::Isothermal => t_known,
            GasFlowModel::Adiabatic => {
                let v_known = hydraulics.mass_flux / gas.density_kg_m3(p_known, t_known);
                let v_other = hydraulics.mass_flux / gas.density_kg_m3(p_next, t_other);
                t_known + (v_known * v_known - v_other * v_other) / (2.0 * gas.cp())
            }
        };
        if !t_next.is_finite() || t_next <= 0.0 {
            return Err(ComponentError::NumericDomain {
                what: format!(
                    "segment '{}': adiabatic temperature fell to {t_next} K",
                    hydraulics.segment.name
                ),
            });
        }

        let converged = (p_next - p_other).abs() <= COMPRESSIBLE_RTOL * p_known
            && (t_next - t_other).abs() <= COMPRESSIBLE_RTOL * t_known;
        p_other = p_next;
        t_other = t_next;
        if converged {
            break;
        }
    }

    let (p_in, t_in, p_out, t_out) = orient(p_other, t_other);
    ensure_positive_pressures(hydraulics.segment, p_in, p_out)?;

    Ok(Solved {
        terms,
        total: p_in - p_out,
        p_in,
        p_out,
        t_in,
        t_out,
        rho_in: gas.density_kg_m3(p_in, t_in),
        rho_out: gas.density_kg_m3(p_out, t_out),
        rho_mean,
        is_choked,
    })
}

fn ensure_positive_pressures(segment: &PipeSegment, p_in: f64, p_out: f64) -> ComponentResult<()> {
    ensure_positive(p_in, "inlet pressure")
        .and_then(|_| ensure_positive(p_out, "outlet pressure"))
        .map(|_| ())
        .map_err(|e| ComponentError::NumericDomain {
            what: format!(
                "segment '{}': solved pressures are non-physical ({e}; inlet {p_in} Pa, outlet {p_out} Pa)",
                segment.name
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rn_core::units::{cp, kg_m3, kgph};

    fn water() -> Fluid {
        Fluid::liquid(kg_m3(998.0), cp(1.0))
    }

    fn nitrogen() -> Fluid {
        Fluid::gas(28.013, 1.0, 1.4, cp(0.0178))
    }

    fn line(length_m: f64) -> PipeSegment {
        PipeSegment::new("s1", "inlet line", 1, mm(102.3), m(length_m))
    }

    #[test]
    fn zero_length_segment_has_zero_drop() {
        for fluid in [water(), nitrogen()] {
            let result = solve_segment(
                &line(0.0),
                &fluid,
                kgph(20_000.0),
                pa(500_000.0),
                k(300.0),
                FlowDirection::Forward,
                &SegmentSettings::default(),
            )
            .unwrap();
            assert_eq!(result.total_drop().value, 0.0);
            assert_eq!(result.inlet.pressure, result.outlet.pressure);
        }
    }

    #[test]
    fn liquid_drop_matches_darcy_weisbach() {
        let seg = line(50.0).with_fitting(FittingType::Elbow90Standard, 2);
        let mdot = kgph(36_000.0);
        let result = solve_segment(
            &seg,
            &water(),
            mdot,
            pa(400_000.0),
            k(293.15),
            FlowDirection::Forward,
            &SegmentSettings::default(),
        )
        .unwrap();

        let d = 0.1023;
        let area = circular_area(d);
        let v = 10.0 / (998.0 * area);
        let re = 998.0 * v * d / 1e-3;
        let f = friction_factor(re, 0.0457e-3 / d).unwrap();
        let expected = (f * 50.0 / d + 1.5) * 0.5 * 998.0 * v * v;

        assert_relative_eq!(result.reynolds, re, max_relative = 1e-9);
        assert_relative_eq!(result.total_drop().value, expected, max_relative = 1e-9);
        assert_relative_eq!(result.velocity.value, v, max_relative = 1e-9);
        assert_eq!(result.regime, FlowRegime::Turbulent);
        assert!(!result.is_choked);
        assert_eq!(result.mach, 0.0);
    }

    #[test]
    fn elevation_rise_adds_hydrostatic_head() {
        let flat = line(10.0);
        let riser = line(10.0).with_elevation_change(m(5.0));
        let solve = |seg: &PipeSegment| {
            solve_segment(
                seg,
                &water(),
                kgph(10_000.0),
                pa(300_000.0),
                k(293.15),
                FlowDirection::Forward,
                &SegmentSettings::default(),
            )
            .unwrap()
        };
        let dp = solve(&riser).total_drop().value - solve(&flat).total_drop().value;
        assert_relative_eq!(dp, 998.0 * G0_MPS2 * 5.0, max_relative = 1e-9);
    }

    #[test]
    fn outlet_equals_inlet_minus_drop_in_both_directions() {
        let seg = line(30.0)
            .with_fitting(FittingType::GateValve, 1)
            .with_control_valve(ControlValve::new(400.0))
            .with_user_pressure_drop(pa(2_000.0));
        for direction in [FlowDirection::Forward, FlowDirection::Backward] {
            for fluid in [water(), nitrogen()] {
                let r = solve_segment(
                    &seg,
                    &fluid,
                    kgph(8_000.0),
                    pa(600_000.0),
                    k(310.0),
                    direction,
                    &SegmentSettings::default(),
                )
                .unwrap();
                assert_relative_eq!(
                    r.outlet.pressure.value,
                    r.inlet.pressure.value - r.total_drop().value,
                    max_relative = 1e-12
                );
                assert!(r.pressure_drop.control_valve.value > 0.0);
                assert_eq!(r.pressure_drop.user_specified.value, 2_000.0);
            }
        }
    }

    #[test]
    fn backward_solve_anchors_the_outlet() {
        let r = solve_segment(
            &line(40.0),
            &water(),
            kgph(30_000.0),
            pa(200_000.0),
            k(300.0),
            FlowDirection::Backward,
            &SegmentSettings::default(),
        )
        .unwrap();
        assert_eq!(r.outlet.pressure.value, 200_000.0);
        assert!(r.inlet.pressure.value > r.outlet.pressure.value);
    }

    #[test]
    fn gas_segment_chokes_and_caps_drop() {
        // Small-bore vent discharging a large flow: unrestricted drop would exceed P1.
        let seg = PipeSegment::new("v", "vent", 1, mm(25.0), m(30.0));
        let r = solve_segment(
            &seg,
            &nitrogen(),
            kgph(5_000.0),
            pa(1_000_000.0),
            k(300.0),
            FlowDirection::Forward,
            &SegmentSettings::default(),
        )
        .unwrap();
        assert!(r.is_choked);
        let rc = rn_fluids::critical_pressure_ratio(1.4);
        assert_relative_eq!(r.outlet.pressure.value, 1_000_000.0 * rc, max_relative = 1e-12);
        assert!(r.mach > 0.0);
    }

    #[test]
    fn adiabatic_gas_cools_as_it_accelerates() {
        let seg = line(30.0);
        let settings = SegmentSettings {
            gas_flow_model: GasFlowModel::Adiabatic,
            ..SegmentSettings::default()
        };
        let r = solve_segment(
            &seg,
            &nitrogen(),
            kgph(20_000.0),
            pa(800_000.0),
            k(300.0),
            FlowDirection::Forward,
            &settings,
        )
        .unwrap();
        assert!(!r.is_choked);
        assert!(r.outlet.temperature.value < r.inlet.temperature.value);
        assert!(r.outlet.velocity.value > r.inlet.velocity.value);
    }

    #[test]
    fn high_velocity_liquid_is_flagged_erosional() {
        let seg = PipeSegment::new("e", "small line", 1, mm(25.0), m(1.0));
        let r = solve_segment(
            &seg,
            &water(),
            kgph(20_000.0),
            pa(2_000_000.0),
            k(300.0),
            FlowDirection::Forward,
            &SegmentSettings::default(),
        )
        .unwrap();
        assert!(r.is_erosional);
        assert!(r.velocity.value > r.erosional_velocity.value);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let settings = SegmentSettings::default();
        let bad_geometry = PipeSegment::new("x", "x", 1, mm(0.0), m(1.0));
        assert!(matches!(
            solve_segment(&bad_geometry, &water(), kgph(1.0), pa(1e5), k(300.0), FlowDirection::Forward, &settings),
            Err(ComponentError::InvalidGeometry { .. })
        ));

        let missing_density = Fluid::new(rn_fluids::Phase::Liquid).with_viscosity(cp(1.0));
        assert!(matches!(
            solve_segment(&line(1.0), &missing_density, kgph(1.0), pa(1e5), k(300.0), FlowDirection::Forward, &settings),
            Err(ComponentError::InvalidFluid(_))
        ));

        assert!(matches!(
            solve_segment(&line(1.0), &water(), kgph(1.0), pa(0.0), k(300.0), FlowDirection::Forward, &settings),
            Err(ComponentError::InsufficientBoundaryData { .. })
        ));

        assert!(matches!(
            solve_segment(&line(1.0), &water(), kgph(0.0), pa(1e5), k(300.0), FlowDirection::Forward, &settings),
            Err(ComponentError::NumericDomain { .. })
        ));
    }

    #[test]
    fn liquid_drop_beyond_inlet_pressure_is_an_error() {
        let seg = PipeSegment::new("x", "long small line", 1, mm(10.0), m(500.0));
        let r = solve_segment(
            &seg,
            &water(),
            kgph(5_000.0),
            pa(150_000.0),
            k(300.0),
            FlowDirection::Forward,
            &SegmentSettings::default(),
        );
        assert!(matches!(r, Err(ComponentError::NumericDomain { .. })));
    }
}
