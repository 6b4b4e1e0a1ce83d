//! Sizing monotonicity and the inlet-line compliance path.

use proptest::prelude::*;
use rn_components::{FittingType, PipeSegment};
use rn_core::units::{constants::atmosphere, cp, k, kg_m3, kgph, kpa, m, mm};
use rn_fluids::{Fluid, critical_pressure_ratio};
use rn_sizing::{
    Severity, SizingInputs, SizingMethod, relieving_pressure, size_orifice, validate_psv,
};
use rn_solver::{BoundaryCondition, SolverSettings, try_solve_network};

fn hexane() -> Fluid {
    Fluid::liquid(kg_m3(655.0), cp(0.3))
}

fn heavy_oil() -> Fluid {
    Fluid::liquid(kg_m3(900.0), cp(5_000.0))
}

fn ethylene() -> Fluid {
    Fluid::gas(28.05, 0.9, 1.24, cp(0.011))
}

fn area(fluid: Fluid, method: SizingMethod, w: f64, p1: f64, p2: f64) -> f64 {
    let inputs = SizingInputs::new(kgph(w), kpa(p1), kpa(p2), k(310.0), fluid);
    size_orifice(&inputs, method).unwrap().required_area_mm2()
}

proptest! {
    #[test]
    fn gas_area_increases_with_flow(w in 100.0f64..200_000.0, extra in 1.0f64..10_000.0) {
        let a = area(ethylene(), SizingMethod::Gas, w, 1_500.0, 300.0);
        let b = area(ethylene(), SizingMethod::Gas, w + extra, 1_500.0, 300.0);
        prop_assert!(b > a);
    }

    #[test]
    fn liquid_area_increases_with_flow(w in 1_000.0f64..400_000.0, extra in 10.0f64..20_000.0) {
        let a = area(hexane(), SizingMethod::Liquid, w, 1_200.0, 150.0);
        let b = area(hexane(), SizingMethod::Liquid, w + extra, 1_200.0, 150.0);
        prop_assert!(b >= a);
    }

    #[test]
    fn viscous_liquid_area_increases_with_flow(w in 50.0f64..50_000.0, extra in 1.0f64..5_000.0) {
        let a = area(heavy_oil(), SizingMethod::Liquid, w, 1_000.0, 101.3);
        let b = area(heavy_oil(), SizingMethod::Liquid, w + extra, 1_000.0, 101.3);
        prop_assert!(b >= a);
    }

    #[test]
    fn gas_area_falls_as_back_pressure_falls(p2 in 110.0f64..1_400.0, drop in 1.0f64..100.0) {
        let high_bp = area(ethylene(), SizingMethod::Gas, 20_000.0, 1_500.0, p2);
        let low_bp = area(ethylene(), SizingMethod::Gas, 20_000.0, 1_500.0, p2 - drop);
        prop_assert!(low_bp <= high_bp);
    }

    #[test]
    fn liquid_area_falls_as_differential_grows(p2 in 110.0f64..1_100.0, drop in 1.0f64..100.0) {
        let small_dp = area(hexane(), SizingMethod::Liquid, 50_000.0, 1_200.0, p2);
        let large_dp = area(hexane(), SizingMethod::Liquid, 50_000.0, 1_200.0, p2 - drop);
        prop_assert!(large_dp <= small_dp);
    }
}

#[test]
fn ratio_below_choke_selects_critical_equation() {
    let air = Fluid::gas(28.96, 1.0, 1.4, cp(0.018));
    assert!((critical_pressure_ratio(1.4) - 0.528).abs() < 1e-3);

    let critical = area(air.clone(), SizingMethod::Gas, 10_000.0, 1_000.0, 400.0);
    // Below the choke ratio back pressure has no effect on the area.
    let deeper = area(air, SizingMethod::Gas, 10_000.0, 1_000.0, 200.0);
    assert_eq!(critical, deeper);
}

#[test]
fn inlet_line_feeds_compliance() {
    let set = kpa(1_000.0);
    let p1 = relieving_pressure(set, 10.0, atmosphere()).unwrap();
    let line = vec![
        PipeSegment::new("n1", "Nozzle", 1, mm(102.3), m(1.0))
            .with_fitting(FittingType::PipeEntrance, 1),
        PipeSegment::new("s1", "Spool", 2, mm(102.3), m(3.0))
            .with_fitting(FittingType::Elbow90LongRadius, 1),
    ];
    let bc = BoundaryCondition::forward(p1, k(310.0), kgph(30_000.0));
    let network = try_solve_network(&line, &hexane(), &bc, &SolverSettings::default()).unwrap();

    let check = validate_psv(&network, set).unwrap();
    let expected = network.total_pressure_drop.value / set.value * 100.0;
    assert!((check.percent - expected).abs() < 1e-12);
    assert_eq!(check.severity, Severity::from_inlet_percent(expected));
}
