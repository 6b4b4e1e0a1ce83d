//! Property tests for the segment solver.

use proptest::prelude::*;
use rn_components::{
    FittingType, FlowDirection, FlowRegime, OrificePlate, PipeSegment, SegmentSettings,
    solve_segment,
};
use rn_core::units::{cp, k, kg_m3, kgph, m, mm, pa};
use rn_fluids::Fluid;

fn crude_oil() -> Fluid {
    Fluid::liquid(kg_m3(870.0), cp(12.0))
}

fn methane() -> Fluid {
    Fluid::gas(16.04, 0.98, 1.31, cp(0.011))
}

fn header() -> PipeSegment {
    PipeSegment::new("H1", "header", 1, mm(154.1), m(25.0))
        .with_fitting(FittingType::Elbow90Standard, 3)
        .with_fitting(FittingType::TeeThrough, 1)
        .with_elevation_change(m(2.0))
}

fn drop_pa(fluid: &Fluid, seg: &PipeSegment, flow_kgph: f64) -> f64 {
    solve_segment(
        seg,
        fluid,
        kgph(flow_kgph),
        pa(1_500_000.0),
        k(320.0),
        FlowDirection::Forward,
        &SegmentSettings::default(),
    )
    .unwrap()
    .total_drop()
    .value
}

proptest! {
    #[test]
    fn liquid_drop_is_monotone_in_flow(w in 500.0f64..80_000.0, extra in 1.0f64..20_000.0) {
        let seg = header();
        let low = drop_pa(&crude_oil(), &seg, w);
        let high = drop_pa(&crude_oil(), &seg, w + extra);
        prop_assert!(high >= low);
    }

    #[test]
    fn gas_drop_is_monotone_in_flow(w in 500.0f64..30_000.0, extra in 1.0f64..5_000.0) {
        let seg = header();
        let low = drop_pa(&methane(), &seg, w);
        let high = drop_pa(&methane(), &seg, w + extra);
        prop_assert!(high >= low);
    }

    #[test]
    fn forward_then_backward_recovers_inlet(w in 1_000.0f64..30_000.0, p_in in 400_000.0f64..3_000_000.0) {
        let seg = header().with_orifice(OrificePlate::new(mm(110.0)));
        let settings = SegmentSettings::default();
        for fluid in [crude_oil(), methane()] {
            let fwd = solve_segment(&seg, &fluid, kgph(w), pa(p_in), k(320.0), FlowDirection::Forward, &settings).unwrap();
            prop_assume!(!fwd.is_choked);
            let back = solve_segment(
                &seg,
                &fluid,
                kgph(w),
                fwd.outlet.pressure,
                fwd.outlet.temperature,
                FlowDirection::Backward,
                &settings,
            )
            .unwrap();
            prop_assert!((back.inlet.pressure.value - p_in).abs() <= 1e-6 * p_in);
        }
    }
}

#[test]
fn laminar_friction_drop_is_linear_in_flow() {
    // Heavy oil in a small line stays well below Re = 2300.
    let oil = Fluid::liquid(kg_m3(950.0), cp(500.0));
    let seg = PipeSegment::new("L", "lube line", 1, mm(52.5), m(10.0));
    let solve = |w: f64| {
        solve_segment(
            &seg,
            &oil,
            kgph(w),
            pa(800_000.0),
            k(330.0),
            FlowDirection::Forward,
            &SegmentSettings::default(),
        )
        .unwrap()
    };

    let one = solve(2_000.0);
    let two = solve(4_000.0);
    assert_eq!(one.regime, FlowRegime::Laminar);
    assert_eq!(two.regime, FlowRegime::Laminar);
    assert!((one.friction_factor - 64.0 / one.reynolds).abs() < 1e-12);

    let ratio = two.pressure_drop.friction_fitting.value / one.pressure_drop.friction_fitting.value;
    assert!((ratio - 2.0).abs() < 1e-9);
}

#[test]
fn choke_ratio_for_k_one_point_four() {
    // P2/P1 would fall to ~0.4 without the cap; the solver must stop at r_c.
    let air = Fluid::gas(28.96, 1.0, 1.4, cp(0.018));
    let seg = PipeSegment::new("T", "tailpipe", 1, mm(40.9), m(15.0));
    let r = solve_segment(
        &seg,
        &air,
        kgph(9_000.0),
        pa(900_000.0),
        k(300.0),
        FlowDirection::Forward,
        &SegmentSettings::default(),
    )
    .unwrap();

    assert!(r.is_choked);
    let ratio = r.outlet.pressure.value / r.inlet.pressure.value;
    assert!((ratio - 0.528).abs() < 1e-3);
}
