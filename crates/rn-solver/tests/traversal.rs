//! Integration tests for chain traversal in both directions.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rn_components::{FittingType, GasFlowModel, PipeSegment, SegmentSettings};
use rn_core::units::{cp, k, kg_m3, kgph, m, mm, pa};
use rn_fluids::Fluid;
use rn_solver::{
    BoundaryCondition, FlowDirection, NetworkWarning, SolverSettings, try_solve_network,
};

fn inlet_line() -> Vec<PipeSegment> {
    vec![
        PipeSegment::new("nozzle", "Vessel nozzle", 1, mm(154.1), m(1.5))
            .with_fitting(FittingType::PipeEntrance, 1),
        PipeSegment::new("riser", "Riser", 2, mm(102.3), m(8.0))
            .with_elevation_change(m(4.0))
            .with_fitting(FittingType::Elbow90LongRadius, 2),
        PipeSegment::new("spool", "PSV spool", 3, mm(102.3), m(2.0))
            .with_fitting(FittingType::GateValve, 1)
            .with_fitting_safety_factor(10.0),
    ]
}

fn propane_liquid() -> Fluid {
    Fluid::liquid(kg_m3(493.0), cp(0.1))
}

fn natural_gas() -> Fluid {
    Fluid::gas(18.2, 0.92, 1.27, cp(0.012))
}

#[test]
fn forward_then_backward_reproduces_inlet_pressure() {
    let settings = SolverSettings::default();
    for fluid in [propane_liquid(), natural_gas()] {
        let p_in = pa(1_800_000.0);
        let fwd = BoundaryCondition::forward(p_in, k(318.0), kgph(45_000.0));
        let forward = try_solve_network(&inlet_line(), &fluid, &fwd, &settings).unwrap();
        assert!(!forward.has_choked_flow);

        let outlet = forward.outlet().unwrap();
        let bwd = BoundaryCondition::backward(outlet.pressure, outlet.temperature, kgph(45_000.0));
        let backward = try_solve_network(&inlet_line(), &fluid, &bwd, &settings).unwrap();

        let recovered = backward.inlet().unwrap().pressure.value;
        assert_relative_eq!(recovered, p_in.value, max_relative = 1e-6);
        assert_relative_eq!(
            backward.total_pressure_drop.value,
            forward.total_pressure_drop.value,
            max_relative = 1e-5
        );
    }
}

#[test]
fn backward_results_read_source_to_destination() {
    let bc = BoundaryCondition::backward(pa(250_000.0), k(300.0), kgph(60_000.0));
    let r = try_solve_network(&inlet_line(), &propane_liquid(), &bc, &SolverSettings::default())
        .unwrap();

    let ids: Vec<&str> = r.segments.iter().map(|s| s.segment_id.as_str()).collect();
    assert_eq!(ids, ["nozzle", "riser", "spool"]);
    assert_eq!(r.outlet().unwrap().pressure.value, 250_000.0);
    for s in &r.segments {
        assert!(s.inlet.pressure >= s.outlet.pressure);
        assert_eq!(s.direction, FlowDirection::Backward);
    }
    // Adjacent segments share the chained state.
    for pair in r.segments.windows(2) {
        assert_eq!(pair[0].outlet.pressure, pair[1].inlet.pressure);
        assert_eq!(pair[0].outlet.temperature, pair[1].inlet.temperature);
    }
}

#[test]
fn total_drop_is_sum_of_segment_drops() {
    let bc = BoundaryCondition::forward(pa(1_200_000.0), k(300.0), kgph(30_000.0));
    let r = try_solve_network(&inlet_line(), &natural_gas(), &bc, &SolverSettings::default())
        .unwrap();
    let summed: f64 = r.segments.iter().map(|s| s.total_drop().value).sum();
    assert_relative_eq!(r.total_pressure_drop.value, summed, max_relative = 1e-12);
    let endpoints = r.inlet().unwrap().pressure.value - r.outlet().unwrap().pressure.value;
    assert_relative_eq!(r.total_pressure_drop.value, endpoints, max_relative = 1e-9);
    assert!(
        !r.warnings
            .iter()
            .any(|w| matches!(w, NetworkWarning::ChainDiscrepancy { .. }))
    );
}

#[test]
fn choked_segments_are_named_in_warnings() {
    let segments = vec![
        PipeSegment::new("header", "Header", 1, mm(202.7), m(10.0)),
        PipeSegment::new("tail", "Tailpipe", 2, mm(26.6), m(20.0)),
    ];
    let air = Fluid::gas(28.96, 1.0, 1.4, cp(0.018));
    let bc = BoundaryCondition::forward(pa(1_000_000.0), k(300.0), kgph(6_000.0));
    let r = try_solve_network(&segments, &air, &bc, &SolverSettings::default()).unwrap();

    assert!(r.has_choked_flow);
    assert!(r.warnings.contains(&NetworkWarning::ChokedFlow {
        segment: "Tailpipe".to_string()
    }));
    assert_eq!(r.choked_segments().count(), 1);
}

#[test]
fn adiabatic_temperature_is_chained() {
    let settings = SolverSettings {
        segment: SegmentSettings {
            gas_flow_model: GasFlowModel::Adiabatic,
            ..SegmentSettings::default()
        },
        ..SolverSettings::default()
    };
    let bc = BoundaryCondition::forward(pa(900_000.0), k(330.0), kgph(25_000.0));
    let r = try_solve_network(&inlet_line(), &natural_gas(), &bc, &settings).unwrap();

    assert_eq!(r.inlet().unwrap().temperature.value, 330.0);
    for pair in r.segments.windows(2) {
        assert_eq!(pair[0].outlet.temperature, pair[1].inlet.temperature);
    }
    assert!(r.outlet().unwrap().temperature.value < 330.0);
}

proptest! {
    #[test]
    fn network_drop_is_monotone_in_flow(w in 1_000.0f64..60_000.0, extra in 10.0f64..10_000.0) {
        let settings = SolverSettings::default();
        let solve = |flow: f64| {
            let bc = BoundaryCondition::forward(pa(2_000_000.0), k(300.0), kgph(flow));
            try_solve_network(&inlet_line(), &propane_liquid(), &bc, &settings)
                .unwrap()
                .total_pressure_drop
                .value
        };
        prop_assert!(solve(w + extra) >= solve(w));
    }
}
