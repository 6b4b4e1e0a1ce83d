//! Independent chains solved in parallel.

use crate::boundary::BoundaryCondition;
use crate::network::{NetworkResult, SolverSettings};
use crate::traverse::solve_network;
use rayon::prelude::*;
use rn_components::PipeSegment;
use rn_fluids::Fluid;

/// One self-contained chain (e.g. the inlet line of one PSV).
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkCase {
    pub name: String,
    pub segments: Vec<PipeSegment>,
    pub fluid: Fluid,
    pub boundary: BoundaryCondition,
}

/// Solve every case; output order matches input order.
///
/// Each chain is sequential internally, so parallelism is across cases only.
pub fn solve_networks_parallel(
    cases: &[NetworkCase],
    settings: &SolverSettings,
) -> Vec<Option<NetworkResult>> {
    cases
        .par_iter()
        .map(|case| {
            let _span = tracing::debug_span!("network_case", case = %case.name).entered();
            solve_network(&case.segments, &case.fluid, &case.boundary, settings)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_core::units::{cp, k, kg_m3, kgph, m, mm, pa};

    #[test]
    fn parallel_matches_sequential() {
        let water = Fluid::liquid(kg_m3(998.0), cp(1.0));
        let cases: Vec<NetworkCase> = (1..=8)
            .map(|i| NetworkCase {
                name: format!("psv-{i}"),
                segments: vec![PipeSegment::new("s", "inlet", 1, mm(77.9), m(5.0 * i as f64))],
                fluid: water.clone(),
                boundary: BoundaryCondition::forward(pa(500_000.0), k(300.0), kgph(15_000.0)),
            })
            .collect();

        let settings = SolverSettings::default();
        let parallel = solve_networks_parallel(&cases, &settings);
        for (case, result) in cases.iter().zip(&parallel) {
            let sequential = solve_network(&case.segments, &case.fluid, &case.boundary, &settings);
            assert_eq!(result, &sequential);
        }
        // Longer lines lose more pressure.
        let drops: Vec<f64> = parallel
            .iter()
            .map(|r| r.as_ref().unwrap().total_pressure_drop.value)
            .collect();
        assert!(drops.windows(2).all(|w| w[1] > w[0]));
    }
}
