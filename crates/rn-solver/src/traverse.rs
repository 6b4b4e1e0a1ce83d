//! Directional traversal of an ordered segment chain.
//!
//! Chaining rule: every segment's own solved state is authoritative. The
//! external boundary fixes only the anchor end; each further segment starts
//! from the state its neighbour solved for. The summed drop is cross-checked
//! against the chain endpoints and any mismatch is reported, never silently
//! resolved.

use crate::boundary::BoundaryCondition;
use crate::error::{SolverError, SolverResult};
use crate::network::{NetworkResult, NetworkWarning, PressureDropEstimate, SolverSettings};
use rn_components::{FlowDirection, PipeSegment, solve_segment};
use rn_core::units::{Length, Pressure, m, pa};
use rn_fluids::Fluid;
use tracing::{debug, info, warn};

/// Solve the chain, reporting why a physics solve was impossible.
pub fn try_solve_network(
    segments: &[PipeSegment],
    fluid: &Fluid,
    boundary: &BoundaryCondition,
    settings: &SolverSettings,
) -> SolverResult<NetworkResult> {
    fluid.validate()?;
    boundary.validate()?;

    let direction = boundary.direction;
    if segments.is_empty() {
        debug!("empty network, zero pressure drop");
        return Ok(NetworkResult::empty(direction));
    }

    let mut ordered: Vec<&PipeSegment> = segments.iter().collect();
    ordered.sort_by_key(|seg| seg.position);
    if direction == FlowDirection::Backward {
        ordered.reverse();
    }

    let mut warnings = Vec::new();
    let mut results = Vec::with_capacity(ordered.len());
    let mut pressure = boundary.pressure;
    let mut temperature = boundary.temperature;

    for seg in ordered {
        match seg.direction {
            Some(requested) if requested != direction => {
                warnings.push(NetworkWarning::DirectionOverrideIgnored {
                    segment: seg.name.clone(),
                    requested,
                });
            }
            _ => {}
        }

        let result = solve_segment(
            seg,
            fluid,
            boundary.mass_flow_rate,
            pressure,
            temperature,
            direction,
            &settings.segment,
        )
        .map_err(|source| SolverError::Segment {
            segment: seg.name.clone(),
            source,
        })?;

        debug!(
            segment = %seg.name,
            inlet_pa = result.inlet.pressure.value,
            outlet_pa = result.outlet.pressure.value,
            reynolds = result.reynolds,
            "segment solved"
        );

        let next = match direction {
            FlowDirection::Forward => &result.outlet,
            FlowDirection::Backward => &result.inlet,
        };
        pressure = next.pressure;
        temperature = next.temperature;
        results.push(result);
    }

    if direction == FlowDirection::Backward {
        results.reverse();
    }

    for r in &results {
        if r.is_choked {
            warn!(segment = %r.segment_name, "choked flow, pressure drop capped at critical ratio");
            warnings.push(NetworkWarning::ChokedFlow {
                segment: r.segment_name.clone(),
            });
        }
        if r.is_erosional {
            warn!(
                segment = %r.segment_name,
                velocity = r.velocity.value,
                limit = r.erosional_velocity.value,
                "erosional velocity exceeded"
            );
            warnings.push(NetworkWarning::ErosionalVelocity {
                segment: r.segment_name.clone(),
            });
        }
    }

    // Chaining copies each solved end state, so only rounding can trip this.
    let summed: f64 = results.iter().map(|r| r.total_drop().value).sum();
    if let (Some(first), Some(last)) = (results.first(), results.last()) {
        let endpoint_difference = first.inlet.pressure.value - last.outlet.pressure.value;
        if (summed - endpoint_difference).abs() > settings.chain_tolerance_pa {
            warn!(summed, endpoint_difference, "chain pressure bookkeeping mismatch");
            warnings.push(NetworkWarning::ChainDiscrepancy {
                summed: pa(summed),
                endpoint_difference: pa(endpoint_difference),
            });
        }
    }

    let has_choked_flow = results.iter().any(|r| r.is_choked);
    let has_erosional_velocity = results.iter().any(|r| r.is_erosional);
    info!(
        segments = results.len(),
        direction = ?direction,
        total_drop_pa = summed,
        choked = has_choked_flow,
        "network solved"
    );

    Ok(NetworkResult {
        direction,
        total_pressure_drop: pa(summed),
        segments: results,
        has_choked_flow,
        has_erosional_velocity,
        warnings,
    })
}

/// Solve the chain, or `None` when a physics solve is impossible.
///
/// The caller is expected to substitute a coarse estimate; see
/// [`estimate_network`] for a wrapper that keeps the two apart.
pub fn solve_network(
    segments: &[PipeSegment],
    fluid: &Fluid,
    boundary: &BoundaryCondition,
    settings: &SolverSettings,
) -> Option<NetworkResult> {
    match try_solve_network(segments, fluid, boundary, settings) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!(error = %e, "network physics solve unavailable");
            None
        }
    }
}

/// Coarse drop estimate: total length × `pa_per_m`.
pub fn linear_fallback(segments: &[PipeSegment], pa_per_m: f64) -> (Pressure, Length) {
    let total_length: f64 = segments
        .iter()
        .map(|s| s.length.value)
        .filter(|l| l.is_finite() && *l > 0.0)
        .sum();
    (pa(total_length * pa_per_m), m(total_length))
}

/// Physics solve when possible, otherwise the labelled linear fallback.
pub fn estimate_network(
    segments: &[PipeSegment],
    fluid: &Fluid,
    boundary: &BoundaryCondition,
    settings: &SolverSettings,
) -> PressureDropEstimate {
    match try_solve_network(segments, fluid, boundary, settings) {
        Ok(result) => PressureDropEstimate::Solved(result),
        Err(e) => {
            let (pressure_drop, total_length) =
                linear_fallback(segments, settings.fallback_pa_per_m);
            warn!(
                error = %e,
                fallback_pa = pressure_drop.value,
                "using linear fallback pressure drop"
            );
            PressureDropEstimate::LinearFallback {
                pressure_drop,
                total_length,
                reason: e.to_string(),
            }
        }
    }
}
