//! Network-level results, warnings and settings.

use rn_components::{FlowDirection, SegmentEnd, SegmentResult, SegmentSettings};
use rn_core::units::{Length, Pressure, pa};
use std::fmt;

/// Settings for a chain solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub segment: SegmentSettings,
    /// Coarse estimate used when a physics solve is impossible [Pa/m]
    pub fallback_pa_per_m: f64,
    /// Allowed mismatch between summed drops and the endpoint difference [Pa]
    pub chain_tolerance_pa: f64,
}

impl SolverSettings {
    pub const DEFAULT_FALLBACK_PA_PER_M: f64 = 100.0;
    pub const DEFAULT_CHAIN_TOLERANCE_PA: f64 = 1.0;
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            segment: SegmentSettings::default(),
            fallback_pa_per_m: Self::DEFAULT_FALLBACK_PA_PER_M,
            chain_tolerance_pa: Self::DEFAULT_CHAIN_TOLERANCE_PA,
        }
    }
}

/// Non-fatal conditions surfaced with a network result.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkWarning {
    /// Gas reached the critical pressure ratio; the drop was capped.
    ChokedFlow { segment: String },
    /// Velocity above the API RP-14E erosional limit.
    ErosionalVelocity { segment: String },
    /// No segments: zero drop.
    EmptyNetwork,
    /// Segment carries a direction differing from the chain anchor.
    DirectionOverrideIgnored {
        segment: String,
        requested: FlowDirection,
    },
    /// Summed segment drops disagree with the chain endpoint difference.
    ChainDiscrepancy {
        summed: Pressure,
        endpoint_difference: Pressure,
    },
}

impl fmt::Display for NetworkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkWarning::ChokedFlow { segment } => {
                write!(f, "choked flow in segment '{segment}'")
            }
            NetworkWarning::ErosionalVelocity { segment } => {
                write!(f, "erosional velocity exceeded in segment '{segment}'")
            }
            NetworkWarning::EmptyNetwork => write!(f, "network has no segments; drop is zero"),
            NetworkWarning::DirectionOverrideIgnored { segment, requested } => write!(
                f,
                "segment '{segment}' requests {requested:?} flow; chain anchor direction used"
            ),
            NetworkWarning::ChainDiscrepancy {
                summed,
                endpoint_difference,
            } => write!(
                f,
                "summed segment drops ({:.1} Pa) differ from chain endpoint difference ({:.1} Pa)",
                summed.value, endpoint_difference.value
            ),
        }
    }
}

/// Result of a full physics solve of a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResult {
    pub direction: FlowDirection,
    /// Sum of the segment total drops
    pub total_pressure_drop: Pressure,
    /// Per-segment results in display order (source → destination)
    pub segments: Vec<SegmentResult>,
    pub has_choked_flow: bool,
    pub has_erosional_velocity: bool,
    pub warnings: Vec<NetworkWarning>,
}

impl NetworkResult {
    pub(crate) fn empty(direction: FlowDirection) -> Self {
        Self {
            direction,
            total_pressure_drop: pa(0.0),
            segments: Vec::new(),
            has_choked_flow: false,
            has_erosional_velocity: false,
            warnings: vec![NetworkWarning::EmptyNetwork],
        }
    }

    /// State entering the first segment.
    pub fn inlet(&self) -> Option<&SegmentEnd> {
        self.segments.first().map(|s| &s.inlet)
    }

    /// State leaving the last segment.
    pub fn outlet(&self) -> Option<&SegmentEnd> {
        self.segments.last().map(|s| &s.outlet)
    }

    pub fn choked_segments(&self) -> impl Iterator<Item = &SegmentResult> + '_ {
        self.segments.iter().filter(|s| s.is_choked)
    }
}

/// Either a real chain solve or the coarse linear stand-in.
#[derive(Debug, Clone, PartialEq)]
pub enum PressureDropEstimate {
    Solved(NetworkResult),
    /// `Σ length × fallback_pa_per_m`; no physics behind it.
    LinearFallback {
        pressure_drop: Pressure,
        total_length: Length,
        reason: String,
    },
}

impl PressureDropEstimate {
    pub fn pressure_drop(&self) -> Pressure {
        match self {
            PressureDropEstimate::Solved(result) => result.total_pressure_drop,
            PressureDropEstimate::LinearFallback { pressure_drop, .. } => *pressure_drop,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PressureDropEstimate::LinearFallback { .. })
    }

    pub fn solved(&self) -> Option<&NetworkResult> {
        match self {
            PressureDropEstimate::Solved(result) => Some(result),
            PressureDropEstimate::LinearFallback { .. } => None,
        }
    }
}
