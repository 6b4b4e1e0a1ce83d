//! Case file migration.

use crate::ProjectError;
use crate::schema::Case;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut case: Case) -> Result<Case, ProjectError> {
    while case.version < LATEST_VERSION {
        case = migrate_one_version(case)?;
    }
    Ok(case)
}

fn migrate_one_version(case: Case) -> Result<Case, ProjectError> {
    match case.version {
        1 => migrate_v1_to_v2(case),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 1 files may omit `position`. Unpositioned segments are numbered
/// in list order after the largest explicit position, so explicitly placed
/// segments keep their place ahead of them.
fn migrate_v1_to_v2(mut case: Case) -> Result<Case, ProjectError> {
    let taken: Vec<u32> = case.segments.iter().filter_map(|s| s.position).collect();
    let mut next = taken.iter().copied().max().unwrap_or(0);
    for segment in &mut case.segments {
        if segment.position.is_none() {
            next += 1;
            segment.position = Some(next);
        }
    }
    case.version = 2;
    Ok(case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn v1_case() -> Case {
        let seg = |id: &str, position: Option<u32>| SegmentDef {
            id: id.to_string(),
            name: id.to_uppercase(),
            position,
            diameter_m: 0.1,
            length_m: 5.0,
            elevation_change_m: 0.0,
            roughness_m: None,
            fittings: vec![],
            fitting_safety_factor_pct: 0.0,
            control_valve: None,
            orifice: None,
            user_pressure_drop_pa: None,
            direction: None,
        };
        Case {
            version: 1,
            name: "legacy".into(),
            fluid: FluidDef {
                phase: PhaseDef::Liquid,
                density_kg_m3: Some(998.0),
                viscosity_cp: Some(1.0),
                molecular_weight: None,
                compressibility_z: None,
                specific_heat_ratio: None,
            },
            segments: vec![seg("a", None), seg("b", Some(5)), seg("c", None)],
            boundary: BoundaryDef {
                pressure_pa: 500_000.0,
                temperature_k: 300.0,
                mass_flow_kg_per_h: 10_000.0,
                direction: DirectionDef::Forward,
            },
            psv: None,
            settings: SettingsDef::default(),
        }
    }

    #[test]
    fn v1_unpositioned_segments_follow_explicit_ones() {
        let case = migrate_to_latest(v1_case()).unwrap();
        assert_eq!(case.version, LATEST_VERSION);
        let positions: Vec<_> = case.segments.iter().map(|s| s.position).collect();
        assert_eq!(positions, [Some(6), Some(5), Some(7)]);

        let mut order: Vec<_> = case.segments.iter().collect();
        order.sort_by_key(|s| s.position);
        let ids: Vec<&str> = order.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn v1_without_positions_keeps_list_order() {
        let mut case = v1_case();
        case.segments[1].position = None;
        let case = migrate_to_latest(case).unwrap();
        let positions: Vec<_> = case.segments.iter().map(|s| s.position).collect();
        assert_eq!(positions, [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn version_zero_has_no_path() {
        let mut case = v1_case();
        case.version = 0;
        assert!(matches!(
            migrate_to_latest(case),
            Err(ProjectError::Migration { .. })
        ));
    }
}
