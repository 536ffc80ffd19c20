//! Greedy Route Builder: builds one vehicle's route in reverse, starting
//! from the hub and working outward, with optional objective-aware
//! tie-breaking and cargo-level station splitting.

use std::collections::HashSet;

use crate::distance::DistanceOracle;
use crate::model::{round2, Station, StopAssignment, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    None,
    MaxCount,
    MaxWeight,
}

/// Greedily fills `capacity` kg from `cargos`, respecting `allowed` if
/// given, after sorting by the objective's preferred order. Returns the
/// cargos taken (removed from `cargos`) and their total weight.
fn take_cargos_for_objective(
    station: &mut Station,
    remaining_capacity: f64,
    objective: Objective,
    allowed: Option<&HashSet<String>>,
) -> (Vec<crate::model::Cargo>, f64) {
    match objective {
        Objective::MaxCount => station.cargos.sort_by(|a, b| a.weight_kg.partial_cmp(&b.weight_kg).unwrap()),
        Objective::MaxWeight => station.cargos.sort_by(|a, b| b.weight_kg.partial_cmp(&a.weight_kg).unwrap()),
        Objective::None => {}
    }

    let mut taken = Vec::new();
    let mut used = 0.0;
    let mut i = 0;
    while i < station.cargos.len() {
        let c = &station.cargos[i];
        if let Some(allow) = allowed {
            if !allow.contains(&c.id) {
                i += 1;
                continue;
            }
        }
        if used + c.weight_kg <= remaining_capacity + EPSILON {
            let c = station.cargos.remove(i);
            used += c.weight_kg;
            taken.push(c);
        } else {
            i += 1;
        }
    }
    (taken, used)
}

/// Simulated benefit of greedily filling this station's (allowed) cargos
/// under the objective, without mutating anything: `(primary, secondary)`
/// where primary is count or weight depending on objective and secondary
/// is the other.
fn simulate_benefit(
    station: &Station,
    remaining_capacity: f64,
    objective: Objective,
    allowed: Option<&HashSet<String>>,
) -> (f64, f64) {
    let mut candidates: Vec<&crate::model::Cargo> = station
        .cargos
        .iter()
        .filter(|c| allowed.map_or(true, |a| a.contains(&c.id)))
        .collect();
    match objective {
        Objective::MaxCount => candidates.sort_by(|a, b| a.weight_kg.partial_cmp(&b.weight_kg).unwrap()),
        Objective::MaxWeight => candidates.sort_by(|a, b| b.weight_kg.partial_cmp(&a.weight_kg).unwrap()),
        Objective::None => {}
    }
    let mut used = 0.0;
    let mut count = 0.0;
    for c in candidates {
        if used + c.weight_kg <= remaining_capacity + EPSILON {
            used += c.weight_kg;
            count += 1.0;
        }
    }
    match objective {
        Objective::MaxCount => (count, used),
        _ => (used, count),
    }
}

/// Builds a single vehicle's route. `stations` is mutated in place:
/// assigned cargos are removed and totals refreshed, matching the spec's
/// mutation-isolation model (callers must operate on a per-candidate deep
/// copy).
pub fn greedy_route_for_vehicle(
    oracle: &DistanceOracle,
    hub_id: &str,
    stations: &mut Vec<Station>,
    capacity_kg: f64,
    objective: Objective,
    allowed_cargo_ids: Option<&HashSet<String>>,
) -> Vec<StopAssignment> {
    let mut current_pos = hub_id.to_string();
    let mut current_weight = 0.0;
    let mut route_rev: Vec<StopAssignment> = Vec::new();

    loop {
        let remaining = capacity_kg - current_weight;
        if remaining <= EPSILON {
            break;
        }

        let mut best_idx: Option<usize> = None;
        let mut best_distance = f64::INFINITY;
        let mut best_benefit = (f64::NEG_INFINITY, f64::NEG_INFINITY);

        for (idx, station) in stations.iter().enumerate() {
            let has_fitting_cargo = station.cargos.iter().any(|c| {
                allowed_cargo_ids.map_or(true, |a| a.contains(&c.id)) && c.weight_kg <= remaining + EPSILON
            });
            if !has_fitting_cargo {
                continue;
            }
            let d = oracle.distance(&current_pos, &station.info.id);

            if d < best_distance - EPSILON {
                best_idx = Some(idx);
                best_distance = d;
                if objective != Objective::None {
                    best_benefit = simulate_benefit(station, remaining, objective, allowed_cargo_ids);
                }
                continue;
            }

            // Ties only resolve by simulated benefit when an objective is
            // active; an unobjectived call keeps the first-encountered
            // minimal-distance station, matching optimizer.py's
            // `elif ... and objective_norm is not None`.
            if objective != Objective::None && (d - best_distance).abs() <= EPSILON {
                let benefit = simulate_benefit(station, remaining, objective, allowed_cargo_ids);
                if benefit.0 > best_benefit.0 + EPSILON
                    || ((benefit.0 - best_benefit.0).abs() <= EPSILON && benefit.1 > best_benefit.1)
                {
                    best_idx = Some(idx);
                    best_distance = d;
                    best_benefit = benefit;
                }
            }
        }

        let Some(idx) = best_idx else {
            break;
        };

        let (taken, used_weight) =
            take_cargos_for_objective(&mut stations[idx], remaining, objective, allowed_cargo_ids);

        if taken.is_empty() {
            stations.remove(idx);
            continue;
        }

        stations[idx].refresh_totals();
        let station_info = stations[idx].info.clone();
        current_pos = station_info.id.clone();
        current_weight += used_weight;

        route_rev.push(StopAssignment {
            station: station_info,
            cargos: taken,
            weight_kg: round2(used_weight),
        });

        if stations[idx].cargos.is_empty() {
            stations.remove(idx);
        }
    }

    route_rev.reverse();
    route_rev
}
