//! Fleet Search: enumerates vehicle scenarios and keeps the best
//! candidate under the active problem's comparator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::{
    candidate_from_routes, limited_max_count_beats, limited_max_weight_beats, unlimited_beats, CandidateSolution,
};
use crate::distance::DistanceOracle;
use crate::greedy::Objective;
use crate::hashing::stable_seed;
use crate::model::{Parameters, Station, Vehicle};
use crate::strategies::{build_binpack, build_cluster, build_pack, build_sequential};

pub const ATTEMPTS_PER_SCENARIO_UNLIMITED: usize = 8;
pub const ATTEMPTS_PER_SCENARIO_LIMITED: usize = 6;
pub const MAX_EXTRA_RENTALS: u32 = 100;

/// Every non-empty subset of `vehicles` as a bitmask walk; the empty
/// fleet (`vehicles` empty) yields a single empty subset so the caller
/// can still explore rental-only scenarios.
fn owned_subsets(vehicles: &[Vehicle]) -> Vec<Vec<Vehicle>> {
    if vehicles.is_empty() {
        return vec![Vec::new()];
    }
    let n = vehicles.len();
    let mut subsets = Vec::with_capacity((1usize << n) - 1);
    for mask in 1..(1u32 << n) {
        let mut subset = Vec::new();
        for (i, v) in vehicles.iter().enumerate() {
            if mask & (1 << i) != 0 {
                subset.push(v.clone());
            }
        }
        subsets.push(subset);
    }
    subsets
}

fn synth_rental(params: &Parameters) -> Vehicle {
    Vehicle {
        id: format!("rental-{}", uuid::Uuid::new_v4()),
        name: "Rented Vehicle".to_string(),
        capacity_kg: params.rental_capacity_kg,
        is_rented: true,
        rental_cost: params.rental_cost,
    }
}

/// Runs `cluster`, `binpack` and `sequential` once each (all three, not a
/// random pick — that's the limited variant's behavior) and returns the
/// best *feasible* candidate among them, or `None` if none covered every
/// cargo.
fn best_feasible_of_three(
    oracle: &DistanceOracle,
    hub_id: &str,
    stations: &[Station],
    pool: &[Vehicle],
    cost_per_km: f64,
    total_cargo_count: usize,
    seed: u64,
) -> Option<CandidateSolution> {
    let mut rng = StdRng::seed_from_u64(seed);
    let owned_used = pool.iter().filter(|v| !v.is_rented).count();
    let rented_used = pool.iter().filter(|v| v.is_rented).count();

    let (cluster_assignments, cluster_leftover) = build_cluster(oracle, hub_id, stations.to_vec(), pool, Objective::None, &mut rng);
    let cluster = candidate_from_routes(
        oracle, hub_id, cost_per_km, cluster_assignments, cluster_leftover, "cluster", owned_used, rented_used, None,
    );

    let (binpack_assignments, binpack_leftover) = build_binpack(oracle, hub_id, stations.to_vec(), pool, Objective::None);
    let binpack = candidate_from_routes(
        oracle, hub_id, cost_per_km, binpack_assignments, binpack_leftover, "binpack", owned_used, rented_used, None,
    );

    let (sequential_assignments, sequential_leftover) = build_sequential(oracle, hub_id, stations.to_vec(), pool, Objective::None);
    let sequential = candidate_from_routes(
        oracle, hub_id, cost_per_km, sequential_assignments, sequential_leftover, "sequential", owned_used, rented_used, None,
    );

    [cluster, binpack, sequential]
        .into_iter()
        .filter(|c| c.is_fully_feasible(total_cargo_count))
        .fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(b) => {
                if unlimited_beats(&candidate, &b) {
                    Some(candidate)
                } else {
                    Some(b)
                }
            }
        })
}

pub enum UnlimitedOutcome {
    Solved(CandidateSolution),
    Infeasible,
}

/// Unlimited variant: every cargo must end up assigned, synthesizing
/// rental vehicles as needed. See section 4.6.
pub fn solve_unlimited(
    oracle: &DistanceOracle,
    hub_id: &str,
    plan_date: &str,
    stations: &[Station],
    owned_vehicles: &[Vehicle],
    params: &Parameters,
) -> UnlimitedOutcome {
    let total_cargo_count: usize = stations.iter().map(|s| s.cargos.len()).sum();
    let total_weight: f64 = stations.iter().map(|s| s.weight_kg).sum();

    let mut best: Option<CandidateSolution> = None;

    for subset in owned_subsets(owned_vehicles) {
        let owned_capacity: f64 = subset.iter().map(|v| v.capacity_kg).sum();
        let deficit = (total_weight - owned_capacity).max(0.0);
        let min_rentals: u32 = if deficit <= f64::EPSILON {
            0
        } else if params.rental_capacity_kg > f64::EPSILON {
            (deficit / params.rental_capacity_kg).ceil() as u32
        } else {
            u32::MAX
        };
        if min_rentals == u32::MAX {
            continue;
        }

        let mut found_for_subset = false;
        for extra in 0..=MAX_EXTRA_RENTALS {
            let rental_count = min_rentals + extra;
            let mut pool = subset.clone();
            for _ in 0..rental_count {
                pool.push(synth_rental(params));
            }

            for attempt in 0..ATTEMPTS_PER_SCENARIO_UNLIMITED {
                let seed = stable_seed(&[
                    plan_date,
                    "unlimited",
                    &subset.len().to_string(),
                    &rental_count.to_string(),
                    &attempt.to_string(),
                ]);
                if let Some(candidate) = best_feasible_of_three(
                    oracle, hub_id, stations, &pool, params.cost_per_km, total_cargo_count, seed,
                ) {
                    found_for_subset = true;
                    best = match best {
                        None => Some(candidate),
                        Some(b) => {
                            if unlimited_beats(&candidate, &b) {
                                Some(candidate)
                            } else {
                                Some(b)
                            }
                        }
                    };
                }
            }

            if found_for_subset {
                break;
            }
        }
    }

    match best {
        Some(c) => UnlimitedOutcome::Solved(c),
        None => UnlimitedOutcome::Infeasible,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitedObjective {
    MaxCount,
    MaxWeight,
}

pub enum LimitedOutcome {
    Solved(CandidateSolution),
    NoVehicles,
    Infeasible,
}

/// Limited variant: owned vehicles only, cargos may be left unassigned.
/// See section 4.6.
pub fn solve_limited(
    oracle: &DistanceOracle,
    hub_id: &str,
    plan_date: &str,
    stations: &[Station],
    owned_vehicles: &[Vehicle],
    params: &Parameters,
    objective: LimitedObjective,
) -> LimitedOutcome {
    if owned_vehicles.is_empty() {
        return LimitedOutcome::NoVehicles;
    }

    let greedy_objective = match objective {
        LimitedObjective::MaxCount => Objective::MaxCount,
        LimitedObjective::MaxWeight => Objective::MaxWeight,
    };
    let objective_name = match objective {
        LimitedObjective::MaxCount => "max_count",
        LimitedObjective::MaxWeight => "max_weight",
    };
    let beats = match objective {
        LimitedObjective::MaxCount => limited_max_count_beats,
        LimitedObjective::MaxWeight => limited_max_weight_beats,
    };

    let mut best: Option<CandidateSolution> = None;

    for (subset_idx, subset) in owned_subsets(owned_vehicles).into_iter().enumerate() {
        for attempt in 0..ATTEMPTS_PER_SCENARIO_LIMITED {
            let seed = stable_seed(&[plan_date, "limited", &subset_idx.to_string(), &attempt.to_string()]);
            let mut rng = StdRng::seed_from_u64(seed);
            let roll: f64 = rng.gen_range(0.0..1.0);

            let (assignments, leftover) = if roll < 0.45 {
                build_pack(oracle, hub_id, stations.to_vec(), &subset, greedy_objective)
            } else if roll < 0.75 {
                build_cluster(oracle, hub_id, stations.to_vec(), &subset, greedy_objective, &mut rng)
            } else if roll < 0.90 {
                build_binpack(oracle, hub_id, stations.to_vec(), &subset, greedy_objective)
            } else {
                build_sequential(oracle, hub_id, stations.to_vec(), &subset, greedy_objective)
            };

            let strategy_name = if roll < 0.45 {
                "pack"
            } else if roll < 0.75 {
                "cluster"
            } else if roll < 0.90 {
                "binpack"
            } else {
                "sequential"
            };

            let candidate = candidate_from_routes(
                oracle,
                hub_id,
                params.cost_per_km,
                assignments,
                leftover,
                strategy_name,
                subset.len(),
                0,
                Some(objective_name),
            );

            best = match best {
                None => Some(candidate),
                Some(b) => {
                    if beats(&candidate, &b) {
                        Some(candidate)
                    } else {
                        Some(b)
                    }
                }
            };
        }
    }

    match best {
        Some(c) => LimitedOutcome::Solved(c),
        None => LimitedOutcome::Infeasible,
    }
}
