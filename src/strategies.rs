//! Strategy Constructors: the four ways of turning a station pool plus a
//! vehicle pool into a set of per-vehicle routes. `cluster`, `binpack` and
//! `sequential` apply to both problem variants; `pack` is limited-only.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

use crate::distance::DistanceOracle;
use crate::greedy::{greedy_route_for_vehicle, Objective};
use crate::local_search::two_opt;
use crate::model::{Route, Station, Vehicle, EPSILON};

/// One vehicle's finished route plus the 2-opt move count spent on it.
pub struct RouteAssignment {
    pub vehicle: Vehicle,
    pub route: Route,
    pub two_opt_iterations: usize,
}

fn vehicles_by_capacity_desc(vehicles: &[Vehicle]) -> Vec<Vehicle> {
    let mut v = vehicles.to_vec();
    v.sort_by(|a, b| b.capacity_kg.partial_cmp(&a.capacity_kg).unwrap());
    v
}

fn finish_route(
    oracle: &DistanceOracle,
    hub_id: &str,
    vehicle: Vehicle,
    stations: &mut Vec<Station>,
    objective: Objective,
    allowed: Option<&HashSet<String>>,
) -> RouteAssignment {
    let route = greedy_route_for_vehicle(oracle, hub_id, stations, vehicle.capacity_kg, objective, allowed);
    let (route, iterations) = two_opt(oracle, hub_id, route);
    RouteAssignment { vehicle, route, two_opt_iterations: iterations }
}

/// Farthest-first seeding + nearest-seed assignment, clusters paired with
/// vehicles by descending weight/capacity.
pub fn build_cluster(
    oracle: &DistanceOracle,
    hub_id: &str,
    mut stations: Vec<Station>,
    vehicles: &[Vehicle],
    objective: Objective,
    rng: &mut StdRng,
) -> (Vec<RouteAssignment>, Vec<Station>) {
    if stations.is_empty() || vehicles.is_empty() {
        return (Vec::new(), stations);
    }
    let k = vehicles.len().min(stations.len());

    let mut by_hub_distance: Vec<usize> = (0..stations.len()).collect();
    by_hub_distance.sort_by(|&a, &b| {
        let da = oracle.distance(hub_id, &stations[a].info.id);
        let db = oracle.distance(hub_id, &stations[b].info.id);
        db.partial_cmp(&da).unwrap()
    });
    let pool_size = by_hub_distance.len().min(3);
    let first_seed = by_hub_distance[rng.gen_range(0..pool_size)];

    let mut seed_indices = vec![first_seed];
    while seed_indices.len() < k {
        let mut best_candidates: Vec<usize> = Vec::new();
        let mut best_min_dist = f64::NEG_INFINITY;
        for idx in 0..stations.len() {
            if seed_indices.contains(&idx) {
                continue;
            }
            let min_dist = seed_indices
                .iter()
                .map(|&s| oracle.distance(&stations[idx].info.id, &stations[s].info.id))
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_min_dist + EPSILON {
                best_min_dist = min_dist;
                best_candidates = vec![idx];
            } else if (min_dist - best_min_dist).abs() <= EPSILON {
                best_candidates.push(idx);
            }
        }
        if best_candidates.is_empty() {
            break;
        }
        let pick = best_candidates[rng.gen_range(0..best_candidates.len())];
        seed_indices.push(pick);
    }

    let seed_ids: Vec<String> = seed_indices.iter().map(|&i| stations[i].info.id.clone()).collect();

    let mut clusters: Vec<Vec<Station>> = vec![Vec::new(); seed_indices.len()];
    let mut remaining: Vec<Station> = Vec::new();
    std::mem::swap(&mut remaining, &mut stations);
    for station in remaining {
        let mut best_cluster: Vec<usize> = Vec::new();
        let mut best_dist = f64::INFINITY;
        for (ci, seed_id) in seed_ids.iter().enumerate() {
            let d = oracle.distance(&station.info.id, seed_id);
            if d < best_dist - EPSILON {
                best_dist = d;
                best_cluster = vec![ci];
            } else if (d - best_dist).abs() <= EPSILON {
                best_cluster.push(ci);
            }
        }
        let chosen = best_cluster[rng.gen_range(0..best_cluster.len())];
        clusters[chosen].push(station);
    }

    let mut cluster_order: Vec<usize> = (0..clusters.len()).collect();
    cluster_order.sort_by(|&a, &b| {
        let wa: f64 = clusters[a].iter().map(|s| s.weight_kg).sum();
        let wb: f64 = clusters[b].iter().map(|s| s.weight_kg).sum();
        wb.partial_cmp(&wa).unwrap()
    });
    let fleet = vehicles_by_capacity_desc(vehicles);

    let mut assignments = Vec::new();
    let mut leftover = Vec::new();
    for (vehicle, &cluster_idx) in fleet.into_iter().zip(cluster_order.iter()) {
        let mut bucket = std::mem::take(&mut clusters[cluster_idx]);
        assignments.push(finish_route(oracle, hub_id, vehicle, &mut bucket, objective, None));
        leftover.extend(bucket.into_iter().filter(Station::has_cargo));
    }
    (assignments, leftover)
}

/// Best-fit-decreasing assignment of whole stations into vehicle buckets.
pub fn build_binpack(
    oracle: &DistanceOracle,
    hub_id: &str,
    mut stations: Vec<Station>,
    vehicles: &[Vehicle],
    objective: Objective,
) -> (Vec<RouteAssignment>, Vec<Station>) {
    let fleet = vehicles_by_capacity_desc(vehicles);
    if fleet.is_empty() {
        return (Vec::new(), stations);
    }
    stations.sort_by(|a, b| b.weight_kg.partial_cmp(&a.weight_kg).unwrap());

    let mut remaining_capacity: Vec<f64> = fleet.iter().map(|v| v.capacity_kg).collect();
    let mut buckets: Vec<Vec<Station>> = vec![Vec::new(); fleet.len()];

    for station in stations {
        let mut best_bucket: Option<usize> = None;
        let mut best_leftover = f64::INFINITY;
        for (i, &cap) in remaining_capacity.iter().enumerate() {
            let leftover = cap - station.weight_kg;
            if leftover >= -EPSILON && leftover < best_leftover {
                best_leftover = leftover;
                best_bucket = Some(i);
            }
        }
        let chosen = best_bucket.unwrap_or_else(|| {
            remaining_capacity
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap_or(0)
        });
        remaining_capacity[chosen] -= station.weight_kg;
        buckets[chosen].push(station);
    }

    let mut assignments = Vec::new();
    let mut leftover = Vec::new();
    for (vehicle, mut bucket) in fleet.into_iter().zip(buckets.into_iter()) {
        assignments.push(finish_route(oracle, hub_id, vehicle, &mut bucket, objective, None));
        leftover.extend(bucket.into_iter().filter(Station::has_cargo));
    }
    (assignments, leftover)
}

/// Repeated greedy passes over a shared station pool, one per vehicle in
/// descending capacity order. Allows a station to be split across
/// vehicles.
pub fn build_sequential(
    oracle: &DistanceOracle,
    hub_id: &str,
    mut stations: Vec<Station>,
    vehicles: &[Vehicle],
    objective: Objective,
) -> (Vec<RouteAssignment>, Vec<Station>) {
    let fleet = vehicles_by_capacity_desc(vehicles);
    let mut assignments = Vec::new();
    for vehicle in fleet {
        assignments.push(finish_route(oracle, hub_id, vehicle, &mut stations, objective, None));
    }
    let leftover = stations.into_iter().filter(Station::has_cargo).collect();
    (assignments, leftover)
}

/// Limited-problem-only: flattens all cargos, sorts by the objective,
/// best-fit-decreasing into vehicle capacity buckets, then restricts each
/// vehicle's Greedy Route Builder call to its bucket's cargo ids.
pub fn build_pack(
    oracle: &DistanceOracle,
    hub_id: &str,
    mut stations: Vec<Station>,
    vehicles: &[Vehicle],
    objective: Objective,
) -> (Vec<RouteAssignment>, Vec<Station>) {
    let fleet = vehicles_by_capacity_desc(vehicles);
    if fleet.is_empty() {
        return (Vec::new(), stations);
    }

    let mut flat: Vec<(String, f64)> = stations
        .iter()
        .flat_map(|s| s.cargos.iter().map(|c| (c.id.clone(), c.weight_kg)))
        .collect();
    match objective {
        Objective::MaxWeight => flat.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap()),
        _ => flat.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap()),
    }

    let mut remaining_capacity: Vec<f64> = fleet.iter().map(|v| v.capacity_kg).collect();
    let mut buckets: Vec<HashSet<String>> = vec![HashSet::new(); fleet.len()];

    for (cargo_id, weight) in flat {
        let mut best_bucket: Option<usize> = None;
        let mut best_leftover = f64::INFINITY;
        for (i, &cap) in remaining_capacity.iter().enumerate() {
            let leftover = cap - weight;
            if leftover >= -EPSILON && leftover < best_leftover {
                best_leftover = leftover;
                best_bucket = Some(i);
            }
        }
        if let Some(i) = best_bucket {
            remaining_capacity[i] -= weight;
            buckets[i].insert(cargo_id);
        }
        // cargos that fit nowhere are simply left out of every bucket and
        // stay unassigned.
    }

    let mut assignments = Vec::new();
    for (vehicle, allowed) in fleet.into_iter().zip(buckets.into_iter()) {
        assignments.push(finish_route(oracle, hub_id, vehicle, &mut stations, objective, Some(&allowed)));
    }
    let leftover = stations.into_iter().filter(Station::has_cargo).collect();
    (assignments, leftover)
}
