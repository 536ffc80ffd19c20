//! CandidateSolution: one proposed full solution from a single strategy
//! attempt within a fleet scenario, plus the comparators Fleet Search
//! uses to pick a winner.

use crate::distance::DistanceOracle;
use crate::metrics::{route_cost, route_distance, route_weight};
use crate::model::{round2, round3, Route, Station, Vehicle, EPSILON};
use crate::strategies::RouteAssignment;

#[derive(Debug, Clone)]
pub struct CandidateMeta {
    pub strategy: String,
    pub owned_used: usize,
    pub rented_used: usize,
    pub fleet_size: usize,
    pub objective: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CandidateSolution {
    pub routes: Vec<Route>,
    pub vehicles: Vec<Vehicle>,
    pub unassigned_stations: Vec<Station>,
    pub assigned_cargo_count: usize,
    pub assigned_weight_kg: f64,
    pub total_distance_km: f64,
    pub total_cost: f64,
    pub two_opt_iterations: usize,
    pub meta: CandidateMeta,
}

/// Builds a [`CandidateSolution`] from the per-vehicle routes a strategy
/// produced, keeping only non-empty routes (an empty route contributes
/// nothing and is dropped so `vehicles_used` reflects reality).
pub fn candidate_from_routes(
    oracle: &DistanceOracle,
    hub_id: &str,
    cost_per_km: f64,
    assignments: Vec<RouteAssignment>,
    unassigned_stations: Vec<Station>,
    strategy: &str,
    owned_used: usize,
    rented_used: usize,
    objective: Option<&str>,
) -> CandidateSolution {
    let mut routes = Vec::new();
    let mut vehicles = Vec::new();
    let mut total_distance = 0.0;
    let mut total_cost = 0.0;
    let mut two_opt_iterations = 0;
    let mut assigned_cargo_count = 0;
    let mut assigned_weight_kg = 0.0;

    for a in assignments {
        if a.route.is_empty() {
            continue;
        }
        total_distance += route_distance(oracle, &a.route, hub_id);
        total_cost += route_cost(oracle, &a.route, hub_id, &a.vehicle, cost_per_km);
        assigned_cargo_count += a.route.iter().map(|s| s.cargos.len()).sum::<usize>();
        assigned_weight_kg += route_weight(&a.route);
        two_opt_iterations += a.two_opt_iterations;
        routes.push(a.route);
        vehicles.push(a.vehicle);
    }

    CandidateSolution {
        routes,
        vehicles,
        unassigned_stations,
        assigned_cargo_count,
        assigned_weight_kg: round2(assigned_weight_kg),
        total_distance_km: round3(total_distance),
        total_cost: round2(total_cost),
        two_opt_iterations,
        meta: CandidateMeta {
            strategy: strategy.to_string(),
            owned_used,
            rented_used,
            fleet_size: vehicles.len(),
            objective: objective.map(str::to_string),
        },
    }
}

impl CandidateSolution {
    pub fn is_fully_feasible(&self, total_cargo_count: usize) -> bool {
        self.assigned_cargo_count == total_cargo_count
    }
}

/// Unlimited-variant comparator: minimize cost, then fewer rentals, then
/// fewer vehicles. Returns `true` if `candidate` beats `incumbent`.
pub fn unlimited_beats(candidate: &CandidateSolution, incumbent: &CandidateSolution) -> bool {
    if candidate.total_cost + EPSILON < incumbent.total_cost {
        return true;
    }
    if (candidate.total_cost - incumbent.total_cost).abs() > EPSILON {
        return false;
    }
    if candidate.meta.rented_used != incumbent.meta.rented_used {
        return candidate.meta.rented_used < incumbent.meta.rented_used;
    }
    candidate.vehicles.len() < incumbent.vehicles.len()
}

/// Limited `max_weight` comparator: maximize assigned weight, then
/// minimize cost, then maximize assigned count, then fewer vehicles.
pub fn limited_max_weight_beats(candidate: &CandidateSolution, incumbent: &CandidateSolution) -> bool {
    if candidate.assigned_weight_kg > incumbent.assigned_weight_kg + EPSILON {
        return true;
    }
    if (candidate.assigned_weight_kg - incumbent.assigned_weight_kg).abs() > EPSILON {
        return false;
    }
    if candidate.total_cost + EPSILON < incumbent.total_cost {
        return true;
    }
    if (candidate.total_cost - incumbent.total_cost).abs() > EPSILON {
        return false;
    }
    if candidate.assigned_cargo_count != incumbent.assigned_cargo_count {
        return candidate.assigned_cargo_count > incumbent.assigned_cargo_count;
    }
    candidate.vehicles.len() < incumbent.vehicles.len()
}

/// Limited `max_count` comparator: maximize assigned count, then minimize
/// cost, then maximize assigned weight, then fewer vehicles.
pub fn limited_max_count_beats(candidate: &CandidateSolution, incumbent: &CandidateSolution) -> bool {
    if candidate.assigned_cargo_count != incumbent.assigned_cargo_count {
        return candidate.assigned_cargo_count > incumbent.assigned_cargo_count;
    }
    if candidate.total_cost + EPSILON < incumbent.total_cost {
        return true;
    }
    if (candidate.total_cost - incumbent.total_cost).abs() > EPSILON {
        return false;
    }
    if (candidate.assigned_weight_kg - incumbent.assigned_weight_kg).abs() > EPSILON {
        return candidate.assigned_weight_kg > incumbent.assigned_weight_kg;
    }
    candidate.vehicles.len() < incumbent.vehicles.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(cost: f64, rented: usize, vehicles: usize) -> CandidateSolution {
        CandidateSolution {
            routes: Vec::new(),
            vehicles: (0..vehicles)
                .map(|i| Vehicle { id: i.to_string(), name: i.to_string(), capacity_kg: 1.0, is_rented: false, rental_cost: 0.0 })
                .collect(),
            unassigned_stations: Vec::new(),
            assigned_cargo_count: 0,
            assigned_weight_kg: 0.0,
            total_distance_km: 0.0,
            total_cost: cost,
            two_opt_iterations: 0,
            meta: CandidateMeta { strategy: "x".into(), owned_used: 0, rented_used: rented, fleet_size: vehicles, objective: None },
        }
    }

    #[test]
    fn unlimited_prefers_lower_cost() {
        let cheap = candidate(10.0, 0, 1);
        let pricey = candidate(20.0, 0, 1);
        assert!(unlimited_beats(&cheap, &pricey));
        assert!(!unlimited_beats(&pricey, &cheap));
    }

    #[test]
    fn unlimited_tie_breaks_by_rentals_then_fleet_size() {
        let fewer_rentals = candidate(10.0, 0, 2);
        let more_rentals = candidate(10.0, 1, 2);
        assert!(unlimited_beats(&fewer_rentals, &more_rentals));

        let smaller_fleet = candidate(10.0, 1, 1);
        let bigger_fleet = candidate(10.0, 1, 2);
        assert!(unlimited_beats(&smaller_fleet, &bigger_fleet));
    }

    #[test]
    fn limited_max_weight_prioritizes_weight_over_cost() {
        let mut heavy = candidate(50.0, 0, 1);
        heavy.assigned_weight_kg = 100.0;
        let mut light_cheap = candidate(5.0, 0, 1);
        light_cheap.assigned_weight_kg = 90.0;
        assert!(limited_max_weight_beats(&heavy, &light_cheap));
    }

    #[test]
    fn limited_max_count_prioritizes_count_over_weight() {
        let mut more_items = candidate(50.0, 0, 1);
        more_items.assigned_cargo_count = 5;
        more_items.assigned_weight_kg = 10.0;
        let mut fewer_items_heavier = candidate(5.0, 0, 1);
        fewer_items_heavier.assigned_cargo_count = 4;
        fewer_items_heavier.assigned_weight_kg = 100.0;
        assert!(limited_max_count_beats(&more_items, &fewer_items_heavier));
    }
}
