//! Route Metric Engine: distance, weight, and cost under the asymmetric
//! edge policy (free hub→first-pickup leg, mandatory last-stop→hub leg).

use crate::distance::DistanceOracle;
use crate::model::{Route, Vehicle};

/// `Σ distance(stop[i], stop[i+1])` for consecutive stops, plus the
/// mandatory `stop[n-1] -> hub` leg. The hub->first-pickup leg is
/// deliberately excluded.
pub fn route_distance(oracle: &DistanceOracle, route: &Route, hub_id: &str) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for w in route.windows(2) {
        total += oracle.distance(&w[0].station.id, &w[1].station.id);
    }
    total += oracle.distance(&route[route.len() - 1].station.id, hub_id);
    total
}

/// Same edge set as [`route_distance`], summing duration instead.
pub fn route_duration(oracle: &DistanceOracle, route: &Route, hub_id: &str) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for w in route.windows(2) {
        total += oracle.duration(&w[0].station.id, &w[1].station.id);
    }
    total += oracle.duration(&route[route.len() - 1].station.id, hub_id);
    total
}

pub fn route_weight(route: &Route) -> f64 {
    route.iter().map(|s| s.weight_kg).sum()
}

pub fn route_cost(oracle: &DistanceOracle, route: &Route, hub_id: &str, vehicle: &Vehicle, cost_per_km: f64) -> f64 {
    let distance_cost = route_distance(oracle, route, hub_id) * cost_per_km;
    let rental = if vehicle.is_rented { vehicle.rental_cost } else { 0.0 };
    distance_cost + rental
}
