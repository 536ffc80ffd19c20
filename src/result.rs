//! Result Builder: assembles the wire-shaped [`OptimizerOutput`] from a
//! winning [`CandidateSolution`].

use std::collections::HashMap;

use crate::api_types::{
    AlgorithmInfo, AssignedCargo, ErrorInfo, OptimizerOutput, RouteResult, RouteStop, Summary, UnassignedCargo, UserInfo,
};
use crate::candidate::CandidateSolution;
use crate::distance::DistanceOracle;
use crate::metrics::{route_cost, route_distance, route_duration};
use crate::model::{round2, round3, Station};

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn route_result(
    oracle: &DistanceOracle,
    hub: &Station,
    route: &crate::model::Route,
    vehicle: &crate::model::Vehicle,
    cost_per_km: f64,
) -> RouteResult {
    let mut stops = Vec::with_capacity(route.len() + 1);
    let mut assigned_cargos = Vec::new();
    let mut per_user: HashMap<String, usize> = HashMap::new();
    let mut pickup_order = 0usize;
    let mut polyline_segments: Vec<String> = Vec::new();

    for (order, stop) in route.iter().enumerate() {
        stops.push(RouteStop {
            order,
            station_id: stop.station.id.clone(),
            station_name: stop.station.name.clone(),
            station_code: stop.station.code.clone(),
            latitude: stop.station.lat,
            longitude: stop.station.lon,
            action: "pickup".to_string(),
            is_hub: false,
            cargo_count: stop.cargos.len(),
            weight_kg: round2(stop.weight_kg),
        });
        for cargo in &stop.cargos {
            assigned_cargos.push(AssignedCargo {
                cargo_id: cargo.id.clone(),
                user_id: cargo.user_id.clone(),
                weight_kg: round2(cargo.weight_kg),
                station_id: stop.station.id.clone(),
                pickup_order,
            });
            pickup_order += 1;
            *per_user.entry(cargo.user_id.clone()).or_insert(0) += 1;
        }
        if order > 0 {
            let prev = &route[order - 1];
            let seg = oracle.polyline(&prev.station.id, &stop.station.id);
            if !seg.is_empty() {
                polyline_segments.push(seg);
            }
        }
    }

    if let Some(last) = route.last() {
        let seg = oracle.polyline(&last.station.id, hub.id());
        if !seg.is_empty() {
            polyline_segments.push(seg);
        }
    }

    stops.push(RouteStop {
        order: route.len(),
        station_id: hub.id().to_string(),
        station_name: hub.info.name.clone(),
        station_code: hub.info.code.clone(),
        latitude: hub.info.lat,
        longitude: hub.info.lon,
        action: "end".to_string(),
        is_hub: true,
        cargo_count: 0,
        weight_kg: 0.0,
    });

    let users = per_user
        .into_iter()
        .map(|(user_id, cargo_count)| UserInfo { user_id, cargo_count })
        .collect();

    let total_distance = route_distance(oracle, route, hub.id());
    let total_duration = route_duration(oracle, route, hub.id());
    let distance_cost = total_distance * cost_per_km;
    let rental_cost = if vehicle.is_rented { vehicle.rental_cost } else { 0.0 };
    let total_weight: f64 = route.iter().map(|s| s.weight_kg).sum();
    let capacity_utilization = if vehicle.capacity_kg > 0.0 { total_weight / vehicle.capacity_kg * 100.0 } else { 0.0 };

    RouteResult {
        vehicle_id: vehicle.id.clone(),
        vehicle_name: vehicle.name.clone(),
        is_rented: vehicle.is_rented,
        route_sequence: stops,
        assigned_cargos,
        users,
        total_distance_km: round3(total_distance),
        total_duration_minutes: round2(total_duration),
        distance_cost: round2(distance_cost),
        rental_cost: round2(rental_cost),
        total_cost: round2(route_cost(oracle, route, hub.id(), vehicle, cost_per_km)),
        total_weight_kg: round2(total_weight),
        capacity_utilization: round1(capacity_utilization),
        polyline: polyline_segments.join(";"),
    }
}

/// Builds the success-path `OptimizerOutput` for a winning candidate.
/// `cost_per_km` must be the same value the candidate was scored with, so
/// per-route costs reproduce the summary total.
pub fn build_success_output(
    oracle: &DistanceOracle,
    problem_type: &str,
    hub: &Station,
    candidate: &CandidateSolution,
    cost_per_km: f64,
    algorithm_name: &str,
    execution_time_ms: f64,
) -> OptimizerOutput {
    let routes: Vec<RouteResult> = candidate
        .routes
        .iter()
        .zip(candidate.vehicles.iter())
        .map(|(route, vehicle)| route_result(oracle, hub, route, vehicle, cost_per_km))
        .collect();

    let unassigned = build_unassigned_list(&candidate.unassigned_stations);
    let unassigned_weight_kg: f64 = unassigned.iter().map(|u| u.weight_kg).sum();

    let summary = Summary {
        total_distance_km: round3(candidate.total_distance_km),
        total_cost: round2(candidate.total_cost),
        total_cargos: candidate.assigned_cargo_count,
        total_weight_kg: round2(candidate.assigned_weight_kg),
        vehicles_used: routes.len(),
        vehicles_rented: candidate.vehicles.iter().filter(|v| v.is_rented).count(),
        unassigned_cargos: unassigned.len(),
        unassigned_weight_kg: round2(unassigned_weight_kg),
    };

    OptimizerOutput {
        success: true,
        problem_type: problem_type.to_string(),
        summary: Some(summary),
        routes,
        unassigned,
        algorithm_info: Some(AlgorithmInfo {
            name: algorithm_name.to_string(),
            iterations: candidate.two_opt_iterations,
            execution_time_ms,
            improvement_percentage: 0.0,
        }),
        error: None,
    }
}

pub fn build_error_output(problem_type: &str, code: &str, message: &str) -> OptimizerOutput {
    OptimizerOutput {
        success: false,
        problem_type: problem_type.to_string(),
        summary: None,
        routes: Vec::new(),
        unassigned: Vec::new(),
        algorithm_info: None,
        error: Some(ErrorInfo { code: code.to_string(), message: message.to_string(), details: None }),
    }
}

const UNASSIGNED_REASON: &str = "capacity insufficient";

pub fn build_unassigned_list(stations: &[Station]) -> Vec<UnassignedCargo> {
    stations
        .iter()
        .flat_map(|s| {
            s.cargos.iter().map(move |c| UnassignedCargo {
                cargo_id: c.id.clone(),
                station_id: s.info.id.clone(),
                weight_kg: round2(c.weight_kg),
                reason: UNASSIGNED_REASON.to_string(),
            })
        })
        .collect()
}
