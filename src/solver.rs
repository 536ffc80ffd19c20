//! Solver Dispatcher: the single entry point tying together input
//! validation, station filtering, and the unlimited/limited branch.

use std::time::Instant;

use crate::api_types::OptimizerInput;
use crate::distance::{DistanceEntry, DistanceOracle};
use crate::error::{OptimizerError, OptimizerResult};
use crate::fleet_search::{solve_limited, solve_unlimited, LimitedObjective, LimitedOutcome, UnlimitedOutcome};
use crate::model::{Cargo, Parameters, Station, StationInfo, Vehicle};
use crate::result::{build_error_output, build_success_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    Unlimited,
    Limited(LimitedObjective),
}

/// Parses `problem_type` per section 6: exact (case-insensitive) match on
/// `unlimited_vehicles` selects the unlimited branch; everything else is
/// limited, with the objective chosen by substring/suffix matching.
pub fn parse_problem_type(raw: &str) -> ProblemType {
    let lower = raw.to_lowercase();
    if lower == "unlimited_vehicles" {
        return ProblemType::Unlimited;
    }
    let is_max_weight = lower.contains("max_weight") || lower.ends_with("_weight") || lower.ends_with("_kg");
    ProblemType::Limited(if is_max_weight { LimitedObjective::MaxWeight } else { LimitedObjective::MaxCount })
}

fn build_internal_model(input: &OptimizerInput) -> OptimizerResult<(Station, Vec<Station>, Vec<Vehicle>, DistanceOracle, Parameters)> {
    if input.hub.id.trim().is_empty() {
        return Err(OptimizerError::InvalidHub("hub id is empty".to_string()));
    }
    let hub = Station::new_hub(input.hub.id.clone(), input.hub.name.clone(), input.hub.latitude, input.hub.longitude);

    let mut stations = Vec::new();
    for s in &input.stations {
        let cargos: Vec<Cargo> = s
            .cargos
            .iter()
            .map(|c| {
                if c.weight_kg < 0.0 {
                    Err(OptimizerError::InvalidCargo(format!("cargo {} has negative weight", c.id)))
                } else {
                    Ok(Cargo { id: c.id.clone(), user_id: c.user_id.clone(), weight_kg: c.weight_kg })
                }
            })
            .collect::<OptimizerResult<Vec<_>>>()?;
        let mut station = Station {
            info: StationInfo { id: s.id.clone(), name: s.name.clone(), code: s.code.clone(), lat: s.latitude, lon: s.longitude },
            cargos,
            cargo_count: 0,
            weight_kg: 0.0,
            is_hub: false,
        };
        station.refresh_totals();
        stations.push(station);
    }

    let mut vehicles = Vec::new();
    for v in &input.vehicles {
        if v.capacity_kg <= 0.0 {
            return Err(OptimizerError::InvalidCapacity(format!("vehicle {} has non-positive capacity", v.id)));
        }
        vehicles.push(Vehicle {
            id: v.id.clone(),
            name: v.name.clone(),
            capacity_kg: v.capacity_kg,
            is_rented: v.ownership.eq_ignore_ascii_case("rented"),
            rental_cost: v.rental_cost.unwrap_or(0.0),
        });
    }

    let mut entries = std::collections::HashMap::new();
    for (key, d) in &input.distance_matrix {
        entries.insert(
            key.clone(),
            DistanceEntry { distance_km: d.distance_km, duration_minutes: d.duration_minutes, polyline: d.polyline.clone() },
        );
    }
    let mut locations: Vec<StationInfo> = vec![hub.info.clone()];
    locations.extend(stations.iter().map(|s| s.info.clone()));
    let oracle = DistanceOracle::new(entries, &locations);

    let params = Parameters {
        cost_per_km: input.parameters.as_ref().and_then(|p| p.cost_per_km).unwrap_or(1.0),
        rental_cost: input.parameters.as_ref().and_then(|p| p.rental_cost).unwrap_or(200.0),
        rental_capacity_kg: input.parameters.as_ref().and_then(|p| p.rental_capacity_kg).unwrap_or(500.0),
    };

    Ok((hub, stations, vehicles, oracle, params))
}

/// Runs the full pipeline: builds the internal model, filters stations
/// with no cargo, short-circuits `NO_CARGO`, then dispatches to the
/// unlimited or limited fleet search and assembles the structured
/// result. Invariant violations (bad hub, negative weights, non-positive
/// capacity) are returned as `Err` and must be mapped to a 500 at the
/// transport boundary, never as a structured `OptimizerOutput`.
pub fn solve(input: &OptimizerInput) -> OptimizerResult<crate::api_types::OptimizerOutput> {
    let started = Instant::now();
    let (hub, all_stations, owned_vehicles, oracle, params) = build_internal_model(input)?;

    let active_stations: Vec<Station> = all_stations.into_iter().filter(|s| s.has_cargo()).collect();
    if active_stations.is_empty() {
        return Ok(build_error_output(&input.problem_type, "NO_CARGO", "no stations have any cargo to route"));
    }

    let problem_type = parse_problem_type(&input.problem_type);

    match problem_type {
        ProblemType::Unlimited => {
            match solve_unlimited(&oracle, hub.id(), &input.plan_date, &active_stations, &owned_vehicles, &params) {
                UnlimitedOutcome::Solved(candidate) => {
                    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                    Ok(build_success_output(&oracle, &input.problem_type, &hub, &candidate, params.cost_per_km, "unlimited_fleet_search", elapsed_ms))
                }
                UnlimitedOutcome::Infeasible => {
                    Ok(build_error_output(&input.problem_type, "INFEASIBLE_SOLUTION", "no scenario covered every cargo"))
                }
            }
        }
        ProblemType::Limited(objective) => {
            match solve_limited(&oracle, hub.id(), &input.plan_date, &active_stations, &owned_vehicles, &params, objective) {
                LimitedOutcome::Solved(candidate) => {
                    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                    Ok(build_success_output(&oracle, &input.problem_type, &hub, &candidate, params.cost_per_km, "limited_fleet_search", elapsed_ms))
                }
                LimitedOutcome::NoVehicles => Ok(build_error_output(&input.problem_type, "NO_VEHICLES", "no owned vehicles available")),
                LimitedOutcome::Infeasible => {
                    Ok(build_error_output(&input.problem_type, "INFEASIBLE_SOLUTION", "no attempt produced a candidate"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unlimited_case_insensitively() {
        assert_eq!(parse_problem_type("Unlimited_Vehicles"), ProblemType::Unlimited);
    }

    #[test]
    fn parses_legacy_limited_alias_as_max_count() {
        assert_eq!(parse_problem_type("limited_vehicles"), ProblemType::Limited(LimitedObjective::MaxCount));
    }

    #[test]
    fn parses_max_weight_suffix_variants() {
        assert_eq!(parse_problem_type("limited_vehicles_max_weight"), ProblemType::Limited(LimitedObjective::MaxWeight));
        assert_eq!(parse_problem_type("limited_vehicles_kg"), ProblemType::Limited(LimitedObjective::MaxWeight));
        assert_eq!(parse_problem_type("something_weight"), ProblemType::Limited(LimitedObjective::MaxWeight));
    }

    #[test]
    fn defaults_unknown_strings_to_max_count() {
        assert_eq!(parse_problem_type("anything_else"), ProblemType::Limited(LimitedObjective::MaxCount));
    }

    use crate::api_types::{CargoInfo, DistanceInfo, HubInfo, VehicleInfo};

    fn hub() -> HubInfo {
        HubInfo { id: "H".into(), name: "Hub".into(), latitude: 0.0, longitude: 0.0 }
    }

    fn station(id: &str, lat: f64, lon: f64, cargos: Vec<(&str, f64, &str)>) -> crate::api_types::StationInfo {
        crate::api_types::StationInfo {
            id: id.into(),
            name: id.into(),
            code: id.into(),
            latitude: lat,
            longitude: lon,
            cargo_count: cargos.len(),
            total_weight_kg: cargos.iter().map(|(_, w, _)| w).sum(),
            cargos: cargos
                .into_iter()
                .map(|(cid, w, user)| CargoInfo { id: cid.into(), weight_kg: w, user_id: user.into() })
                .collect(),
        }
    }

    fn dist(a: &str, b: &str, km: f64) -> (String, DistanceInfo) {
        (format!("{a}_{b}"), DistanceInfo { distance_km: km, duration_minutes: km, polyline: String::new() })
    }

    #[test]
    fn s1_no_cargo_anywhere_reports_no_cargo() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "unlimited_vehicles".into(),
            hub: hub(),
            stations: vec![station("A", 1.0, 1.0, vec![])],
            vehicles: vec![VehicleInfo {
                id: "v1".into(),
                name: "v1".into(),
                plate_number: None,
                capacity_kg: 500.0,
                ownership: "owned".into(),
                rental_cost: None,
            }],
            parameters: None,
            distance_matrix: Default::default(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(!output.success);
        assert_eq!(output.error.unwrap().code, "NO_CARGO");
    }

    #[test]
    fn s2_single_vehicle_single_station_fits_hub_return_only() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "unlimited_vehicles".into(),
            hub: hub(),
            stations: vec![station("A", 1.0, 1.0, vec![("c1", 100.0, "u1")])],
            vehicles: vec![VehicleInfo {
                id: "v1".into(),
                name: "v1".into(),
                plate_number: None,
                capacity_kg: 500.0,
                ownership: "owned".into(),
                rental_cost: None,
            }],
            parameters: Some(crate::api_types::Parameters {
                cost_per_km: Some(1.0),
                rental_cost: Some(200.0),
                rental_capacity_kg: Some(500.0),
            }),
            distance_matrix: [dist("H", "A", 10.0), dist("A", "H", 10.0)].into_iter().collect(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(output.success);
        assert_eq!(output.routes.len(), 1);
        let route = &output.routes[0];
        assert_eq!(route.route_sequence.len(), 2);
        assert_eq!(route.route_sequence[0].station_id, "A");
        assert_eq!(route.route_sequence[0].action, "pickup");
        assert_eq!(route.route_sequence[1].station_id, "H");
        assert_eq!(route.route_sequence[1].action, "end");
        assert!(route.route_sequence[1].is_hub);
        assert_eq!(route.total_distance_km, 10.0);
        assert_eq!(route.distance_cost, 10.0);
        assert_eq!(route.rental_cost, 0.0);
        assert_eq!(route.total_cost, 10.0);
        assert!(output.unassigned.is_empty());
        let summary = output.summary.unwrap();
        assert_eq!(summary.vehicles_used, 1);
        assert_eq!(summary.vehicles_rented, 0);
    }

    #[test]
    fn s3_unlimited_synthesizes_exactly_one_rental() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "unlimited_vehicles".into(),
            hub: hub(),
            stations: vec![station(
                "A",
                1.0,
                1.0,
                vec![("c1", 400.0, "u1"), ("c2", 400.0, "u2")],
            )],
            vehicles: vec![VehicleInfo {
                id: "v1".into(),
                name: "v1".into(),
                plate_number: None,
                capacity_kg: 500.0,
                ownership: "owned".into(),
                rental_cost: None,
            }],
            parameters: Some(crate::api_types::Parameters {
                cost_per_km: Some(1.0),
                rental_cost: Some(200.0),
                rental_capacity_kg: Some(500.0),
            }),
            distance_matrix: [dist("H", "A", 10.0), dist("A", "H", 10.0)].into_iter().collect(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(output.success);
        let summary = output.summary.unwrap();
        assert_eq!(summary.vehicles_rented, 1);
        assert!(output.unassigned.is_empty());
        assert!(summary.total_cost >= 200.0);
    }

    #[test]
    fn s6_heavy_station_splits_across_two_vehicles() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "unlimited_vehicles".into(),
            hub: hub(),
            stations: vec![station(
                "A",
                1.0,
                1.0,
                vec![("c1", 400.0, "u1"), ("c2", 400.0, "u2"), ("c3", 400.0, "u3")],
            )],
            vehicles: vec![
                VehicleInfo {
                    id: "v1".into(),
                    name: "v1".into(),
                    plate_number: None,
                    capacity_kg: 500.0,
                    ownership: "owned".into(),
                    rental_cost: None,
                },
                VehicleInfo {
                    id: "v2".into(),
                    name: "v2".into(),
                    plate_number: None,
                    capacity_kg: 500.0,
                    ownership: "owned".into(),
                    rental_cost: None,
                },
            ],
            parameters: Some(crate::api_types::Parameters {
                cost_per_km: Some(1.0),
                rental_cost: Some(200.0),
                rental_capacity_kg: Some(500.0),
            }),
            distance_matrix: [dist("H", "A", 10.0), dist("A", "H", 10.0)].into_iter().collect(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(output.success);
        assert!(output.unassigned.is_empty());
        let total_cargos: usize = output.routes.iter().map(|r| r.assigned_cargos.len()).sum();
        assert_eq!(total_cargos, 3);
        for route in &output.routes {
            assert!(route.total_weight_kg <= 500.0 + crate::model::EPSILON);
        }
    }

    #[test]
    fn limited_with_no_owned_vehicles_reports_no_vehicles() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "limited_vehicles_max_count".into(),
            hub: hub(),
            stations: vec![station("A", 1.0, 1.0, vec![("c1", 10.0, "u1")])],
            vehicles: vec![],
            parameters: None,
            distance_matrix: Default::default(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(!output.success);
        assert_eq!(output.error.unwrap().code, "NO_VEHICLES");
    }

    #[test]
    fn s4_limited_max_weight_prefers_the_two_heaviest_cargos() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "limited_vehicles_max_weight".into(),
            hub: hub(),
            stations: vec![station(
                "A",
                1.0,
                1.0,
                vec![("A", 90.0, "u1"), ("B", 90.0, "u2"), ("C", 10.0, "u3"), ("D", 10.0, "u4"), ("E", 10.0, "u5")],
            )],
            vehicles: vec![
                VehicleInfo {
                    id: "v1".into(),
                    name: "v1".into(),
                    plate_number: None,
                    capacity_kg: 100.0,
                    ownership: "owned".into(),
                    rental_cost: None,
                },
                VehicleInfo {
                    id: "v2".into(),
                    name: "v2".into(),
                    plate_number: None,
                    capacity_kg: 100.0,
                    ownership: "owned".into(),
                    rental_cost: None,
                },
            ],
            parameters: Some(crate::api_types::Parameters { cost_per_km: Some(1.0), rental_cost: Some(0.0), rental_capacity_kg: Some(0.0) }),
            distance_matrix: [dist("H", "A", 10.0), dist("A", "H", 10.0)].into_iter().collect(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(output.success);
        let summary = output.summary.unwrap();
        assert!(summary.total_weight_kg >= 180.0 - crate::model::EPSILON);
    }

    #[test]
    fn s4_limited_max_count_prefers_the_three_lightest_cargos() {
        let input = OptimizerInput {
            plan_date: "2026-07-28".into(),
            problem_type: "limited_vehicles_max_count".into(),
            hub: hub(),
            stations: vec![station(
                "A",
                1.0,
                1.0,
                vec![("A", 90.0, "u1"), ("B", 90.0, "u2"), ("C", 10.0, "u3"), ("D", 10.0, "u4"), ("E", 10.0, "u5")],
            )],
            vehicles: vec![
                VehicleInfo {
                    id: "v1".into(),
                    name: "v1".into(),
                    plate_number: None,
                    capacity_kg: 100.0,
                    ownership: "owned".into(),
                    rental_cost: None,
                },
                VehicleInfo {
                    id: "v2".into(),
                    name: "v2".into(),
                    plate_number: None,
                    capacity_kg: 100.0,
                    ownership: "owned".into(),
                    rental_cost: None,
                },
            ],
            parameters: Some(crate::api_types::Parameters { cost_per_km: Some(1.0), rental_cost: Some(0.0), rental_capacity_kg: Some(0.0) }),
            distance_matrix: [dist("H", "A", 10.0), dist("A", "H", 10.0)].into_iter().collect(),
        };
        let output = solve(&input).expect("no invariant violation");
        assert!(output.success);
        let summary = output.summary.unwrap();
        assert!(summary.total_cargos >= 4);
    }
}
