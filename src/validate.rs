//! `/validate` support: builds the same counts `main.py`'s handler
//! reports, without invoking the fleet search. Always produces a response
//! — it is not a `Result`, matching `main.py`'s `validate_input` which
//! never returns a non-2xx status (section 6). `main.py` constructs a
//! `VRPOptimizer(input_data)` and reports `valid: false` only if that
//! construction raises; the constructor itself performs no business-rule
//! checks (no capacity/weight validation), so a structurally-parseable
//! request is always `valid: true` here too.

use serde::Serialize;

use crate::api_types::OptimizerInput;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ValidateResponse {
    Valid {
        valid: bool,
        station_count: usize,
        vehicle_count: usize,
        total_cargo_weight: f64,
        total_vehicle_capacity: f64,
    },
    Invalid {
        valid: bool,
        error: String,
    },
}

pub fn validate_input(input: &OptimizerInput) -> ValidateResponse {
    let total_cargo_weight: f64 = input.stations.iter().flat_map(|s| s.cargos.iter()).map(|c| c.weight_kg).sum();
    let total_vehicle_capacity: f64 = input.vehicles.iter().map(|v| v.capacity_kg).sum();

    ValidateResponse::Valid {
        valid: true,
        station_count: input.stations.len(),
        vehicle_count: input.vehicles.len(),
        total_cargo_weight: (total_cargo_weight * 100.0).round() / 100.0,
        total_vehicle_capacity: (total_vehicle_capacity * 100.0).round() / 100.0,
    }
}
