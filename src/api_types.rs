//! Wire types for the `/optimize` and `/validate` JSON bodies. Field
//! names and defaults follow the original service's request/response
//! shape exactly; these are kept separate from the solver's internal
//! [`crate::model`] types because the wire shape carries redundant
//! derived fields (`cargo_count`, `total_weight_kg`) the solver
//! recomputes rather than trusts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubInfo {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CargoInfo {
    pub id: String,
    pub weight_kg: f64,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationInfo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub cargo_count: usize,
    #[serde(default)]
    pub total_weight_kg: f64,
    pub cargos: Vec<CargoInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plate_number: Option<String>,
    pub capacity_kg: f64,
    pub ownership: String,
    #[serde(default)]
    pub rental_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Parameters {
    pub cost_per_km: Option<f64>,
    pub rental_cost: Option<f64>,
    pub rental_capacity_kg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DistanceInfo {
    pub distance_km: f64,
    pub duration_minutes: f64,
    #[serde(default)]
    pub polyline: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptimizerInput {
    pub plan_date: String,
    pub problem_type: String,
    pub hub: HubInfo,
    pub stations: Vec<StationInfo>,
    pub vehicles: Vec<VehicleInfo>,
    #[serde(default)]
    pub parameters: Option<Parameters>,
    #[serde(default)]
    pub distance_matrix: HashMap<String, DistanceInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteStop {
    pub order: usize,
    pub station_id: String,
    pub station_name: String,
    pub station_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub action: String,
    pub is_hub: bool,
    pub cargo_count: usize,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignedCargo {
    pub cargo_id: String,
    pub user_id: String,
    pub weight_kg: f64,
    pub station_id: String,
    pub pickup_order: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub user_id: String,
    pub cargo_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub is_rented: bool,
    pub route_sequence: Vec<RouteStop>,
    pub assigned_cargos: Vec<AssignedCargo>,
    pub users: Vec<UserInfo>,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub distance_cost: f64,
    pub rental_cost: f64,
    pub total_cost: f64,
    pub total_weight_kg: f64,
    pub capacity_utilization: f64,
    pub polyline: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnassignedCargo {
    pub cargo_id: String,
    pub station_id: String,
    pub weight_kg: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_distance_km: f64,
    pub total_cost: f64,
    pub total_cargos: usize,
    pub total_weight_kg: f64,
    pub vehicles_used: usize,
    pub vehicles_rented: usize,
    pub unassigned_cargos: usize,
    pub unassigned_weight_kg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub iterations: usize,
    pub execution_time_ms: f64,
    pub improvement_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizerOutput {
    pub success: bool,
    pub problem_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub routes: Vec<RouteResult>,
    pub unassigned: Vec<UnassignedCargo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm_info: Option<AlgorithmInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}
