//! Core data structures for the courier routing problem.
//!
//! These are the solver's internal working types. They are distinct from
//! the wire types in [`crate::api_types`]: the solver mutates cargo lists
//! in place while building candidates, which the JSON request/response
//! shapes never do.

use serde::Serialize;

/// Float comparisons throughout the solver use this tolerance.
pub const EPSILON: f64 = 1e-6;

/// An indivisible parcel with a weight and an owning user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cargo {
    pub id: String,
    pub user_id: String,
    pub weight_kg: f64,
}

/// Static identity of a station or the hub, independent of its current
/// cargo load. Stored on [`StopAssignment`] so a stop doesn't carry a
/// station's (possibly since-mutated) cargo list along with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub lat: f64,
    pub lon: f64,
}

/// A pickup station holding zero or more cargos, or the hub (`is_hub =
/// true`, always empty). `cargo_count` and `weight_kg` are derived from
/// `cargos` and must be refreshed with [`Station::refresh_totals`] after
/// any mutation.
#[derive(Debug, Clone)]
pub struct Station {
    pub info: StationInfo,
    pub cargos: Vec<Cargo>,
    pub cargo_count: usize,
    pub weight_kg: f64,
    pub is_hub: bool,
}

impl Station {
    pub fn new_hub(id: String, name: String, lat: f64, lon: f64) -> Self {
        Self {
            info: StationInfo {
                id,
                name,
                code: "HUB".to_string(),
                lat,
                lon,
            },
            cargos: Vec::new(),
            cargo_count: 0,
            weight_kg: 0.0,
            is_hub: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Recompute `cargo_count`/`weight_kg` from the current `cargos` list.
    /// Must be called after any in-place mutation of `cargos`.
    pub fn refresh_totals(&mut self) {
        self.cargo_count = self.cargos.len();
        self.weight_kg = round2(self.cargos.iter().map(|c| c.weight_kg).sum());
    }

    pub fn has_cargo(&self) -> bool {
        !self.cargos.is_empty()
    }
}

/// A vehicle, owned (from input) or rented (synthesized during unlimited
/// fleet search).
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub capacity_kg: f64,
    pub is_rented: bool,
    pub rental_cost: f64,
}

/// One stop on a route: a station (by identity) plus the subset of its
/// cargos picked up there.
#[derive(Debug, Clone)]
pub struct StopAssignment {
    pub station: StationInfo,
    pub cargos: Vec<Cargo>,
    pub weight_kg: f64,
}

/// An ordered sequence of stops assigned to one vehicle. The hub is the
/// implicit terminal and is never an explicit leading or trailing member
/// of this sequence.
pub type Route = Vec<StopAssignment>;

/// Cost/capacity tuning knobs carried on every request.
#[derive(Debug, Clone, Copy)]
pub struct Parameters {
    pub cost_per_km: f64,
    pub rental_cost: f64,
    pub rental_capacity_kg: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            cost_per_km: 1.0,
            rental_cost: 200.0,
            rental_capacity_kg: 500.0,
        }
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
