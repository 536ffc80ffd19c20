//! Distance Oracle: the sole source of geometric truth for the solver.
//!
//! Every route-cost and 2-opt decision goes through [`DistanceOracle`]; no
//! other component recomputes geometric distance. Grounded on the
//! teacher's `distance.rs` (which held the matrix-building/haversine
//! logic for its `DistanceMethod` enum), generalized here to the
//! directional-lookup-with-fallback policy this spec requires.

use std::collections::HashMap;

use crate::model::StationInfo;

const EARTH_RADIUS_KM: f64 = 6371.0;
const ROAD_WINDING_FACTOR: f64 = 1.3;
const FALLBACK_SPEED_KMH: f64 = 50.0;
const UNKNOWN_ENDPOINT_DISTANCE_KM: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct DistanceEntry {
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub polyline: String,
}

pub struct DistanceOracle {
    matrix: HashMap<String, DistanceEntry>,
    coords: HashMap<String, (f64, f64)>,
}

fn key(a: &str, b: &str) -> String {
    format!("{a}_{b}")
}

impl DistanceOracle {
    /// `entries` is the raw `"fromId_toId" -> DistanceInfo` wire map.
    /// `locations` supplies lat/lon for every hub/station id, used for the
    /// Haversine fallback.
    pub fn new(entries: HashMap<String, DistanceEntry>, locations: &[StationInfo]) -> Self {
        let coords = locations
            .iter()
            .map(|l| (l.id.clone(), (l.lat, l.lon)))
            .collect();
        Self { matrix: entries, coords }
    }

    fn known(&self, id: &str) -> bool {
        self.coords.contains_key(id)
    }

    fn lookup(&self, a: &str, b: &str) -> Option<&DistanceEntry> {
        self.matrix
            .get(&key(a, b))
            .or_else(|| self.matrix.get(&key(b, a)))
    }

    fn haversine_km(&self, a: &str, b: &str) -> f64 {
        let (Some(&(lat1, lon1)), Some(&(lat2, lon2))) = (self.coords.get(a), self.coords.get(b))
        else {
            return UNKNOWN_ENDPOINT_DISTANCE_KM;
        };
        let (lat1r, lat2r) = (lat1.to_radians(), lat2.to_radians());
        let dlat = (lat2 - lat1).to_radians();
        let dlon = (lon2 - lon1).to_radians();
        let h = (dlat / 2.0).sin().powi(2) + lat1r.cos() * lat2r.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().asin();
        EARTH_RADIUS_KM * c * ROAD_WINDING_FACTOR
    }

    pub fn distance(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 0.0;
        }
        if !self.known(a) || !self.known(b) {
            return UNKNOWN_ENDPOINT_DISTANCE_KM;
        }
        if let Some(e) = self.lookup(a, b) {
            return e.distance_km;
        }
        self.haversine_km(a, b)
    }

    pub fn duration(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 0.0;
        }
        if !self.known(a) || !self.known(b) {
            return self.distance(a, b) / FALLBACK_SPEED_KMH * 60.0;
        }
        if let Some(e) = self.lookup(a, b) {
            return e.duration_minutes;
        }
        self.distance(a, b) / FALLBACK_SPEED_KMH * 60.0
    }

    pub fn polyline(&self, a: &str, b: &str) -> String {
        if a == b {
            return String::new();
        }
        match self.lookup(a, b) {
            Some(e) => e.polyline.clone(),
            None => String::new(),
        }
    }
}
