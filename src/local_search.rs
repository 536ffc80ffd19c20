//! 2-opt Improver: first-improvement local search over a single route.

use crate::distance::DistanceOracle;
use crate::metrics::route_distance;
use crate::model::{Route, EPSILON};

/// Repeatedly looks for a segment reversal `[i+1..=j]` that strictly
/// shortens the route, accepts the first one found, and restarts the
/// scan. Terminates when a full scan finds no improvement. Returns the
/// (possibly) improved route and the number of accepted moves.
pub fn two_opt(oracle: &DistanceOracle, hub_id: &str, route: Route) -> (Route, usize) {
    let mut route = route;
    let mut iterations = 0usize;

    if route.len() < 3 {
        return (route, iterations);
    }

    'restart: loop {
        let current_distance = route_distance(oracle, &route, hub_id);
        let n = route.len();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 2)..n {
                let mut candidate = route.clone();
                candidate[i + 1..=j].reverse();
                let candidate_distance = route_distance(oracle, &candidate, hub_id);
                if candidate_distance + EPSILON < current_distance {
                    route = candidate;
                    iterations += 1;
                    continue 'restart;
                }
            }
        }
        break;
    }

    (route, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceEntry;
    use crate::model::{Cargo, StationInfo, StopAssignment};
    use std::collections::HashMap;

    fn stop(id: &str) -> StopAssignment {
        StopAssignment {
            station: StationInfo { id: id.into(), name: id.into(), code: id.into(), lat: 0.0, lon: 0.0 },
            cargos: vec![Cargo { id: format!("c-{id}"), user_id: "u".into(), weight_kg: 1.0 }],
            weight_kg: 1.0,
        }
    }

    fn oracle_grid() -> DistanceOracle {
        // H, A, B, C, D placed so the naive order H-A-C-B-D-H crosses itself
        // and swapping the middle segment (C,B) -> (B,C) uncrosses it.
        let mut m = HashMap::new();
        let mut put = |a: &str, b: &str, d: f64| {
            m.insert(format!("{a}_{b}"), DistanceEntry { distance_km: d, duration_minutes: d, polyline: String::new() });
        };
        put("A", "C", 10.0);
        put("C", "B", 10.0);
        put("B", "D", 10.0);
        put("D", "H", 1.0);
        put("A", "B", 1.0);
        put("B", "C", 1.0);
        put("C", "D", 1.0);
        let locs = ["H", "A", "B", "C", "D"]
            .iter()
            .map(|id| StationInfo { id: (*id).into(), name: (*id).into(), code: (*id).into(), lat: 0.0, lon: 0.0 })
            .collect::<Vec<_>>();
        DistanceOracle::new(m, &locs)
    }

    #[test]
    fn never_increases_distance() {
        let oracle = oracle_grid();
        let route = vec![stop("A"), stop("C"), stop("B"), stop("D")];
        let before = route_distance(&oracle, &route, "H");
        let (improved, _) = two_opt(&oracle, "H", route);
        let after = route_distance(&oracle, &improved, "H");
        assert!(after <= before + EPSILON);
    }

    #[test]
    fn improves_a_crossed_route() {
        let oracle = oracle_grid();
        let route = vec![stop("A"), stop("C"), stop("B"), stop("D")];
        let before = route_distance(&oracle, &route, "H");
        let (improved, iterations) = two_opt(&oracle, "H", route);
        let after = route_distance(&oracle, &improved, "H");
        assert!(after < before);
        assert!(iterations > 0);
    }

    #[test]
    fn short_routes_are_untouched() {
        let oracle = oracle_grid();
        let route = vec![stop("A")];
        let (improved, iterations) = two_opt(&oracle, "H", route.clone());
        assert_eq!(improved.len(), route.len());
        assert_eq!(iterations, 0);
    }
}
