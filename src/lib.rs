//! Heuristic vehicle routing optimizer for a courier hub-and-station
//! network: a fleet search over owned and rentable vehicles, three
//! constructive strategies plus a limited-only `pack` strategy, a greedy
//! reverse nearest-neighbor route builder with cargo-level splitting, and
//! a 2-opt local search pass.

pub mod api_types;
pub mod candidate;
pub mod config;
pub mod distance;
pub mod error;
pub mod fleet_search;
pub mod greedy;
pub mod hashing;
pub mod http;
pub mod local_search;
pub mod metrics;
pub mod model;
pub mod result;
pub mod solver;
pub mod strategies;
pub mod validate;

pub use error::{OptimizerError, OptimizerResult};
