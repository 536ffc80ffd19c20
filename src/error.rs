//! Crate-wide error type.
//!
//! Mirrors the teacher's `VrpError` in shape (a flat `thiserror` enum with
//! one variant per invariant class), but the variants name the invariants
//! this spec actually cares about: a malformed hub, a negative/zero
//! capacity, a cargo with a negative weight. These are all "unexpected"
//! per the error taxonomy in section 7 — they never surface as a
//! structured `OptimizerOutput`, only as a transport-boundary 500. Every
//! variant has a real construction site in `solver.rs::build_internal_model`;
//! there is no catch-all variant, since nothing in the pipeline raises an
//! error that isn't one of these three invariant violations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("missing or malformed hub: {0}")]
    InvalidHub(String),

    #[error("invalid vehicle capacity: {0}")]
    InvalidCapacity(String),

    #[error("malformed cargo: {0}")]
    InvalidCargo(String),
}

pub type OptimizerResult<T> = Result<T, OptimizerError>;
