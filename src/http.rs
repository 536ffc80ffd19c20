//! Transport Layer: the thin axum HTTP surface over the solver core.
//! `health`, `optimize`, `validate`, request-id middleware and permissive
//! CORS, grounded on the teacher's `handlers.rs` pattern and on
//! `main.py`'s `request_id_middleware` / CORS setup.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api_types::OptimizerInput;
use crate::error::OptimizerError;
use crate::validate::validate_input;

const REQUEST_ID_HEADER: &str = "x-request-id";

impl IntoResponse for OptimizerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: "internal_error".to_string(), message: self.to_string() }))
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Echoes an incoming `x-request-id` or generates a fresh one, attaching
/// it to both the tracing span and the response headers.
async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.headers_mut().insert(
        REQUEST_ID_HEADER,
        HeaderValue::from_str(&request_id).unwrap_or_else(|_| HeaderValue::from_static("invalid")),
    );

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "service": "optimizer"}))
}

async fn optimize(body: Result<Json<OptimizerInput>, axum::extract::rejection::JsonRejection>) -> Response {
    let Json(input) = match body {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "optimize rejected malformed input");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: "invalid_input".to_string(), message: rejection.to_string() }),
            )
                .into_response();
        }
    };

    let started = Instant::now();
    info!(
        problem_type = %input.problem_type,
        station_count = input.stations.len(),
        vehicle_count = input.vehicles.len(),
        "optimize start"
    );

    match crate::solver::solve(&input) {
        Ok(output) => {
            info!(execution_time_ms = started.elapsed().as_secs_f64() * 1000.0, success = output.success, "optimize done");
            Json(output).into_response()
        }
        Err(err) => {
            warn!(error = %err, "optimize encountered an internal error");
            err.into_response()
        }
    }
}

async fn validate(Json(input): Json<OptimizerInput>) -> Json<crate::validate::ValidateResponse> {
    Json(validate_input(&input))
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/optimize", post(optimize))
        .route("/validate", post(validate))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
}
