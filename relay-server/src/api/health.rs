//! Health Check API Handler
//!
//! Liveness probe. Does not touch the secret or the project list, so it stays
//! green while those files are missing or being edited.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
