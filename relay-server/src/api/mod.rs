//! API Module
//!
//! HTTP API layer of the relay.

pub mod error;
pub mod health;
pub mod nexus;

use axum::{
    Router,
    routing::{get, post},
};
use relay_client::PipelineTrigger;
use relay_core::TriggerPolicy;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by all requests
///
/// Only paths are held; the files behind them are read per request.
#[derive(Clone)]
pub struct AppState {
    pub secret_path: PathBuf,
    pub projects_path: PathBuf,
    pub policy: TriggerPolicy,
    pub trigger: Arc<dyn PipelineTrigger>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Nexus webhook
        .route("/nexus", post(nexus::receive_webhook))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
