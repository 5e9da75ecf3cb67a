//! Relay Server
//!
//! Receives Nexus Repository Manager webhooks and triggers the GitLab
//! pipelines of every project depending on the updated component.
//!
//! Architecture:
//! - Configuration: flags or environment, read once at start-up
//! - API: axum routes for `/health` and `/nexus`
//! - Services: secret and project loading, signature checks, triggering

use anyhow::{Context, Result};
use clap::Parser;
use relay_client::GitLabClient;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::config::Config;

pub mod api;
pub mod config;
pub mod service;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relay_server=debug,relay_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Relay Server...");

    let config = Config::parse();
    config.validate()?;

    tracing::info!("secret: {}", config.secret_path.display());
    tracing::info!("listen: {}", config.listen);
    tracing::info!("gitlab: {}", config.gitlab_url);
    tracing::info!("projects: {}", config.projects_path.display());
    tracing::info!(
        "ref: {}, trigger timeout: {:?}, policy: {:?}",
        config.trigger_ref,
        config.trigger_timeout(),
        config.trigger_policy()
    );

    let client = GitLabClient::new(
        config.gitlab_url.clone(),
        config.trigger_ref.clone(),
        config.trigger_timeout(),
    )
    .context("Failed to create GitLab client")?;

    let state = AppState {
        secret_path: config.secret_path.clone(),
        projects_path: config.projects_path.clone(),
        policy: config.trigger_policy(),
        trigger: Arc::new(client),
    };

    // Build router with all API endpoints
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.listen);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
