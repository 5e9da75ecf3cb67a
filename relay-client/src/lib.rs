//! Relay HTTP Client
//!
//! A small, type-safe client for GitLab's pipeline trigger API.
//!
//! The server holds it behind the [`PipelineTrigger`] trait so the request
//! handling code does not depend on the transport.
//!
//! # Example
//!
//! ```no_run
//! use relay_client::{GitLabClient, PipelineTrigger};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), relay_client::TriggerError> {
//!     let client = GitLabClient::new("http://gitlab.example.com", "master", Duration::from_secs(10))?;
//!     client.trigger_pipeline(42, "abcTOKENabcDEfghiV").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod pipelines;

pub use error::{Result, TriggerError};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Something that can start a CI pipeline for a project
///
/// Not idempotent: every successful call starts one more pipeline run.
#[async_trait]
pub trait PipelineTrigger: Send + Sync {
    /// Starts a pipeline for the given project, authenticated by its trigger token
    async fn trigger_pipeline(&self, project_id: u64, token: &str) -> Result<()>;
}

/// HTTP client for the GitLab pipeline trigger API
#[derive(Debug, Clone)]
pub struct GitLabClient {
    /// Base URL of the GitLab server (e.g., "http://gitlab.gitlab.svc")
    base_url: String,
    /// Branch every pipeline is started on
    git_ref: String,
    /// HTTP client instance
    client: Client,
}

impl GitLabClient {
    /// Create a new client whose calls give up after `timeout`
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the GitLab server
    /// * `git_ref` - Branch or tag passed as `ref` to every trigger
    /// * `timeout` - Per-call timeout, covering connect, send and response
    pub fn new(
        base_url: impl Into<String>,
        git_ref: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriggerError::Client(e.to_string()))?;

        Ok(Self::with_client(base_url, git_ref, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        git_ref: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            git_ref: git_ref.into(),
            client,
        }
    }

    /// Check the status code and drain the response body
    ///
    /// GitLab answers a trigger with the created pipeline as JSON; the relay
    /// has no use for it, but reading it to the end is what completes the call.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TriggerError::api_error(status.as_u16(), error_text));
        }

        response.bytes().await?;
        Ok(())
    }
}
