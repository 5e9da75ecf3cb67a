//! Nexus Webhook API Handler
//!
//! Receives Nexus `component` webhooks and triggers the GitLab pipelines of
//! the projects depending on the updated component.
//!
//! Request lifecycle: load secret, verify signature, decode payload, filter
//! by action, match projects, trigger pipelines, respond. Every failure is
//! turned into a response by [`ApiError`]; nothing escapes the request.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use relay_core::ArtifactEvent;
use serde::Serialize;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::{notify_service, secret_service, signature_service};

/// Header carrying the hex-encoded HMAC-SHA1 of the body
pub const SIGNATURE_HEADER: &str = "x-nexus-webhook-signature";

/// Body of every webhook response
///
/// `error` is a string, `"true"` or `"false"`, not a JSON boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookResponse {
    pub error: String,
}

impl WebhookResponse {
    pub fn success() -> Self {
        Self {
            error: "false".to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            error: "true".to_string(),
        }
    }
}

/// POST /nexus
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookResponse>> {
    tracing::info!("Call to /nexus");

    let secret = secret_service::load_secret(&state.secret_path)
        .await
        .map_err(ApiError::SecretUnavailable)?;

    let event = extract_event(&secret, &headers, &body)?;

    if !event.is_update() {
        return Err(ApiError::Ignored(event.action));
    }

    let coordinates = format!("{}:{}", event.component.group, event.component.name);

    // Triggers run on their own task so a client hanging up mid-way cannot
    // cancel the remaining ones.
    let notify = tokio::spawn(async move {
        notify_service::notify_dependents(
            &state.projects_path,
            state.policy,
            state.trigger.as_ref(),
            &event,
        )
        .await
    });

    let started = notify.await.map_err(ApiError::NotifyAborted)??;

    tracing::info!("Started {} pipeline(s) for {}", started, coordinates);

    Ok(Json(WebhookResponse::success()))
}

/// Authenticate the body, then decode it
///
/// The payload is only parsed once its signature has been checked.
fn extract_event(secret: &[u8], headers: &HeaderMap, body: &[u8]) -> ApiResult<ArtifactEvent> {
    let signature = match headers.get(SIGNATURE_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| ApiError::BadRequest("signature header is not valid text".to_string()))?,
        None => "",
    };

    if !signature_service::verify(secret, signature, body)? {
        return Err(ApiError::BadRequest("invalid signature".to_string()));
    }

    Ok(ArtifactEvent::from_slice(body)?)
}
