//! API Error Handling
//!
//! Maps every failure of a webhook call onto a status code and the
//! `{"error": "true"}` body Nexus expects.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use relay_core::DecodeError;
use tokio::task::JoinError;

use crate::api::nexus::WebhookResponse;
use crate::service::notify_service::NotifyError;
use crate::service::secret_service::SecretError;
use crate::service::signature_service::SignatureError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// The shared secret could not be loaded. Answered with an empty body.
    SecretUnavailable(SecretError),
    /// Unsigned, wrongly signed or undecodable request
    BadRequest(String),
    /// Authentic event whose action is not acted upon
    Ignored(String),
    /// Loading projects or triggering pipelines failed
    NotifyFailed(NotifyError),
    /// The trigger task panicked or was cancelled
    NotifyAborted(JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::SecretUnavailable(err) => {
                tracing::error!("Failed to load secret: {}", err);
                return (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, "application/json")],
                )
                    .into_response();
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Failed to parse input: {}", msg);
                StatusCode::BAD_REQUEST
            }
            ApiError::Ignored(action) => {
                tracing::info!("Only allowing UPDATED action: action is {}", action);
                StatusCode::OK
            }
            ApiError::NotifyFailed(err) => {
                tracing::error!("Failed to notify GitLab: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotifyAborted(err) => {
                tracing::error!("Trigger task did not complete: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(WebhookResponse::failure())).into_response()
    }
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        ApiError::NotifyFailed(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
