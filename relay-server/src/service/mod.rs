//! Service Module
//!
//! Business logic behind the webhook endpoint.
//! Each step of a webhook call lives in its own service so it can be tested
//! without going through HTTP.

pub mod notify;
pub mod projects;
pub mod secret;
pub mod signature;

// Re-export for convenience
pub use notify as notify_service;
pub use projects as project_service;
pub use secret as secret_service;
pub use signature as signature_service;
