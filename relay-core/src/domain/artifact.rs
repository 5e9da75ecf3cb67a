//! Artifact-update events
//!
//! Shape of the `component` webhook payload sent by Nexus Repository Manager.

use serde::Deserialize;
use thiserror::Error;

/// The only action that leads to pipelines being triggered
pub const UPDATED_ACTION: &str = "UPDATED";

/// Failure to decode a webhook body into an [`ArtifactEvent`]
#[derive(Debug, Error)]
#[error("Failed to decode artifact event: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Notification that a component in a repository changed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactEvent {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub initiator: String,
    #[serde(default)]
    pub repository_name: String,
    pub action: String,
    pub component: Component,
}

/// The component an event refers to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub format: String,
    /// Artifact id
    pub name: String,
    /// Group id
    pub group: String,
    #[serde(default)]
    pub version: String,
}

impl ArtifactEvent {
    /// Decode a raw (already authenticated) webhook body
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Whether this event should be matched against the project list
    pub fn is_update(&self) -> bool {
        self.action == UPDATED_ACTION
    }
}
