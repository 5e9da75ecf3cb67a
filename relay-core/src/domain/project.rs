//! Project domain types

use serde::Deserialize;
use std::fmt;

/// A downstream project rebuilt when one of its dependencies is updated
///
/// Loaded fresh from the project list on every notification and never mutated.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub name: String,
    /// Project id in GitLab
    pub id: u64,
    /// Pipeline trigger token. Never logged.
    pub token: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// Coordinates of a published artifact a project depends on
///
/// Versions are deliberately absent: any version of the artifact matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dependency {
    #[serde(rename = "groupId")]
    pub group_id: String,
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Exact, case-sensitive comparison against a component's group and name
    pub fn is(&self, group: &str, name: &str) -> bool {
        self.group_id == group && self.artifact_id == name
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
