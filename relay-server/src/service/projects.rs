//! Project Service
//!
//! Loads the list of downstream projects from YAML.
//! Nothing is cached: every webhook call reads the file again, so edits take
//! effect on the next notification.

use relay_core::Project;
use std::path::Path;
use thiserror::Error;

/// Failure to load the project list
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read project list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed project list: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid project list: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Read and parse the project list at `path`
pub async fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let projects = parse_projects(&content)?;
    tracing::debug!("Loaded {} project(s) from {}", projects.len(), path.display());

    Ok(projects)
}

/// Parse a YAML sequence of projects
///
/// An empty document is an empty list.
pub fn parse_projects(content: &str) -> Result<Vec<Project>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let projects: Vec<Project> = serde_yaml::from_str(content)?;
    for (index, project) in projects.iter().enumerate() {
        validate_project(index, project)?;
    }

    Ok(projects)
}

// =============================================================================
// Validation
// =============================================================================

fn validate_project(index: usize, project: &Project) -> Result<()> {
    if project.name.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "project #{} has an empty name",
            index
        )));
    }

    if project.id == 0 {
        return Err(ConfigError::Invalid(format!(
            "project {} must have a positive id",
            project.name
        )));
    }

    Ok(())
}
