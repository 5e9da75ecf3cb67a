//! Notify Service
//!
//! Triggers a pipeline for every project that depends on an updated artifact.

use relay_client::PipelineTrigger;
use relay_core::{ArtifactEvent, TriggerPolicy, match_projects};
use std::path::Path;
use thiserror::Error;

use crate::service::project_service::{self, ConfigError};

/// Failure of the match-and-trigger stage
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to load projects: {0}")]
    Config(#[from] ConfigError),

    #[error("{failed} of {attempted} pipeline trigger(s) failed")]
    Trigger { failed: usize, attempted: usize },
}

pub type Result<T> = std::result::Result<T, NotifyError>;

/// Trigger pipelines of all projects depending on the event's component
///
/// The project list is read from `projects_path` on every call. Triggers are
/// issued one after another in configuration order; a failed trigger is
/// logged and does not stop the remaining ones. Returns the number of
/// pipelines started.
pub async fn notify_dependents(
    projects_path: &Path,
    policy: TriggerPolicy,
    trigger: &dyn PipelineTrigger,
    event: &ArtifactEvent,
) -> Result<usize> {
    tracing::info!(
        "Notifying dependents of {}:{} {}",
        event.component.group,
        event.component.name,
        event.component.version
    );

    let projects = project_service::load_projects(projects_path).await?;
    let matched = match_projects(event, &projects, policy);

    if matched.is_empty() {
        tracing::debug!("No project depends on {}:{}", event.component.group, event.component.name);
        return Ok(0);
    }

    let mut failed = 0;
    for project in &matched {
        tracing::info!("Trigger pipeline {} {}", project.name, project.id);

        if let Err(e) = trigger.trigger_pipeline(project.id, &project.token).await {
            tracing::error!("Failed to trigger pipeline of {}: {}", project.name, e);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(NotifyError::Trigger {
            failed,
            attempted: matched.len(),
        });
    }

    Ok(matched.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_client::TriggerError;
    use relay_core::Component;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every trigger; fails for the configured project ids
    #[derive(Default)]
    struct RecordingTrigger {
        calls: Mutex<Vec<(u64, String)>>,
        failing: Vec<u64>,
    }

    #[async_trait]
    impl PipelineTrigger for RecordingTrigger {
        async fn trigger_pipeline(&self, project_id: u64, token: &str) -> relay_client::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((project_id, token.to_string()));

            if self.failing.contains(&project_id) {
                return Err(TriggerError::api_error(500, "boom"));
            }
            Ok(())
        }
    }

    impl RecordingTrigger {
        fn ids(&self) -> Vec<u64> {
            self.calls.lock().unwrap().iter().map(|(id, _)| *id).collect()
        }
    }

    const PROJECTS: &str = r#"
- name: first
  id: 1
  token: token-1
  dependencies:
    - groupId: com.group
      artifactId: some-project
    - groupId: com.group
      artifactId: some-project
- name: unrelated
  id: 2
  token: token-2
  dependencies:
    - groupId: com.group
      artifactId: other-project
- name: third
  id: 3
  token: token-3
  dependencies:
    - groupId: com.group
      artifactId: some-project
"#;

    fn write_projects(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.yaml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn event(name: &str) -> ArtifactEvent {
        ArtifactEvent {
            timestamp: String::new(),
            node_id: String::new(),
            initiator: "admin".to_string(),
            repository_name: "maven-releases".to_string(),
            action: "UPDATED".to_string(),
            component: Component {
                id: String::new(),
                format: "maven2".to_string(),
                name: name.to_string(),
                group: "com.group".to_string(),
                version: "1.0.0".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_triggers_once_per_matching_coordinate() {
        let (_dir, path) = write_projects(PROJECTS);
        let trigger = RecordingTrigger::default();

        let started = notify_dependents(
            &path,
            TriggerPolicy::PerCoordinate,
            &trigger,
            &event("some-project"),
        )
        .await
        .unwrap();

        assert_eq!(started, 3);
        assert_eq!(trigger.ids(), vec![1, 1, 3]);
        assert_eq!(trigger.calls.lock().unwrap()[2].1, "token-3");
    }

    #[tokio::test]
    async fn test_dedupe_policy_triggers_once_per_project() {
        let (_dir, path) = write_projects(PROJECTS);
        let trigger = RecordingTrigger::default();

        let started = notify_dependents(
            &path,
            TriggerPolicy::PerProject,
            &trigger,
            &event("some-project"),
        )
        .await
        .unwrap();

        assert_eq!(started, 2);
        assert_eq!(trigger.ids(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_no_match_triggers_nothing() {
        let (_dir, path) = write_projects(PROJECTS);
        let trigger = RecordingTrigger::default();

        let started = notify_dependents(
            &path,
            TriggerPolicy::default(),
            &trigger,
            &event("unknown"),
        )
        .await
        .unwrap();

        assert_eq!(started, 0);
        assert!(trigger.ids().is_empty());
    }

    #[tokio::test]
    async fn test_failed_trigger_does_not_stop_others() {
        let (_dir, path) = write_projects(PROJECTS);
        let trigger = RecordingTrigger {
            failing: vec![1],
            ..Default::default()
        };

        let result = notify_dependents(
            &path,
            TriggerPolicy::default(),
            &trigger,
            &event("some-project"),
        )
        .await;

        assert!(matches!(
            result,
            Err(NotifyError::Trigger {
                failed: 2,
                attempted: 3
            })
        ));
        assert_eq!(trigger.ids(), vec![1, 1, 3]);
    }

    #[tokio::test]
    async fn test_unreadable_projects() {
        let dir = tempfile::tempdir().unwrap();
        let trigger = RecordingTrigger::default();

        let result = notify_dependents(
            &dir.path().join("missing.yaml"),
            TriggerPolicy::default(),
            &trigger,
            &event("some-project"),
        )
        .await;

        assert!(matches!(result, Err(NotifyError::Config(_))));
        assert!(trigger.ids().is_empty());
    }

    #[tokio::test]
    async fn test_project_list_is_read_fresh() {
        let (_dir, path) = write_projects("[]");
        let trigger = RecordingTrigger::default();

        let started = notify_dependents(&path, TriggerPolicy::default(), &trigger, &event("some-project"))
            .await
            .unwrap();
        assert_eq!(started, 0);

        std::fs::write(&path, PROJECTS).unwrap();
        let started = notify_dependents(&path, TriggerPolicy::default(), &trigger, &event("some-project"))
            .await
            .unwrap();
        assert_eq!(started, 3);
    }
}
