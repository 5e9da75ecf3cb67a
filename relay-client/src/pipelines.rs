//! Pipeline trigger endpoint

use crate::error::Result;
use crate::{GitLabClient, PipelineTrigger};
use async_trait::async_trait;
use serde::Serialize;

/// Form body of `POST /api/v4/projects/{id}/trigger/pipeline`
#[derive(Serialize)]
struct TriggerForm<'a> {
    token: &'a str,
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

impl GitLabClient {
    /// Build the trigger URL for a project
    fn trigger_url(&self, project_id: u64) -> String {
        format!(
            "{}/api/v4/projects/{}/trigger/pipeline",
            self.base_url, project_id
        )
    }
}

#[async_trait]
impl PipelineTrigger for GitLabClient {
    async fn trigger_pipeline(&self, project_id: u64, token: &str) -> Result<()> {
        let url = self.trigger_url(project_id);
        tracing::debug!("Triggering pipeline: project={} ref={}", project_id, self.git_ref);

        let response = self
            .client
            .post(&url)
            .form(&TriggerForm {
                token,
                git_ref: &self.git_ref,
            })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
