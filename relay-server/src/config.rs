//! Server configuration
//!
//! Settings are read once at start-up from flags or environment variables.
//! The secret and the project list are only referenced by path here; their
//! contents are read again on every webhook call.

use clap::Parser;
use relay_core::TriggerPolicy;
use std::path::PathBuf;
use std::time::Duration;

/// Relay configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "relay-server")]
#[command(about = "Triggers GitLab pipelines when Nexus reports an updated dependency", long_about = None)]
pub struct Config {
    /// Address to serve on
    #[arg(long, env = "RELAY_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// File holding the secret Nexus signs its payloads with
    #[arg(long = "secret", env = "RELAY_SECRET", default_value = "./secret")]
    pub secret_path: PathBuf,

    /// URL of the GitLab server
    #[arg(
        long = "gitlab",
        env = "RELAY_GITLAB_URL",
        default_value = "http://gitlab.gitlab.svc"
    )]
    pub gitlab_url: String,

    /// File listing the projects and their dependencies
    #[arg(long = "projects", env = "RELAY_PROJECTS", default_value = "./projects.yaml")]
    pub projects_path: PathBuf,

    /// Branch every triggered pipeline runs on
    #[arg(long = "ref", env = "RELAY_TRIGGER_REF", default_value = "master")]
    pub trigger_ref: String,

    /// Timeout for a single trigger call, in seconds
    #[arg(long, env = "RELAY_TRIGGER_TIMEOUT", default_value_t = 10)]
    pub trigger_timeout: u64,

    /// Trigger each project at most once per event, even if several of its
    /// dependency entries match
    #[arg(long, env = "RELAY_DEDUPE_TRIGGERS")]
    pub dedupe_triggers: bool,
}

impl Config {
    pub fn trigger_timeout(&self) -> Duration {
        Duration::from_secs(self.trigger_timeout)
    }

    pub fn trigger_policy(&self) -> TriggerPolicy {
        if self.dedupe_triggers {
            TriggerPolicy::PerProject
        } else {
            TriggerPolicy::PerCoordinate
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen.is_empty() {
            anyhow::bail!("listen address cannot be empty");
        }

        if !self.gitlab_url.starts_with("http://") && !self.gitlab_url.starts_with("https://") {
            anyhow::bail!("gitlab url must start with http:// or https://");
        }

        if self.trigger_ref.trim().is_empty() {
            anyhow::bail!("trigger ref cannot be empty");
        }

        if self.trigger_timeout == 0 {
            anyhow::bail!("trigger_timeout must be greater than 0");
        }

        Ok(())
    }
}
