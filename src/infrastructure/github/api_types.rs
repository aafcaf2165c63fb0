use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Artifact, RunConclusion, RunId, RunStatus, WorkflowRun};

#[derive(Debug, Deserialize)]
pub struct WorkflowRunsPage {
    #[serde(default)]
    pub workflow_runs: Vec<ApiWorkflowRun>,
}

#[derive(Debug, Deserialize)]
pub struct ApiWorkflowRun {
    pub id: u64,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub run_started_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactsPage {
    #[serde(default)]
    pub artifacts: Vec<ApiArtifact>,
}

#[derive(Debug, Deserialize)]
pub struct ApiArtifact {
    pub name: String,
    pub archive_download_url: String,
    #[serde(default)]
    pub expired: bool,
}

impl From<ApiWorkflowRun> for WorkflowRun {
    fn from(run: ApiWorkflowRun) -> Self {
        // GitHub also reports requested/waiting/pending; none of those are terminal.
        let status = match run.status.as_deref() {
            Some("completed") => RunStatus::Completed,
            Some("in_progress") => RunStatus::InProgress,
            _ => RunStatus::Queued,
        };

        // timed_out, skipped, neutral, stale and action_required all count as not-success.
        let conclusion = match run.conclusion.as_deref() {
            None => None,
            Some("success") => Some(RunConclusion::Success),
            Some("cancelled") => Some(RunConclusion::Cancelled),
            Some(_) => Some(RunConclusion::Failure),
        };

        WorkflowRun {
            run_id: RunId::new(run.id),
            status,
            conclusion,
            started_at: run.run_started_at.or(run.created_at),
        }
    }
}

impl From<ApiArtifact> for Artifact {
    fn from(artifact: ApiArtifact) -> Self {
        Artifact {
            name: artifact.name,
            download_url: artifact.archive_download_url,
        }
    }
}
