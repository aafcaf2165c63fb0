use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use crate::domain::{Artifact, RunId, WorkflowRun};

/// Repository-equivalent identity of the remote backend plus the credential used to reach it.
#[derive(Clone)]
pub struct BackendTarget {
    pub owner: String,
    pub repo: String,
    token: String,
}

impl BackendTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendTarget")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchEvent {
    pub event_type: String,
    pub client_payload: ClientPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPayload {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Poll-only remote job runner: a trigger endpoint plus listings of finished work.
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    async fn trigger(&self, target: &BackendTarget, event: &DispatchEvent)
    -> Result<(), BackendError>;

    /// Most recent runs first, at most `per_page` of them.
    async fn list_runs(
        &self,
        target: &BackendTarget,
        event_filter: &str,
        per_page: u8,
    ) -> Result<Vec<WorkflowRun>, BackendError>;

    async fn list_artifacts(
        &self,
        target: &BackendTarget,
        run_id: RunId,
    ) -> Result<Vec<Artifact>, BackendError>;

    async fn download_artifact(
        &self,
        target: &BackendTarget,
        artifact: &Artifact,
    ) -> Result<Bytes, BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("backend returned status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
