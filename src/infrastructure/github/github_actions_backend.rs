use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::application::ports::{BackendError, BackendTarget, DispatchEvent, WorkflowBackend};
use crate::domain::{Artifact, RunId, WorkflowRun};
use crate::infrastructure::observability::sanitize_backend_message;

use super::api_types::{ArtifactsPage, WorkflowRunsPage};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub Actions as a poll-only job runner: `repository_dispatch` to trigger,
/// run and artifact listings to observe.
pub struct GitHubActionsBackend {
    client: Client,
    api_base_url: String,
}

impl GitHubActionsBackend {
    pub fn new(api_base_url: Option<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Request(format!("client build: {}", e)))?;

        Ok(Self {
            client,
            api_base_url: api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn repo_url(&self, target: &BackendTarget, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base_url, target.owner, target.repo, path
        )
    }

    fn authorized(&self, builder: RequestBuilder, target: &BackendTarget) -> RequestBuilder {
        builder
            .bearer_auth(target.token())
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BackendError::Rejected {
                status,
                body: sanitize_backend_message(&body),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        target: &BackendTarget,
        builder: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.send(self.authorized(builder, target)).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("parse: {}", e)))
    }
}

#[async_trait]
impl WorkflowBackend for GitHubActionsBackend {
    async fn trigger(
        &self,
        target: &BackendTarget,
        event: &DispatchEvent,
    ) -> Result<(), BackendError> {
        let url = self.repo_url(target, "dispatches");
        self.send(self.authorized(self.client.post(&url), target).json(event))
            .await?;

        tracing::debug!(
            owner = %target.owner,
            repo = %target.repo,
            event_type = %event.event_type,
            "repository_dispatch accepted"
        );
        Ok(())
    }

    async fn list_runs(
        &self,
        target: &BackendTarget,
        event_filter: &str,
        per_page: u8,
    ) -> Result<Vec<WorkflowRun>, BackendError> {
        let url = self.repo_url(target, "actions/runs");
        let request = self
            .client
            .get(&url)
            .query(&[("event", event_filter.to_string()), ("per_page", per_page.to_string())]);
        let page: WorkflowRunsPage = self.get_json(target, request).await?;
        Ok(page.workflow_runs.into_iter().map(WorkflowRun::from).collect())
    }

    async fn list_artifacts(
        &self,
        target: &BackendTarget,
        run_id: RunId,
    ) -> Result<Vec<Artifact>, BackendError> {
        let url = self.repo_url(target, &format!("actions/runs/{}/artifacts", run_id));
        let page: ArtifactsPage = self.get_json(target, self.client.get(&url)).await?;
        Ok(page
            .artifacts
            .into_iter()
            .filter(|a| !a.expired)
            .map(Artifact::from)
            .collect())
    }

    async fn download_artifact(
        &self,
        target: &BackendTarget,
        artifact: &Artifact,
    ) -> Result<Bytes, BackendError> {
        // GitHub answers with a redirect to blob storage; reqwest drops the
        // Authorization header when the redirect leaves the API host.
        let response = self
            .send(self.authorized(self.client.get(&artifact.download_url), target))
            .await?;
        response
            .bytes()
            .await
            .map_err(|e| BackendError::Request(format!("body: {}", e)))
    }
}
