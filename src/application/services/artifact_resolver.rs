use std::sync::Arc;

use crate::application::ports::{BackendError, BackendTarget, WorkflowBackend};
use crate::domain::{Artifact, CorrelationId, WorkflowRun};

pub struct ArtifactResolver {
    backend: Arc<dyn WorkflowBackend>,
}

impl ArtifactResolver {
    pub fn new(backend: Arc<dyn WorkflowBackend>) -> Self {
        Self { backend }
    }

    /// `Ok(None)` means the run belongs to some other request.
    pub async fn resolve(
        &self,
        target: &BackendTarget,
        run: &WorkflowRun,
        correlation_id: &CorrelationId,
    ) -> Result<Option<Artifact>, BackendError> {
        let artifacts = self.backend.list_artifacts(target, run.run_id).await?;
        Ok(select_artifact(artifacts, run, correlation_id))
    }
}

fn select_artifact(
    artifacts: Vec<Artifact>,
    run: &WorkflowRun,
    correlation_id: &CorrelationId,
) -> Option<Artifact> {
    let mut matches = artifacts
        .into_iter()
        .filter(|a| correlation_id.matches_artifact(&a.name));

    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            run_id = %run.run_id,
            artifact = %first.name,
            duplicates = extra,
            "Multiple artifacts match one correlation id, using the first"
        );
    }
    Some(first)
}

