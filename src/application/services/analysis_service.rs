use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    ArchiveReader, BackendTarget, PayloadStager, StageError, WorkflowBackend,
};
use crate::domain::{AnalysisPhase, AnalysisRequest, CorrelationId, PredictionResult, StagedPayload};

use super::{
    ArtifactResolver, Dispatcher, PollOutcome, PollSettings, Poller, ResultExtractor,
    StagedPayloadGuard,
};

/// Everything the orchestrator needs to know about the remote backend, built once at startup.
#[derive(Clone)]
pub struct OrchestratorConfig {
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub dispatch_event_type: String,
    pub poll: PollSettings,
}

impl OrchestratorConfig {
    pub fn target(&self) -> Result<BackendTarget, AnalysisError> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AnalysisError::Config("GitHub token not configured".to_string()))?;

        Ok(BackendTarget::new(&self.owner, &self.repo, token))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("staging failed for {correlation_id}: {source}")]
    Stage {
        correlation_id: CorrelationId,
        #[source]
        source: StageError,
    },
    #[error("dispatch failed for {correlation_id}: {details}")]
    Dispatch {
        correlation_id: CorrelationId,
        details: String,
    },
    #[error("analysis timed out for {correlation_id}")]
    TimedOut { correlation_id: CorrelationId },
    #[error("malformed result for {correlation_id}: {details}")]
    Malformed {
        correlation_id: CorrelationId,
        details: String,
    },
}

impl AnalysisError {
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        match self {
            AnalysisError::Config(_) | AnalysisError::Validation(_) => None,
            AnalysisError::Stage { correlation_id, .. }
            | AnalysisError::Dispatch { correlation_id, .. }
            | AnalysisError::TimedOut { correlation_id }
            | AnalysisError::Malformed { correlation_id, .. } => Some(correlation_id),
        }
    }
}

pub struct AnalysisService {
    config: OrchestratorConfig,
    stager: Arc<dyn PayloadStager>,
    dispatcher: Dispatcher,
    poller: Poller,
}

impl AnalysisService {
    pub fn new(
        config: OrchestratorConfig,
        backend: Arc<dyn WorkflowBackend>,
        stager: Arc<dyn PayloadStager>,
        archive_reader: Arc<dyn ArchiveReader>,
    ) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&backend), config.dispatch_event_type.clone());
        let poller = Poller::new(
            Arc::clone(&backend),
            ArtifactResolver::new(Arc::clone(&backend)),
            ResultExtractor::new(Arc::clone(&backend), archive_reader),
            config.poll.clone(),
        );

        Self {
            config,
            stager,
            dispatcher,
            poller,
        }
    }

    /// Fails fast when the backend credential is absent, before any payload is read.
    pub fn ensure_configured(&self) -> Result<(), AnalysisError> {
        self.config.target().map(|_| ())
    }

    #[tracing::instrument(
        skip_all,
        fields(correlation_id = tracing::field::Empty, bytes = payload.len())
    )]
    pub async fn analyze(&self, payload: Bytes) -> Result<PredictionResult, AnalysisError> {
        let target = self.config.target()?;

        if payload.is_empty() {
            return Err(AnalysisError::Validation("No audio file".to_string()));
        }

        let request = AnalysisRequest::new(payload);
        let correlation_id = request.correlation_id.clone();
        tracing::Span::current().record("correlation_id", tracing::field::display(&correlation_id));
        log_phase(AnalysisPhase::Created);

        tracing::info!(bytes = request.size_bytes(), "Starting analysis");

        let staged = match self.stager.stage(&request).await {
            Ok(staged) => staged,
            Err(source) => {
                log_phase(AnalysisPhase::StageFailed);
                tracing::error!(error = %source, "Failed to stage payload");
                return Err(AnalysisError::Stage {
                    correlation_id,
                    source,
                });
            }
        };
        log_phase(AnalysisPhase::Staged);

        let guard = StagedPayloadGuard::new(Arc::clone(&self.stager), staged);
        let result = self.run_staged(&target, &correlation_id, guard.staged()).await;

        guard.release().await;
        log_phase(AnalysisPhase::CleanedUp);
        log_phase(AnalysisPhase::Done);

        result
    }

    async fn run_staged(
        &self,
        target: &BackendTarget,
        correlation_id: &CorrelationId,
        staged: &StagedPayload,
    ) -> Result<PredictionResult, AnalysisError> {
        let outcome = self.dispatcher.dispatch(target, correlation_id, staged).await;
        if !outcome.accepted {
            log_phase(AnalysisPhase::DispatchFailed);
            return Err(AnalysisError::Dispatch {
                correlation_id: correlation_id.clone(),
                details: outcome.error.unwrap_or_default(),
            });
        }
        log_phase(AnalysisPhase::Dispatched);

        tracing::info!(
            deadline_secs = self.config.poll.deadline.as_secs(),
            "Workflow triggered, waiting for completion"
        );
        log_phase(AnalysisPhase::Polling);

        match self.poller.poll(target, correlation_id).await {
            PollOutcome::Resolved(resolved) => {
                log_phase(AnalysisPhase::Resolved);
                tracing::info!(
                    run_id = %resolved.run.run_id,
                    prediction = %resolved.result.label,
                    confidence = resolved.result.confidence,
                    "Analysis completed"
                );
                Ok(resolved.result)
            }
            PollOutcome::Malformed {
                run_id,
                artifact,
                reason,
            } => {
                log_phase(AnalysisPhase::Malformed);
                Err(AnalysisError::Malformed {
                    correlation_id: correlation_id.clone(),
                    details: format!("run {} artifact {}: {}", run_id, artifact, reason),
                })
            }
            PollOutcome::TimedOut(stats) => {
                log_phase(AnalysisPhase::TimedOut);
                tracing::warn!(
                    ticks = stats.ticks,
                    transient_failures = stats.transient_failures,
                    "Analysis timed out"
                );
                Err(AnalysisError::TimedOut {
                    correlation_id: correlation_id.clone(),
                })
            }
        }
    }
}

fn log_phase(phase: AnalysisPhase) {
    if phase.is_terminal() {
        tracing::info!(phase = %phase, "Analysis phase");
    } else {
        tracing::debug!(phase = %phase, "Analysis phase");
    }
}
