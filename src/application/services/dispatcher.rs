use std::sync::Arc;

use crate::application::ports::{BackendTarget, ClientPayload, DispatchEvent, WorkflowBackend};
use crate::domain::{CorrelationId, DispatchOutcome, StagedPayload};

pub struct Dispatcher {
    backend: Arc<dyn WorkflowBackend>,
    event_type: String,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn WorkflowBackend>, event_type: String) -> Self {
        Self {
            backend,
            event_type,
        }
    }

    pub fn build_event(&self, correlation_id: &CorrelationId, staged: &StagedPayload) -> DispatchEvent {
        let (audio, audio_url) = match staged {
            StagedPayload::Inline { encoded } => (Some(encoded.clone()), None),
            StagedPayload::External { url, .. } => (None, Some(url.clone())),
        };

        DispatchEvent {
            event_type: self.event_type.clone(),
            client_payload: ClientPayload {
                request_id: correlation_id.as_str().to_string(),
                audio,
                audio_url,
            },
        }
    }

    /// Sends exactly one trigger call. Never retries.
    pub async fn dispatch(
        &self,
        target: &BackendTarget,
        correlation_id: &CorrelationId,
        staged: &StagedPayload,
    ) -> DispatchOutcome {
        let event = self.build_event(correlation_id, staged);

        tracing::debug!(
            event_type = %self.event_type,
            backing = %staged.backing(),
            "Triggering remote workflow"
        );

        match self.backend.trigger(target, &event).await {
            Ok(()) => DispatchOutcome::accepted(),
            Err(e) => {
                tracing::error!(error = %e, "Dispatch failed");
                DispatchOutcome::rejected(e.to_string())
            }
        }
    }
}
