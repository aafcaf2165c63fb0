use async_trait::async_trait;

use crate::domain::{AnalysisRequest, StagedPayload};

use super::StagingStoreError;

/// Makes a request's payload reachable by the remote backend and owns whatever that created.
#[async_trait]
pub trait PayloadStager: Send + Sync {
    async fn stage(&self, request: &AnalysisRequest) -> Result<StagedPayload, StageError>;

    /// Idempotent and infallible: failures are logged, never returned.
    async fn unstage(&self, staged: &StagedPayload);
}

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("empty payload")]
    EmptyPayload,
    #[error("staging store error: {0}")]
    Store(#[from] StagingStoreError),
}
