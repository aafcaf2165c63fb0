use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use crate::application::ports::{PayloadStager, StageError, StagingStore, StagingStoreError};
use crate::domain::{AnalysisRequest, StagedPayload, StoragePath};

const PAYLOAD_FILENAME: &str = "audio.wav";

/// Writes the payload to a staging store and hands the backend a URL to fetch it from.
pub struct ExternalPayloadStager {
    store: Arc<dyn StagingStore>,
    public_base_url: String,
}

impl ExternalPayloadStager {
    pub fn new(store: Arc<dyn StagingStore>, public_base_url: &str) -> Self {
        Self {
            store,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, path: &StoragePath) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}

#[async_trait]
impl PayloadStager for ExternalPayloadStager {
    async fn stage(&self, request: &AnalysisRequest) -> Result<StagedPayload, StageError> {
        if request.payload.is_empty() {
            return Err(StageError::EmptyPayload);
        }

        let path = StoragePath::for_request(&request.correlation_id, PAYLOAD_FILENAME);
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![Ok(request.payload.clone())];
        let size = self
            .store
            .store(
                &path,
                Box::pin(stream::iter(chunks)),
                Some(request.payload.len() as u64),
            )
            .await?;

        let url = self.url_for(&path);
        tracing::debug!(path = %path, bytes = size, "Payload staged externally");

        Ok(StagedPayload::External { path, url })
    }

    async fn unstage(&self, staged: &StagedPayload) {
        let StagedPayload::External { path, .. } = staged else {
            return;
        };

        match self.store.delete(path).await {
            Ok(()) => tracing::debug!(path = %path, "Staged payload deleted"),
            Err(StagingStoreError::NotFound(_)) => {
                tracing::debug!(path = %path, "Staged payload already gone")
            }
            Err(e) => tracing::warn!(
                error = %e,
                path = %path,
                "Failed to delete staged payload"
            ),
        }
    }
}
