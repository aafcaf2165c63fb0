use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

use crate::application::ports::{PayloadStager, StageError};
use crate::domain::{AnalysisRequest, StagedPayload};

/// Embeds the payload in the dispatch event itself. Nothing remote is created.
pub struct InlinePayloadStager;

#[async_trait]
impl PayloadStager for InlinePayloadStager {
    async fn stage(&self, request: &AnalysisRequest) -> Result<StagedPayload, StageError> {
        if request.payload.is_empty() {
            return Err(StageError::EmptyPayload);
        }

        let encoded = general_purpose::STANDARD.encode(&request.payload);
        tracing::debug!(encoded_len = encoded.len(), "Payload encoded inline");

        Ok(StagedPayload::Inline { encoded })
    }

    async fn unstage(&self, _staged: &StagedPayload) {}
}
