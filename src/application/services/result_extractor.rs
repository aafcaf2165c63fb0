use std::sync::Arc;

use crate::application::ports::{
    ArchiveError, ArchiveReader, BackendError, BackendTarget, WorkflowBackend,
};
use crate::domain::{Artifact, PredictionResult};

const RESULT_SUFFIX: &str = ".json";

pub struct ResultExtractor {
    backend: Arc<dyn WorkflowBackend>,
    archive_reader: Arc<dyn ArchiveReader>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("artifact download failed: {0}")]
    Download(#[from] BackendError),
    #[error("artifact archive invalid: {0}")]
    Archive(#[from] ArchiveError),
    #[error("result file invalid: {0}")]
    InvalidResult(String),
}

impl ExtractError {
    /// Download failures may clear up on a later tick; anything about the content will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExtractError::Download(_))
    }
}

impl ResultExtractor {
    pub fn new(backend: Arc<dyn WorkflowBackend>, archive_reader: Arc<dyn ArchiveReader>) -> Self {
        Self {
            backend,
            archive_reader,
        }
    }

    pub async fn extract(
        &self,
        target: &BackendTarget,
        artifact: &Artifact,
    ) -> Result<PredictionResult, ExtractError> {
        let archive = self.backend.download_artifact(target, artifact).await?;

        tracing::debug!(
            artifact = %artifact.name,
            bytes = archive.len(),
            "Artifact downloaded"
        );

        let entry = self
            .archive_reader
            .read_entry_with_suffix(&archive, RESULT_SUFFIX)?;

        parse_result(&entry)
    }
}

pub fn parse_result(data: &[u8]) -> Result<PredictionResult, ExtractError> {
    let result: PredictionResult = serde_json::from_slice(data)
        .map_err(|e| ExtractError::InvalidResult(format!("parse: {}", e)))?;
    result.validate().map_err(ExtractError::InvalidResult)?;
    Ok(result)
}
