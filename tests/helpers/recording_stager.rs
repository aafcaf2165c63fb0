use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use cry_relay::application::ports::{PayloadStager, StageError, StagingStoreError};
use cry_relay::domain::{AnalysisRequest, StagedPayload, StoragePath};

/// Stages "externally" without a store and records every call it receives.
#[derive(Default)]
pub struct RecordingStager {
    fail_stage: bool,
    unstage_delay: Option<Duration>,
    stage_calls: AtomicUsize,
    unstage_calls: AtomicUsize,
    completed_unstages: AtomicUsize,
    staged: Mutex<Vec<StagedPayload>>,
}

impl RecordingStager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_stage: true,
            ..Self::default()
        }
    }

    /// Each unstage sleeps for `delay` before it counts as completed.
    pub fn slow_unstage(delay: Duration) -> Self {
        Self {
            unstage_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn stage_calls(&self) -> usize {
        self.stage_calls.load(Ordering::SeqCst)
    }

    pub fn unstage_calls(&self) -> usize {
        self.unstage_calls.load(Ordering::SeqCst)
    }

    pub fn completed_unstages(&self) -> usize {
        self.completed_unstages.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayloadStager for RecordingStager {
    async fn stage(&self, request: &AnalysisRequest) -> Result<StagedPayload, StageError> {
        self.stage_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stage {
            return Err(StageError::Store(StagingStoreError::UploadFailed(
                "store unavailable".to_string(),
            )));
        }
        let path = StoragePath::for_request(&request.correlation_id, "audio.wav");
        let staged = StagedPayload::External {
            url: format!("https://staging.invalid/{}", path),
            path,
        };
        self.staged.lock().unwrap().push(staged.clone());
        Ok(staged)
    }

    async fn unstage(&self, _staged: &StagedPayload) {
        self.unstage_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.unstage_delay {
            tokio::time::sleep(delay).await;
        }
        self.completed_unstages.fetch_add(1, Ordering::SeqCst);
    }
}
