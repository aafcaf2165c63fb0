use std::sync::Arc;

use crate::application::ports::PayloadStager;
use crate::domain::StagedPayload;

/// Owns a staged payload until it is released.
///
/// `release` unstages exactly once. If the guard is dropped without being released
/// (the request future was cancelled) the unstage is spawned onto the runtime instead.
pub struct StagedPayloadGuard {
    stager: Arc<dyn PayloadStager>,
    staged: StagedPayload,
    released: bool,
}

impl StagedPayloadGuard {
    pub fn new(stager: Arc<dyn PayloadStager>, staged: StagedPayload) -> Self {
        Self {
            stager,
            staged,
            released: false,
        }
    }

    pub fn staged(&self) -> &StagedPayload {
        &self.staged
    }

    /// If this future is dropped mid-unstage, `Drop` schedules the unstage again.
    pub async fn release(mut self) {
        self.stager.unstage(&self.staged).await;
        self.released = true;
        tracing::debug!(backing = %self.staged.backing(), "Staged payload released");
    }
}

impl Drop for StagedPayloadGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let stager = Arc::clone(&self.stager);
        let staged = self.staged.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(
                    backing = %staged.backing(),
                    "Staged payload dropped without release, cleaning up in background"
                );
                handle.spawn(async move {
                    stager.unstage(&staged).await;
                });
            }
            Err(_) => {
                tracing::error!(
                    reference = %staged.reference(),
                    "Staged payload dropped outside a runtime, cleanup skipped"
                );
            }
        }
    }
}
