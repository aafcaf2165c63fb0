use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use cry_relay::application::ports::{BackendError, BackendTarget, DispatchEvent, WorkflowBackend};
use cry_relay::domain::{Artifact, RunConclusion, RunId, RunStatus, WorkflowRun};

const OWN_RUN_ID: u64 = 1000;
const OWN_URL_PREFIX: &str = "mem://own/";

/// In-memory stand-in for a poll-only job runner.
///
/// After a dispatch it exposes one run for the dispatched request id. That run is
/// in progress until the `completes_on_tick`-th run listing, then succeeds with an
/// artifact named after the request id.
pub struct FakeBackend {
    reject_dispatch: Option<u16>,
    completes_on_tick: Option<u32>,
    own_conclusion: RunConclusion,
    archive: Bytes,
    failing_list_calls: HashSet<u32>,
    failing_downloads: u32,
    other_runs: Vec<(WorkflowRun, Vec<(Artifact, Bytes)>)>,
    dispatched: Mutex<Vec<DispatchEvent>>,
    list_calls: AtomicU32,
    download_calls: AtomicU32,
}

pub struct FakeBackendBuilder {
    inner: FakeBackend,
}

impl FakeBackend {
    pub fn builder() -> FakeBackendBuilder {
        FakeBackendBuilder {
            inner: FakeBackend {
                reject_dispatch: None,
                completes_on_tick: None,
                own_conclusion: RunConclusion::Success,
                archive: Bytes::new(),
                failing_list_calls: HashSet::new(),
                failing_downloads: 0,
                other_runs: Vec::new(),
                dispatched: Mutex::new(Vec::new()),
                list_calls: AtomicU32::new(0),
                download_calls: AtomicU32::new(0),
            },
        }
    }

    pub fn dispatched(&self) -> Vec<DispatchEvent> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> u32 {
        self.download_calls.load(Ordering::SeqCst)
    }

    fn own_request_id(&self) -> Option<String> {
        self.dispatched
            .lock()
            .unwrap()
            .last()
            .map(|e| e.client_payload.request_id.clone())
    }
}

impl FakeBackendBuilder {
    pub fn reject_dispatch(mut self, status: u16) -> Self {
        self.inner.reject_dispatch = Some(status);
        self
    }

    pub fn completes_on_tick(mut self, tick: u32) -> Self {
        self.inner.completes_on_tick = Some(tick);
        self
    }

    pub fn own_conclusion(mut self, conclusion: RunConclusion) -> Self {
        self.inner.own_conclusion = conclusion;
        self
    }

    pub fn archive(mut self, archive: Bytes) -> Self {
        self.inner.archive = archive;
        self
    }

    pub fn fail_list_call(mut self, call: u32) -> Self {
        self.inner.failing_list_calls.insert(call);
        self
    }

    pub fn fail_first_downloads(mut self, count: u32) -> Self {
        self.inner.failing_downloads = count;
        self
    }

    /// A more recent run belonging to some other request.
    pub fn other_run(mut self, run: WorkflowRun, artifacts: Vec<(&str, Bytes)>) -> Self {
        let artifacts = artifacts
            .into_iter()
            .map(|(name, bytes)| {
                (
                    Artifact {
                        name: name.to_string(),
                        download_url: format!("mem://other/{}/{}", run.run_id, name),
                    },
                    bytes,
                )
            })
            .collect();
        self.inner.other_runs.push((run, artifacts));
        self
    }

    pub fn build(self) -> FakeBackend {
        self.inner
    }
}

#[async_trait]
impl WorkflowBackend for FakeBackend {
    async fn trigger(
        &self,
        _target: &BackendTarget,
        event: &DispatchEvent,
    ) -> Result<(), BackendError> {
        if let Some(status) = self.reject_dispatch {
            return Err(BackendError::Rejected {
                status,
                body: "Bad credentials".to_string(),
            });
        }
        self.dispatched.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn list_runs(
        &self,
        _target: &BackendTarget,
        _event_filter: &str,
        per_page: u8,
    ) -> Result<Vec<WorkflowRun>, BackendError> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_list_calls.contains(&call) {
            return Err(BackendError::Request("connection reset".to_string()));
        }

        let mut runs: Vec<WorkflowRun> = self.other_runs.iter().map(|(r, _)| r.clone()).collect();

        if self.own_request_id().is_some() {
            let completed = self.completes_on_tick.is_some_and(|tick| call >= tick);
            runs.push(WorkflowRun {
                run_id: RunId::new(OWN_RUN_ID),
                status: if completed {
                    RunStatus::Completed
                } else {
                    RunStatus::InProgress
                },
                conclusion: completed.then_some(self.own_conclusion),
                started_at: None,
            });
        }

        runs.truncate(usize::from(per_page));
        Ok(runs)
    }

    async fn list_artifacts(
        &self,
        _target: &BackendTarget,
        run_id: RunId,
    ) -> Result<Vec<Artifact>, BackendError> {
        if run_id == RunId::new(OWN_RUN_ID) {
            let request_id = self.own_request_id().unwrap_or_default();
            return Ok(vec![Artifact {
                name: format!("prediction-{}", request_id),
                download_url: format!("{}{}", OWN_URL_PREFIX, request_id),
            }]);
        }

        Ok(self
            .other_runs
            .iter()
            .find(|(r, _)| r.run_id == run_id)
            .map(|(_, artifacts)| artifacts.iter().map(|(a, _)| a.clone()).collect())
            .unwrap_or_default())
    }

    async fn download_artifact(
        &self,
        _target: &BackendTarget,
        artifact: &Artifact,
    ) -> Result<Bytes, BackendError> {
        let call = self.download_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failing_downloads {
            return Err(BackendError::Request("download interrupted".to_string()));
        }

        if artifact.download_url.starts_with(OWN_URL_PREFIX) {
            return Ok(self.archive.clone());
        }

        self.other_runs
            .iter()
            .flat_map(|(_, artifacts)| artifacts.iter())
            .find(|(a, _)| a.download_url == artifact.download_url)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| BackendError::Rejected {
                status: 404,
                body: "Not Found".to_string(),
            })
    }
}
