use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::application::ports::{BackendTarget, WorkflowBackend};
use crate::domain::{Artifact, CorrelationId, PredictionResult, RunId, WorkflowRun};

use super::{ArtifactResolver, ResultExtractor};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub cadence: Duration,
    pub deadline: Duration,
    pub run_page_size: u8,
    pub run_event_filter: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub run: WorkflowRun,
    pub artifact: Artifact,
    pub result: PredictionResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub ticks: u32,
    pub transient_failures: u32,
}

#[derive(Debug)]
pub enum PollOutcome {
    Resolved(ResolvedRun),
    /// The matching artifact exists but its content can never be parsed.
    Malformed {
        run_id: RunId,
        artifact: String,
        reason: String,
    },
    TimedOut(PollStats),
}

enum TickOutcome {
    Found(ResolvedRun),
    Malformed {
        run_id: RunId,
        artifact: String,
        reason: String,
    },
    NotYet {
        transient_failures: u32,
    },
}

pub struct Poller {
    backend: Arc<dyn WorkflowBackend>,
    resolver: ArtifactResolver,
    extractor: ResultExtractor,
    settings: PollSettings,
}

impl Poller {
    pub fn new(
        backend: Arc<dyn WorkflowBackend>,
        resolver: ArtifactResolver,
        extractor: ResultExtractor,
        settings: PollSettings,
    ) -> Self {
        Self {
            backend,
            resolver,
            extractor,
            settings,
        }
    }

    /// Polls until a run carrying this request's artifact completes, or the deadline passes.
    ///
    /// Sleeps one cadence before every query: a freshly dispatched run is never complete
    /// yet. Total time spent here is capped at `deadline + cadence` even if a single
    /// backend call hangs.
    pub async fn poll(&self, target: &BackendTarget, correlation_id: &CorrelationId) -> PollOutcome {
        let cadence = self.settings.cadence;
        let deadline = self.settings.deadline;
        let started = Instant::now();
        let mut stats = PollStats::default();

        let poll_loop = async {
            loop {
                tokio::time::sleep(cadence).await;
                stats.ticks += 1;

                match self.tick(target, correlation_id).await {
                    TickOutcome::Found(resolved) => {
                        tracing::info!(
                            tick = stats.ticks,
                            run_id = %resolved.run.run_id,
                            artifact = %resolved.artifact.name,
                            "Result found"
                        );
                        return PollOutcome::Resolved(resolved);
                    }
                    TickOutcome::Malformed {
                        run_id,
                        artifact,
                        reason,
                    } => {
                        return PollOutcome::Malformed {
                            run_id,
                            artifact,
                            reason,
                        };
                    }
                    TickOutcome::NotYet { transient_failures } => {
                        stats.transient_failures += transient_failures;
                    }
                }

                if started.elapsed() >= deadline {
                    return PollOutcome::TimedOut(stats);
                }

                tracing::debug!(
                    tick = stats.ticks,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "No result yet"
                );
            }
        };

        let outcome = tokio::time::timeout(deadline + cadence, poll_loop).await;
        match outcome {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("Poll cut off by hard deadline while a backend call was in flight");
                PollOutcome::TimedOut(stats)
            }
        }
    }

    async fn tick(&self, target: &BackendTarget, correlation_id: &CorrelationId) -> TickOutcome {
        let mut transient_failures = 0;

        let runs = match self
            .backend
            .list_runs(
                target,
                &self.settings.run_event_filter,
                self.settings.run_page_size,
            )
            .await
        {
            Ok(runs) => runs,
            Err(e) => {
                tracing::warn!(error = %e, "Run listing failed, retrying next tick");
                return TickOutcome::NotYet {
                    transient_failures: 1,
                };
            }
        };

        let mut inspected = 0usize;
        for run in runs.iter().filter(|r| r.succeeded()) {
            inspected += 1;

            let artifact = match self.resolver.resolve(target, run, correlation_id).await {
                Ok(Some(artifact)) => artifact,
                Ok(None) => continue,
                Err(e) => {
                    transient_failures += 1;
                    tracing::warn!(run_id = %run.run_id, error = %e, "Artifact listing failed");
                    continue;
                }
            };

            match self.extractor.extract(target, &artifact).await {
                Ok(result) => {
                    return TickOutcome::Found(ResolvedRun {
                        run: run.clone(),
                        artifact,
                        result,
                    });
                }
                Err(e) if e.is_transient() => {
                    transient_failures += 1;
                    tracing::warn!(
                        run_id = %run.run_id,
                        artifact = %artifact.name,
                        error = %e,
                        "Artifact download failed, retrying next tick"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        run_id = %run.run_id,
                        artifact = %artifact.name,
                        error = %e,
                        "Artifact content is malformed"
                    );
                    return TickOutcome::Malformed {
                        run_id: run.run_id,
                        artifact: artifact.name,
                        reason: e.to_string(),
                    };
                }
            }
        }

        // A full page of finished runs that are not ours means ours may already be out of view.
        if runs.len() >= usize::from(self.settings.run_page_size) && inspected == runs.len() {
            tracing::debug!(
                page_size = self.settings.run_page_size,
                "Run page full of unrelated completed runs"
            );
        }

        TickOutcome::NotYet { transient_failures }
    }
}
