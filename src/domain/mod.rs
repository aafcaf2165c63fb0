mod analysis_phase;
mod analysis_request;
mod artifact;
mod correlation_id;
mod dispatch_outcome;
mod prediction_result;
mod staged_payload;
mod storage_path;
mod workflow_run;

pub use analysis_phase::AnalysisPhase;
pub use analysis_request::AnalysisRequest;
pub use artifact::Artifact;
pub use correlation_id::CorrelationId;
pub use dispatch_outcome::DispatchOutcome;
pub use prediction_result::PredictionResult;
pub use staged_payload::{Backing, StagedPayload};
pub use storage_path::StoragePath;
pub use workflow_run::{RunConclusion, RunId, RunStatus, WorkflowRun};
