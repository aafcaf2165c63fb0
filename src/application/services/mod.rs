mod analysis_service;
mod artifact_resolver;
mod cleanup;
mod dispatcher;
mod poller;
mod result_extractor;

pub use analysis_service::{AnalysisError, AnalysisService, OrchestratorConfig};
pub use artifact_resolver::ArtifactResolver;
pub use cleanup::StagedPayloadGuard;
pub use dispatcher::Dispatcher;
pub use poller::{PollOutcome, PollSettings, PollStats, Poller, ResolvedRun};
pub use result_extractor::{ExtractError, ResultExtractor, parse_result};
