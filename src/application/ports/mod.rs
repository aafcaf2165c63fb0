mod archive_reader;
mod payload_stager;
mod staging_store;
mod workflow_backend;

pub use archive_reader::{ArchiveError, ArchiveReader};
pub use payload_stager::{PayloadStager, StageError};
pub use staging_store::{StagingStore, StagingStoreError};
pub use workflow_backend::{
    BackendError, BackendTarget, ClientPayload, DispatchEvent, WorkflowBackend,
};
