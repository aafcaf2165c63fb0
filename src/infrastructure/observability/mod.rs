mod init_tracing;
mod message_sanitizer;
mod request_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use message_sanitizer::sanitize_backend_message;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use tracing_config::TracingConfig;
