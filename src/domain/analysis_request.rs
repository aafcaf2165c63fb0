use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::CorrelationId;

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub correlation_id: CorrelationId,
    pub payload: Bytes,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRequest {
    pub fn new(payload: Bytes) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            payload,
            created_at: Utc::now(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }
}
