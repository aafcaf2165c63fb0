use std::sync::Arc;

use crate::application::ports::{PayloadStager, StagingStoreError};
use crate::infrastructure::storage::StagingStoreFactory;
use crate::presentation::config::{StagingSettings, StagingStrategy};

use super::external_stager::ExternalPayloadStager;
use super::inline_stager::InlinePayloadStager;

pub struct PayloadStagerFactory;

impl PayloadStagerFactory {
    pub fn create(settings: &StagingSettings) -> Result<Arc<dyn PayloadStager>, StagingStoreError> {
        match settings.strategy {
            StagingStrategy::Inline => Ok(Arc::new(InlinePayloadStager)),
            StagingStrategy::External => {
                let base_url = settings.public_base_url.as_deref().ok_or_else(|| {
                    StagingStoreError::Configuration(
                        "public_base_url required for external staging".into(),
                    )
                })?;
                let store = StagingStoreFactory::create(settings)?;
                Ok(Arc::new(ExternalPayloadStager::new(store, base_url)))
            }
        }
    }
}
