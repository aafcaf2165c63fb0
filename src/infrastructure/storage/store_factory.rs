use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::presentation::config::{StagingSettings, StorageProviderSetting};

use super::azure_store::AzureStagingStore;
use super::local_store::LocalStagingStore;

pub struct StagingStoreFactory;

impl StagingStoreFactory {
    pub fn create(settings: &StagingSettings) -> Result<Arc<dyn StagingStore>, StagingStoreError> {
        let store: Arc<dyn StagingStore> = match settings.provider {
            StorageProviderSetting::Local => Arc::new(LocalStagingStore::new(PathBuf::from(
                &settings.local_path,
            ))?),
            StorageProviderSetting::Azure => Arc::new(AzureStagingStore::new(
                required(&settings.azure_account, "staging.azure_account")?,
                required(&settings.azure_access_key, "staging.azure_access_key")?,
                required(&settings.azure_container, "staging.azure_container")?,
            )?),
        };

        tracing::info!(provider = ?settings.provider, "Staging store ready");
        Ok(store)
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str, StagingStoreError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StagingStoreError::Configuration(format!("{} required for azure staging", key)))
}
