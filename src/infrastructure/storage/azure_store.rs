use std::io;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

const STAGED_CONTENT_TYPE: &str = "audio/wav";

/// Staging container in Azure Blob Storage. The public base URL handed to the backend
/// is expected to point at this container (public read or a SAS-bearing prefix).
pub struct AzureStagingStore {
    inner: Arc<dyn ObjectStore>,
    container: String,
}

impl AzureStagingStore {
    pub fn new(
        account: &str,
        access_key: &str,
        container: &str,
    ) -> Result<Self, StagingStoreError> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| StagingStoreError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            container: container.to_string(),
        })
    }

    fn put_options() -> PutOptions {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, STAGED_CONTENT_TYPE.into());
        PutOptions {
            attributes,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl StagingStore for AzureStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, StagingStoreError> {
        let capacity = content_length.unwrap_or_default() as usize;
        let mut buffer = BytesMut::with_capacity(capacity);
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        let total_bytes = buffer.len() as u64;

        let store_path = StorePath::from(path.as_str());
        self.inner
            .put_opts(
                &store_path,
                PutPayload::from(buffer.freeze()),
                Self::put_options(),
            )
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(
            container = %self.container,
            path = %path,
            bytes = total_bytes,
            "Blob staged"
        );
        Ok(total_bytes)
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner.delete(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StagingStoreError::NotFound(path.to_string()),
            other => StagingStoreError::DeleteFailed(other.to_string()),
        })
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .head(&store_path)
            .await
            .map(|meta| meta.size as u64)
            .map_err(|e| StagingStoreError::NotFound(e.to_string()))
    }
}
