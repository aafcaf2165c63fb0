use std::io;

use bytes::Bytes;
use futures::stream;

use cry_relay::application::ports::{StagingStore, StagingStoreError};
use cry_relay::domain::{CorrelationId, StoragePath};
use cry_relay::infrastructure::storage::LocalStagingStore;

fn create_test_store() -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn audio_path() -> StoragePath {
    StoragePath::for_request(&CorrelationId::new(), "audio.wav")
}

#[tokio::test]
async fn given_chunked_stream_when_storing_then_returns_total_size() {
    let (_dir, store) = create_test_store();
    let path = audio_path();

    let chunks = vec![Ok(Bytes::from("RIFF")), Ok(Bytes::from("WAVEfmt "))];
    let size = store
        .store(&path, Box::pin(stream::iter(chunks)), None)
        .await
        .unwrap();

    assert_eq!(size, 12);
}

#[tokio::test]
async fn given_stored_file_when_head_then_returns_size() {
    let (dir, store) = create_test_store();
    let path = audio_path();

    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from("hello world"))]));
    store.store(&path, byte_stream, None).await.unwrap();

    assert_eq!(store.head(&path).await.unwrap(), 11);
    assert!(dir.path().join(path.as_str()).exists());
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_head_returns_error() {
    let (_dir, store) = create_test_store();
    let path = audio_path();

    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from("data"))]));
    store.store(&path, byte_stream, None).await.unwrap();

    store.delete(&path).await.unwrap();

    assert!(store.head(&path).await.is_err());
}

#[tokio::test]
async fn given_stream_error_when_storing_then_nothing_is_persisted() {
    let (_dir, store) = create_test_store();
    let path = audio_path();

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "network drop",
        )),
    ];

    let result = store.store(&path, Box::pin(stream::iter(chunks)), None).await;

    assert!(result.is_err());
    assert!(store.head(&path).await.is_err());
}

#[tokio::test]
async fn given_nonexistent_path_when_deleting_then_returns_not_found() {
    let (_dir, store) = create_test_store();

    let result = store.delete(&audio_path()).await;

    assert!(matches!(result, Err(StagingStoreError::NotFound(_))));
}
