mod common;

use common::record_expiring_in;
use savedweekly::management::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

#[tokio::test]
async fn test_memory_store_get_set_clear() {
    let store = MemoryCredentialStore::new();
    assert_eq!(store.get().await.unwrap(), None);

    let record = record_expiring_in(3600);
    store.set(record.clone()).await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some(record));

    store.clear().await.unwrap();
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_missing_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("token.json"));

    assert_eq!(store.get().await.unwrap(), None);
    // clearing nothing is fine
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_file_store_persists_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache/token.json");
    let record = record_expiring_in(3600);

    FileCredentialStore::new(path.clone())
        .set(record.clone())
        .await
        .unwrap();

    assert!(path.is_file());
    let reopened = FileCredentialStore::new(path);
    assert_eq!(reopened.get().await.unwrap(), Some(record));
}

#[tokio::test]
async fn test_file_store_replaces_and_clears() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("token.json"));

    store.set(record_expiring_in(10)).await.unwrap();
    let mut newer = record_expiring_in(3600);
    newer.access_token = "access-new".to_string();
    store.set(newer.clone()).await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some(newer));

    store.clear().await.unwrap();
    assert_eq!(store.get().await.unwrap(), None);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_file_store_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileCredentialStore::new(path);
    assert!(store.get().await.is_err());
}

#[tokio::test]
async fn test_file_store_reads_record_without_scope() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(
        &path,
        r#"{"access_token":"a","refresh_token":"r","expires_at":1700000000}"#,
    )
    .unwrap();

    let record = FileCredentialStore::new(path).get().await.unwrap().unwrap();
    assert_eq!(record.access_token, "a");
    assert_eq!(record.expires_at, 1_700_000_000);
    assert_eq!(record.scope, "");
}
