use confhub_storage::*;
use tempfile::TempDir;

#[tokio::test]
async fn memory_backend_get_set_remove() {
    let storage = Storage::memory();

    assert_eq!(storage.get("conferences").await.unwrap(), None);
    storage.set("conferences", "[]").await.unwrap();
    assert!(storage.contains("conferences").unwrap());
    assert_eq!(storage.get("conferences").await.unwrap().as_deref(), Some("[]"));

    assert!(storage.remove("conferences").await.unwrap());
    assert!(!storage.remove("conferences").await.unwrap());
    assert_eq!(storage.get("conferences").await.unwrap(), None);
}

#[tokio::test]
async fn clones_share_the_same_values() {
    let storage = Storage::memory();
    let other = storage.clone();

    storage.set("registrations", "[1]").await.unwrap();
    assert_eq!(other.get("registrations").await.unwrap().as_deref(), Some("[1]"));
}

#[tokio::test]
async fn last_write_wins() {
    let storage = Storage::memory();

    storage.set("conferences", "first").await.unwrap();
    storage.set("conferences", "second").await.unwrap();
    assert_eq!(storage.get("conferences").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn invalid_keys_are_rejected() {
    let storage = Storage::memory();

    assert!(matches!(storage.set("../escape", "x").await, Err(StorageError::InvalidKey { .. })));
    assert!(matches!(storage.get("").await, Err(StorageError::InvalidKey { .. })));
}

#[tokio::test]
async fn disk_roundtrip_uncompressed() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.set("registrations", r#"[{"name":"Ana"}]"#).await.unwrap();
    assert!(storage.contains("registrations").unwrap());

    let value = storage.get("registrations").await.unwrap();
    assert_eq!(value.as_deref(), Some(r#"[{"name":"Ana"}]"#));

    let on_disk = std::fs::read_to_string(storage.root().unwrap().join("registrations.kv")).unwrap();
    assert_eq!(on_disk, r#"[{"name":"Ana"}]"#);
}

#[tokio::test]
async fn disk_roundtrip_compressed() {
    let temp = TempDir::new().unwrap();
    let storage =
        Storage::builder().root(temp.path()).compression(Compression::Lz4).connect().await.unwrap();

    let payload = "São Paulo, SP ".repeat(256);
    storage.set("conferences", payload.clone()).await.unwrap();

    assert_eq!(storage.get("conferences").await.unwrap(), Some(payload));
}

#[tokio::test]
async fn disk_values_survive_reconnect() {
    let temp = TempDir::new().unwrap();
    {
        let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
        storage.set("conferences", "persisted").await.unwrap();
    }

    let storage = Storage::builder().root(temp.path()).create(false).connect().await.unwrap();
    assert_eq!(storage.get("conferences").await.unwrap().as_deref(), Some("persisted"));
}

#[tokio::test]
async fn missing_root_without_create_fails() {
    let temp = TempDir::new().unwrap();
    let result = Storage::builder().root(temp.path().join("absent")).create(false).connect().await;

    assert!(matches!(result, Err(StorageError::Io { .. })));
}

#[tokio::test]
async fn disk_remove_reports_presence() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.set("conferences", "x").await.unwrap();
    assert!(storage.remove("conferences").await.unwrap());
    assert!(!storage.contains("conferences").unwrap());
    assert!(!storage.remove("conferences").await.unwrap());
}
