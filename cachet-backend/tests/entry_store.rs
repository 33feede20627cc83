//! Typed entry-store semantics over a minimal in-memory backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use cachet_backend::{Backend, BackendError, BackendResult, DeleteStatus, EntryStore};
use cachet_core::{CacheEntry, CacheKey, CachedResponse, Raw, Response};
use chrono::Utc;
use http::{HeaderMap, StatusCode, Version};
use std::time::Duration;

#[derive(Default)]
struct HashMapBackend {
    entries: Mutex<HashMap<CacheKey, CacheEntry<Raw>>>,
}

impl HashMapBackend {
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CacheEntry<Raw>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl Backend for HashMapBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheEntry<Raw>>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn write(&self, key: &CacheKey, entry: CacheEntry<Raw>) -> BackendResult<()> {
        self.lock().insert(key.clone(), entry);
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        match self.lock().remove(key) {
            Some(_) => Ok(DeleteStatus::Deleted(1)),
            None => Ok(DeleteStatus::Missing),
        }
    }

    async fn clear(&self) -> BackendResult<()> {
        self.lock().clear();
        Ok(())
    }
}

fn response(body: &'static str) -> CachedResponse {
    Response::from_parts(
        StatusCode::OK,
        Version::HTTP_11,
        HeaderMap::new(),
        Bytes::from_static(body.as_bytes()),
    )
    .to_cached()
}

#[tokio::test]
async fn set_then_get_round_trips() {
    let backend = HashMapBackend::default();
    let key = CacheKey::new("GET https://api.example.com/widgets/7");

    backend
        .set(&key, CacheEntry::new(response("widget 7"), Duration::from_secs(60)))
        .await
        .unwrap();

    let entry = backend.get(&key).await.unwrap().expect("entry present");
    assert_eq!(entry.ttl_seconds(), 60);
    assert_eq!(entry.data(), &response("widget 7"));
}

#[tokio::test]
async fn expired_entries_read_as_absent() {
    let backend = HashMapBackend::default();
    let key = CacheKey::new("GET https://api.example.com/widgets/7");

    let stored_at = Utc::now() - chrono::Duration::seconds(120);
    backend
        .set(
            &key,
            CacheEntry::from_parts(response("stale"), stored_at, 60),
        )
        .await
        .unwrap();

    assert!(backend.get(&key).await.unwrap().is_none());
    // The raw entry is still in the store; only the typed read filters it.
    assert!(backend.read(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn set_overwrites_unconditionally() {
    let backend = HashMapBackend::default();
    let key = CacheKey::new("GET https://api.example.com/widgets/7");

    backend
        .set(&key, CacheEntry::new(response("old"), Duration::from_secs(60)))
        .await
        .unwrap();
    backend
        .set(&key, CacheEntry::new(response("new"), Duration::from_secs(60)))
        .await
        .unwrap();

    let entry = backend.get(&key).await.unwrap().expect("entry present");
    assert_eq!(entry.data(), &response("new"));
}

#[tokio::test]
async fn corrupt_bytes_surface_as_serialization_errors() {
    let backend = HashMapBackend::default();
    let key = CacheKey::new("GET https://api.example.com/widgets/7");

    backend
        .write(
            &key,
            CacheEntry::new(Bytes::from_static(b"not json"), Duration::from_secs(60)),
        )
        .await
        .unwrap();

    assert!(matches!(
        backend.get(&key).await,
        Err(BackendError::Serialization(_))
    ));
}

#[tokio::test]
async fn remove_and_clear() {
    let backend = HashMapBackend::default();
    let key = CacheKey::new("GET https://api.example.com/widgets/7");
    let other = CacheKey::new("GET https://api.example.com/widgets/8");

    backend
        .set(&key, CacheEntry::new(response("a"), Duration::from_secs(60)))
        .await
        .unwrap();
    backend
        .set(&other, CacheEntry::new(response("b"), Duration::from_secs(60)))
        .await
        .unwrap();

    assert_eq!(backend.remove(&key).await.unwrap(), DeleteStatus::Deleted(1));
    assert_eq!(backend.remove(&key).await.unwrap(), DeleteStatus::Missing);

    backend.clear().await.unwrap();
    assert!(backend.get(&other).await.unwrap().is_none());
}
