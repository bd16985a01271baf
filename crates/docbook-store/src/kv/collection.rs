//! Whole-collection JSON helpers over a [`KeyValueStore`]
//!
//! Collections are stored as one JSON array per key. Every mutation is a
//! read of the full array, an in-memory change, and a write of the full array.

use serde::de::DeserializeOwned;
use serde::Serialize;

use docbook_core::traits::{KeyValueStore, RepoResult};

use crate::repositories::{map_corrupt, map_serialize_error};

/// Read a collection; an absent key is an empty collection
pub async fn get_collection<T>(store: &dyn KeyValueStore, key: &'static str) -> RepoResult<Vec<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| map_corrupt(key, e)),
        None => Ok(Vec::new()),
    }
}

/// Replace a collection wholesale
pub async fn set_collection<T>(
    store: &dyn KeyValueStore,
    key: &'static str,
    items: &[T],
) -> RepoResult<()>
where
    T: Serialize + Sync,
{
    let raw = serde_json::to_string(items).map_err(map_serialize_error)?;
    store.set(key, &raw).await
}

/// Read a `"true"` flag
pub async fn get_flag(store: &dyn KeyValueStore, key: &str) -> RepoResult<bool> {
    Ok(store.get(key).await?.is_some_and(|v| v.trim() == "true"))
}

/// Write a `"true"` flag or remove it
pub async fn set_flag(store: &dyn KeyValueStore, key: &str, value: bool) -> RepoResult<()> {
    if value {
        store.set(key, "true").await
    } else {
        store.remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use docbook_core::DomainError;

    #[tokio::test]
    async fn test_absent_collection_is_empty() {
        let store = MemoryStore::new();
        let items: Vec<u32> = get_collection(&store, "docbook_users").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_collection_preserves_order() {
        let store = MemoryStore::new();
        set_collection(&store, "docbook_users", &[3, 1, 2]).await.unwrap();
        let items: Vec<u32> = get_collection(&store, "docbook_users").await.unwrap();
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_malformed_collection_is_corrupt() {
        let store = MemoryStore::new();
        store.set("docbook_users", "{not json").await.unwrap();
        let result: RepoResult<Vec<u32>> = get_collection(&store, "docbook_users").await;
        assert!(matches!(
            result,
            Err(DomainError::CorruptRecord { collection: "docbook_users", .. })
        ));
    }

    #[tokio::test]
    async fn test_flag() {
        let store = MemoryStore::new();
        assert!(!get_flag(&store, "docbook_initialized").await.unwrap());
        set_flag(&store, "docbook_initialized", true).await.unwrap();
        assert_eq!(
            store.get("docbook_initialized").await.unwrap().as_deref(),
            Some("true")
        );
        assert!(get_flag(&store, "docbook_initialized").await.unwrap());
        set_flag(&store, "docbook_initialized", false).await.unwrap();
        assert!(!get_flag(&store, "docbook_initialized").await.unwrap());
    }
}
