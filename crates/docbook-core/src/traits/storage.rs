//! Key-value persistence port
//!
//! Values are opaque strings (serialized JSON documents). Keys are
//! namespaced by the caller.

use async_trait::async_trait;

use super::RepoResult;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> RepoResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> RepoResult<()>;

    /// Remove every key the application owns
    ///
    /// Data that merely shares the backing location is left in place.
    async fn clear(&self) -> RepoResult<()>;
}
