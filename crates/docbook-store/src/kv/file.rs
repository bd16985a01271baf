//! Directory-backed key-value store
//!
//! One `<key>.json` file per key. Writes go to a temporary sibling file
//! which is then renamed over the target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use docbook_core::error::DomainError;
use docbook_core::traits::{KeyValueStore, RepoResult};

use super::keys;
use crate::repositories::map_io_error;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(map_io_error)?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> RepoResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DomainError::StorageError(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(e)),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&tmp, value).await.map_err(map_io_error)?;
        fs::rename(&tmp, &path).await.map_err(map_io_error)
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> RepoResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(map_io_error(e)),
            _ => Ok(()),
        }
    }

    /// Removes the application's own keys; other files in `root` stay
    #[instrument(skip(self))]
    async fn clear(&self) -> RepoResult<()> {
        for key in keys::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }
}
