//! Key-value implementation of SessionRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use docbook_core::entities::User;
use docbook_core::traits::{KeyValueStore, RepoResult, SessionRepository};

use crate::kv::keys;
use crate::models::UserRecord;

use super::error::{map_corrupt, map_serialize_error};

/// Current-user snapshot under `docbook_current_user`
#[derive(Clone)]
pub struct KvSessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for KvSessionRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> RepoResult<Option<User>> {
        let Some(raw) = self.store.get(keys::CURRENT_USER).await? else {
            return Ok(None);
        };
        let record: UserRecord =
            serde_json::from_str(&raw).map_err(|e| map_corrupt(keys::CURRENT_USER, e))?;
        User::try_from(&record).map(Some)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn save(&self, user: &User) -> RepoResult<()> {
        let raw = serde_json::to_string(&UserRecord::new(user, None)).map_err(map_serialize_error)?;
        self.store.set(keys::CURRENT_USER, &raw).await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> RepoResult<()> {
        self.store.remove(keys::CURRENT_USER).await
    }
}
