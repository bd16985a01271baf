//! Key-value implementation of UserRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use docbook_core::entities::{Role, User};
use docbook_core::error::DomainError;
use docbook_core::traits::{KeyValueStore, RepoResult, UserRepository};
use docbook_core::value_objects::EntityId;

use crate::kv::{get_collection, keys, set_collection};
use crate::models::UserRecord;

use super::error::user_not_found;

/// UserRepository over the `docbook_users` collection
#[derive(Clone)]
pub struct KvUserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvUserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> RepoResult<Vec<UserRecord>> {
        get_collection(self.store.as_ref(), keys::USERS).await
    }

    async fn save(&self, records: &[UserRecord]) -> RepoResult<()> {
        set_collection(self.store.as_ref(), keys::USERS, records).await
    }
}

#[async_trait]
impl UserRepository for KvUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<User>> {
        self.load()
            .await?
            .iter()
            .find(|r| r.id == id.as_str())
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.load()
            .await?
            .iter()
            .find(|r| r.email == email)
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.load().await?.iter().any(|r| r.email == email))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<User>> {
        self.load().await?.iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        self.load()
            .await?
            .iter()
            .filter(|r| r.role == role.as_str())
            .map(User::try_from)
            .collect()
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut records = self.load().await?;
        if records.iter().any(|r| r.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if records.iter().any(|r| r.id == user.id.as_str()) {
            return Err(DomainError::InternalError(format!("Duplicate user id {}", user.id)));
        }

        records.push(UserRecord::new(user, Some(password_hash)));
        self.save(&records).await?;

        debug!(total = records.len(), "User inserted");
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut records = self.load().await?;
        if records
            .iter()
            .any(|r| r.email == user.email && r.id != user.id.as_str())
        {
            return Err(DomainError::EmailAlreadyExists);
        }

        let record = records
            .iter_mut()
            .find(|r| r.id == user.id.as_str())
            .ok_or_else(|| user_not_found(&user.id))?;
        let password_hash = record.password_hash.take();
        *record = UserRecord::new(user, password_hash.as_deref());

        self.save(&records).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> RepoResult<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id.as_str());
        if records.len() == before {
            return Ok(false);
        }

        self.save(&records).await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: &EntityId) -> RepoResult<Option<String>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|r| r.id == id.as_str())
            .and_then(|r| r.password_hash))
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: &EntityId, password_hash: &str) -> RepoResult<()> {
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id.as_str())
            .ok_or_else(|| user_not_found(id))?;
        record.password_hash = Some(password_hash.to_string());

        self.save(&records).await
    }
}
