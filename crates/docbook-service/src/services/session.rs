//! Session service
//!
//! Tracks the logged-in user. The snapshot is persisted under
//! `docbook_current_user` so a restart restores the same user.

use tracing::{debug, info, instrument};
use validator::Validate;

use docbook_core::entities::User;
use docbook_core::value_objects::EntityId;

use crate::dto::LoginRequest;

use super::actor::Actor;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::identity::IdentityService;

/// The logged-in user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Identity passed into operations run by this user
    pub fn actor(&self) -> Actor {
        Actor::from(&self.user)
    }

    pub fn into_user(self) -> User {
        self.user
    }
}

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<Session> {
        request.validate()?;

        let user = IdentityService::new(self.ctx)
            .authenticate(&request.email, &request.password)
            .await?;
        self.ctx.session_repo().save(&user).await?;

        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(Session::new(user))
    }

    /// Restore the persisted session, if any
    #[instrument(skip(self))]
    pub async fn current(&self) -> ServiceResult<Option<Session>> {
        Ok(self.ctx.session_repo().load().await?.map(Session::new))
    }

    /// End the session
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ServiceResult<()> {
        self.ctx.session_repo().clear().await?;
        info!("User logged out");
        Ok(())
    }

    /// Re-read the session user from the identity store
    ///
    /// Returns false and clears the session when the user no longer exists.
    #[instrument(skip(self, session), fields(user_id = %session.user.id))]
    pub async fn refresh(&self, session: &mut Session) -> ServiceResult<bool> {
        match self.ctx.user_repo().find_by_id(&session.user.id).await? {
            Some(user) => {
                self.ctx.session_repo().save(&user).await?;
                session.user = user;
                Ok(true)
            }
            None => {
                self.ctx.session_repo().clear().await?;
                info!("Session user no longer exists; session cleared");
                Ok(false)
            }
        }
    }

    /// Overwrite the snapshot when `user` is the one logged in
    pub(crate) async fn sync_user(&self, user: &User) -> ServiceResult<()> {
        if let Some(current) = self.ctx.session_repo().load().await? {
            if current.id == user.id {
                self.ctx.session_repo().save(user).await?;
                debug!(user_id = %user.id, "Session snapshot refreshed");
            }
        }
        Ok(())
    }

    /// Clear the session when it belongs to `user_id`
    pub(crate) async fn forget_user(&self, user_id: &EntityId) -> ServiceResult<()> {
        if let Some(current) = self.ctx.session_repo().load().await? {
            if &current.id == user_id {
                self.ctx.session_repo().clear().await?;
                debug!(user_id = %user_id, "Session cleared for deleted user");
            }
        }
        Ok(())
    }
}
