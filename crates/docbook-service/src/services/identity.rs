//! Identity service
//!
//! Handles registration, credential checks, profile updates, admin
//! moderation and doctor ratings.

use tracing::{debug, info, instrument, warn};
use validator::Validate;

use docbook_common::AppError;
use docbook_core::entities::{DoctorProfile, Role, User, UserPatch};
use docbook_core::error::DomainError;
use docbook_core::value_objects::{Capabilities, EntityId};

use crate::dto::{RegisterRequest, UpdateProfileRequest};

use super::actor::Actor;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// Everything needed to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Doctor profile fields; ignored for other roles
    pub profile: Option<DoctorProfile>,
}

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Self-service registration for patients and doctors
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        request.validate()?;

        let role: Role = request.role.parse()?;
        if role == Role::Admin {
            return Err(ServiceError::validation(
                "Admin accounts cannot be created through registration",
            ));
        }

        let profile = if role == Role::Doctor {
            let specialty = non_blank(request.specialty);
            let location = non_blank(request.location);
            let (Some(specialty), Some(location)) = (specialty, location) else {
                return Err(ServiceError::validation(
                    "Specialty and location are required for doctors",
                ));
            };
            Some(DoctorProfile::new(
                specialty,
                location,
                request.bio.unwrap_or_default(),
            ))
        } else {
            None
        };

        self.create(NewUser {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password,
            role,
            profile,
        })
        .await
    }

    /// Create an account; doctors start unapproved with the weekday template
    #[instrument(skip(self, new_user), fields(email = %new_user.email, role = %new_user.role))]
    pub async fn create(&self, new_user: NewUser) -> ServiceResult<User> {
        let password_hash = self.ctx.password_service().hash(&new_user.password)?;

        let _guard = self.ctx.lock_writes().await;
        if self.is_reserved_email(&new_user.email, new_user.role)
            || self.ctx.user_repo().email_exists(&new_user.email).await?
        {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let mut user = User::new(
            self.ctx.generate_id(),
            new_user.name,
            new_user.email,
            new_user.role,
        );
        if user.is_doctor() {
            let profile = new_user.profile.unwrap_or_else(|| {
                DoctorProfile::new(String::new(), String::new(), String::new())
            });
            user = user.with_doctor_profile(profile);
        }

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    /// Check credentials and return the account
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::not_found("User", email)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(&user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !self.ctx.password_service().verify(password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        if user.is_pending_approval() {
            warn!(user_id = %user.id, "Login refused: doctor pending approval");
            return Err(AppError::PendingApproval.into());
        }

        debug!(user_id = %user.id, "Credentials accepted");

        Ok(user)
    }

    /// Merge a partial update and refresh the session snapshot
    #[instrument(skip(self, patch))]
    pub async fn update(&self, user_id: &EntityId, patch: UserPatch) -> ServiceResult<User> {
        let _guard = self.ctx.lock_writes().await;

        let mut user = self.get_user(user_id).await?;
        if let Some(email) = &patch.email {
            if self.is_reserved_email(email, user.role) {
                warn!(user_id = %user.id, "Update refused: admin email is reserved");
                return Err(DomainError::EmailAlreadyExists.into());
            }
        }
        user.apply(patch)?;

        self.ctx.user_repo().update(&user).await?;
        SessionService::new(self.ctx).sync_user(&user).await?;

        info!(user_id = %user.id, "User updated");

        Ok(user)
    }

    /// Delete a user and every appointment they take part in
    ///
    /// Returns the number of appointments removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &EntityId) -> ServiceResult<u64> {
        let _guard = self.ctx.lock_writes().await;

        if !self.ctx.user_repo().delete(user_id).await? {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }

        let removed = self
            .ctx
            .appointment_repo()
            .delete_by_participant(user_id)
            .await?;
        SessionService::new(self.ctx).forget_user(user_id).await?;

        info!(user_id = %user_id, appointments = removed, "User deleted");

        Ok(removed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &EntityId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// All users in registration order
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.user_repo().list().await?)
    }

    /// Doctors visible to patients
    #[instrument(skip(self))]
    pub async fn list_approved_doctors(&self) -> ServiceResult<Vec<User>> {
        let doctors = self.ctx.user_repo().list_by_role(Role::Doctor).await?;
        Ok(doctors.into_iter().filter(|d| d.approved).collect())
    }

    /// Doctors waiting for an admin decision
    #[instrument(skip(self))]
    pub async fn list_pending_doctors(&self) -> ServiceResult<Vec<User>> {
        let doctors = self.ctx.user_repo().list_by_role(Role::Doctor).await?;
        Ok(doctors.into_iter().filter(|d| !d.approved).collect())
    }

    // ========================================================================
    // Moderation
    // ========================================================================

    /// Approve a pending doctor
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn approve_doctor(&self, actor: &Actor, doctor_id: &EntityId) -> ServiceResult<User> {
        actor.require(Capabilities::MODERATE_USERS)?;
        self.require_doctor(doctor_id).await?;

        let doctor = self.update(doctor_id, UserPatch::approved(true)).await?;

        info!(doctor_id = %doctor_id, "Doctor approved");

        Ok(doctor)
    }

    /// Reject a doctor application by deleting the account
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn reject_doctor(&self, actor: &Actor, doctor_id: &EntityId) -> ServiceResult<u64> {
        actor.require(Capabilities::MODERATE_USERS)?;
        self.require_doctor(doctor_id).await?;

        let removed = self.delete(doctor_id).await?;

        info!(doctor_id = %doctor_id, "Doctor rejected");

        Ok(removed)
    }

    /// Delete any account
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_user(&self, actor: &Actor, user_id: &EntityId) -> ServiceResult<u64> {
        actor.require(Capabilities::MODERATE_USERS)?;
        self.delete(user_id).await
    }

    // ========================================================================
    // Doctor Profile & Ratings
    // ========================================================================

    /// Doctor edits their own specialty, location or bio
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn update_profile(
        &self,
        actor: &Actor,
        doctor_id: &EntityId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<User> {
        actor.require_self(doctor_id, Capabilities::EDIT_DOCTOR_PROFILE)?;
        request.validate()?;

        self.update(doctor_id, UserPatch::from(request)).await
    }

    /// Patient rates an approved doctor; returns the new rating
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn rate_doctor(
        &self,
        actor: &Actor,
        doctor_id: &EntityId,
        score: f64,
    ) -> ServiceResult<f64> {
        actor.require(Capabilities::RATE_DOCTORS)?;

        let _guard = self.ctx.lock_writes().await;
        let mut doctor = self
            .ctx
            .user_repo()
            .find_by_id(doctor_id)
            .await?
            .filter(|u| u.is_doctor() && u.approved)
            .ok_or_else(|| DomainError::DoctorNotFound(doctor_id.clone()))?;

        let rating = doctor.doctor_profile_mut()?.record_rating(score)?;
        self.ctx.user_repo().update(&doctor).await?;

        info!(doctor_id = %doctor_id, rating, "Doctor rated");

        Ok(rating)
    }

    /// The canonical admin email belongs to the admin account only
    fn is_reserved_email(&self, email: &str, role: Role) -> bool {
        role != Role::Admin
            && email
                .trim()
                .eq_ignore_ascii_case(&self.ctx.admin_credentials().email)
    }

    async fn require_doctor(&self, user_id: &EntityId) -> ServiceResult<User> {
        let user = self.get_user(user_id).await?;
        if user.is_doctor() {
            Ok(user)
        } else {
            Err(DomainError::DoctorNotFound(user_id.clone()).into())
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
