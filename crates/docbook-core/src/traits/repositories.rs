//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the store crate provides
//! the implementation on top of a [`KeyValueStore`](super::KeyValueStore).

use async_trait::async_trait;

use crate::entities::{Appointment, Role, User};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<User>>;

    /// Find user by email (exact match)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// All users in insertion order
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// All users with the given role
    async fn list_by_role(&self, role: Role) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Replace an existing user, keeping its stored password hash
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Hard delete a user. Returns false when no such user existed.
    async fn delete(&self, id: &EntityId) -> RepoResult<bool>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: &EntityId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: &EntityId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Appointment Repository
// ============================================================================

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find appointment by ID
    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<Appointment>>;

    /// All appointments in insertion order
    async fn list(&self) -> RepoResult<Vec<Appointment>>;

    /// Appointments where the user is the doctor
    async fn find_by_doctor(&self, doctor_id: &EntityId) -> RepoResult<Vec<Appointment>>;

    /// Appointments where the user is the patient
    async fn find_by_patient(&self, patient_id: &EntityId) -> RepoResult<Vec<Appointment>>;

    /// Create a new appointment
    async fn create(&self, appointment: &Appointment) -> RepoResult<()>;

    /// Replace an existing appointment
    async fn update(&self, appointment: &Appointment) -> RepoResult<()>;

    /// Hard delete an appointment. Returns false when it did not exist.
    async fn delete(&self, id: &EntityId) -> RepoResult<bool>;

    /// Delete every appointment the user takes part in. Returns the count.
    async fn delete_by_participant(&self, user_id: &EntityId) -> RepoResult<u64>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the persisted current user, if any
    async fn load(&self) -> RepoResult<Option<User>>;

    /// Persist the current user
    async fn save(&self, user: &User) -> RepoResult<()>;

    /// Forget the current user
    async fn clear(&self) -> RepoResult<()>;
}
