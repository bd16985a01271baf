//! Service context - dependency container for services
//!
//! Holds the key-value store, repositories, clock, id generator and the
//! write guard shared by all services.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use docbook_common::auth::PasswordService;
use docbook_common::config::SeedConfig;
use docbook_core::traits::{
    AppointmentRepository, Clock, KeyValueStore, SessionRepository, SystemClock, UserRepository,
};
use docbook_core::{EntityId, IdGenerator};
use docbook_store::{KvAppointmentRepository, KvSessionRepository, KvUserRepository};

/// Canonical admin account restored by the seeding repair step
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        SeedConfig::default().into()
    }
}

impl From<SeedConfig> for AdminCredentials {
    fn from(config: SeedConfig) -> Self {
        Self {
            email: config.admin_email,
            password: config.admin_password,
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Cloning is cheap; clones share the store and the write guard.
#[derive(Clone)]
pub struct ServiceContext {
    // Raw storage (seeding, backup)
    store: Arc<dyn KeyValueStore>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    session_repo: Arc<dyn SessionRepository>,

    // Services
    clock: Arc<dyn Clock>,
    id_generator: Arc<IdGenerator>,
    password_service: PasswordService,
    admin: AdminCredentials,

    // Serializes read-modify-write of the user and appointment collections
    write_guard: Arc<Mutex<()>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        user_repo: Arc<dyn UserRepository>,
        appointment_repo: Arc<dyn AppointmentRepository>,
        session_repo: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        id_generator: Arc<IdGenerator>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            store,
            user_repo,
            appointment_repo,
            session_repo,
            clock,
            id_generator,
            password_service: PasswordService::new(),
            admin,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Context with key-value repositories over `store` and the wall clock
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        ServiceContextBuilder::new().store(store).build_with_defaults()
    }

    // === Storage ===

    /// Get the raw key-value store
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the appointment repository
    pub fn appointment_repo(&self) -> &dyn AppointmentRepository {
        self.appointment_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    // === Services ===

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Canonical admin credentials
    pub fn admin_credentials(&self) -> &AdminCredentials {
        &self.admin
    }

    /// Generate a new EntityId
    pub fn generate_id(&self) -> EntityId {
        self.id_generator.generate()
    }

    /// Hold this guard from the read of a collection to its rewrite
    ///
    /// Not reentrant: a service holding it must not call another writer.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_guard.lock().await
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("admin", &self.admin)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn KeyValueStore>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    appointment_repo: Option<Arc<dyn AppointmentRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    clock: Option<Arc<dyn Clock>>,
    id_generator: Option<Arc<IdGenerator>>,
    admin: Option<AdminCredentials>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn appointment_repo(mut self, repo: Arc<dyn AppointmentRepository>) -> Self {
        self.appointment_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn admin_credentials(mut self, admin: AdminCredentials) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.store.ok_or_else(|| ServiceError::validation("store is required"))?,
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.appointment_repo
                .ok_or_else(|| ServiceError::validation("appointment_repo is required"))?,
            self.session_repo.ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.clock.ok_or_else(|| ServiceError::validation("clock is required"))?,
            self.id_generator.ok_or_else(|| ServiceError::validation("id_generator is required"))?,
            self.admin.unwrap_or_default(),
        ))
    }

    /// Build, filling missing parts with key-value repositories over the
    /// store (an in-memory store when none was given), the system clock
    /// and a fresh id generator
    pub fn build_with_defaults(self) -> ServiceContext {
        let store: Arc<dyn KeyValueStore> = self
            .store
            .unwrap_or_else(|| Arc::new(docbook_store::MemoryStore::new()));

        ServiceContext::new(
            Arc::clone(&store),
            self.user_repo
                .unwrap_or_else(|| Arc::new(KvUserRepository::new(Arc::clone(&store)))),
            self.appointment_repo
                .unwrap_or_else(|| Arc::new(KvAppointmentRepository::new(Arc::clone(&store)))),
            self.session_repo
                .unwrap_or_else(|| Arc::new(KvSessionRepository::new(Arc::clone(&store)))),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.id_generator.unwrap_or_default(),
            self.admin.unwrap_or_default(),
        )
    }
}
