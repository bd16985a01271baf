//! Test helpers for integration tests
//!
//! Provides a clinic harness with a pinned clock and shortcuts for
//! logging in as the seeded accounts.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use docbook_core::traits::{FixedClock, KeyValueStore};
use docbook_service::{
    AdminCredentials, SeedService, ServiceContext, ServiceContextBuilder, Session, SessionService,
};
use docbook_store::{FileStore, MemoryStore};

use crate::fixtures::{login, test_today};

/// Service context over a fresh store with "today" pinned
pub struct TestClinic {
    pub ctx: ServiceContext,
}

impl TestClinic {
    /// Empty clinic over an in-memory store
    pub fn start() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Clinic with the demo data seeded
    pub async fn seeded() -> Result<Self> {
        let clinic = Self::start();
        SeedService::new(&clinic.ctx).initialize().await?;
        Ok(clinic)
    }

    /// Clinic over a file store rooted at `dir`
    pub async fn on_disk(dir: &Path) -> Result<Self> {
        let store = FileStore::open(dir).await?;
        Ok(Self::with_store(Arc::new(store)))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let ctx = ServiceContextBuilder::new()
            .store(store)
            .clock(Arc::new(FixedClock::on(test_today())))
            .admin_credentials(AdminCredentials::default())
            .build_with_defaults();
        Self { ctx }
    }

    /// Log in and return the session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        Ok(SessionService::new(&self.ctx)
            .login(login(email, password))
            .await?)
    }
}
