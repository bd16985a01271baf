//! Startup wiring
//!
//! Opens the data directory, builds the service context, seeds and
//! restores the previous session.

use std::sync::Arc;

use tracing::{info, warn};

use docbook_common::{AppConfig, AppResult};
use docbook_service::{
    AdminCredentials, SeedOutcome, SeedService, ServiceContextBuilder, SessionService,
    StatsService,
};
use docbook_store::FileStore;

use crate::landing::Landing;
use crate::state::AppState;

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    info!(data_dir = %config.storage.data_dir.display(), "Opening data directory...");
    let store = FileStore::open(config.storage.data_dir.clone()).await?;

    let service_context = ServiceContextBuilder::new()
        .store(Arc::new(store))
        .admin_credentials(AdminCredentials::from(config.seed.clone()))
        .build_with_defaults();

    Ok(AppState::new(service_context, config))
}

/// Seed (when enabled) and resolve the landing view
pub async fn bootstrap(state: &AppState) -> AppResult<Landing> {
    let ctx = state.service_context();

    if state.config().seed.enabled {
        match SeedService::new(ctx).initialize().await? {
            SeedOutcome::Seeded => info!("First run: demo data written"),
            SeedOutcome::AdminCreated => warn!("Admin account was missing and has been created"),
            SeedOutcome::AdminRepaired => warn!("Admin credentials have been restored"),
            SeedOutcome::Unchanged => {}
        }
    }

    let sessions = SessionService::new(ctx);
    let mut session = sessions.current().await?;
    if let Some(current) = session.as_mut() {
        if !sessions.refresh(current).await? {
            session = None;
        }
    }

    Ok(Landing::resolve(ctx, session.as_ref()).await?)
}

/// Run the application
pub async fn run(config: AppConfig) -> AppResult<()> {
    let state = create_app_state(config).await?;

    let landing = bootstrap(&state).await?;
    landing.log();

    let stats = StatsService::new(state.service_context()).system_stats().await?;
    info!(
        users = stats.total_users,
        doctors = stats.total_doctors,
        pending_doctors = stats.pending_doctors,
        appointments = stats.total_appointments,
        "System statistics"
    );

    Ok(())
}
