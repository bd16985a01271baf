//! Backup service
//!
//! Exports and imports the user and appointment collections as one JSON
//! document.

use tracing::{info, instrument};

use docbook_core::value_objects::Capabilities;
use docbook_store::Snapshot;

use super::actor::Actor;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Backup service
pub struct BackupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BackupService<'a> {
    /// Create a new BackupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Snapshot of both collections, stamped with the current time
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn export(&self, actor: &Actor) -> ServiceResult<Snapshot> {
        actor.require(Capabilities::MANAGE_DATA)?;

        let snapshot = Snapshot::capture(self.ctx.store(), self.ctx.clock().now()).await?;

        info!(
            users = snapshot.users.len(),
            appointments = snapshot.appointments.len(),
            "Data exported"
        );

        Ok(snapshot)
    }

    /// Export as pretty-printed JSON
    pub async fn export_json(&self, actor: &Actor) -> ServiceResult<String> {
        Ok(self.export(actor).await?.to_json_pretty()?)
    }

    /// Suggested download name for today's export
    pub fn file_name(&self) -> String {
        Snapshot::file_name(self.ctx.clock().today())
    }

    /// Replace both collections with the document's contents
    ///
    /// Nothing is written unless the whole document parses and every
    /// record is valid.
    #[instrument(skip(self, actor, text), fields(actor_id = %actor.id, bytes = text.len()))]
    pub async fn import_json(&self, actor: &Actor, text: &str) -> ServiceResult<Snapshot> {
        actor.require(Capabilities::MANAGE_DATA)?;

        let snapshot = Snapshot::from_json(text)?;

        let _guard = self.ctx.lock_writes().await;
        snapshot.restore(self.ctx.store()).await?;

        info!(
            users = snapshot.users.len(),
            appointments = snapshot.appointments.len(),
            "Data imported"
        );

        Ok(snapshot)
    }
}
