//! System statistics for the admin dashboard

use tracing::instrument;

use docbook_core::entities::{AppointmentStatus, Role};

use crate::dto::SystemStats;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Statistics service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Count users by role and appointments by status
    #[instrument(skip(self))]
    pub async fn system_stats(&self) -> ServiceResult<SystemStats> {
        let users = self.ctx.user_repo().list().await?;
        let appointments = self.ctx.appointment_repo().list().await?;

        let doctors = || users.iter().filter(|u| u.role == Role::Doctor);
        let with_status =
            |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();

        Ok(SystemStats {
            total_users: users.len(),
            total_patients: users.iter().filter(|u| u.role == Role::Patient).count(),
            total_doctors: doctors().count(),
            approved_doctors: doctors().filter(|d| d.approved).count(),
            pending_doctors: doctors().filter(|d| !d.approved).count(),
            total_appointments: appointments.len(),
            pending_appointments: with_status(AppointmentStatus::Pending),
            confirmed_appointments: with_status(AppointmentStatus::Confirmed),
            completed_appointments: with_status(AppointmentStatus::Completed),
            cancelled_appointments: with_status(AppointmentStatus::Cancelled),
        })
    }
}
