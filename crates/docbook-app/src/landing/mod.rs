//! Landing view
//!
//! What the user sees after startup: the welcome page when nobody is
//! logged in, otherwise the dashboard for their role.

use tracing::info;

use docbook_core::entities::{AppointmentStatus, Role, User};
use docbook_service::dto::{AppointmentDetails, DoctorQuery, DoctorResponse, SystemStats};
use docbook_service::{
    AppointmentService, IdentityService, SearchService, ServiceContext, ServiceResult, Session,
    StatsService,
};

/// Startup view, by role
#[derive(Debug, Clone, PartialEq)]
pub enum Landing {
    /// No session: approved doctors to browse
    Welcome { doctors: Vec<DoctorResponse> },
    Patient {
        user: User,
        upcoming: Vec<AppointmentDetails>,
        history: Vec<AppointmentDetails>,
    },
    Doctor {
        user: User,
        requests: Vec<AppointmentDetails>,
        upcoming: Vec<AppointmentDetails>,
        history: Vec<AppointmentDetails>,
    },
    Admin {
        user: User,
        stats: SystemStats,
        pending_doctors: Vec<DoctorResponse>,
    },
}

impl Landing {
    /// Build the view for an optional session
    pub async fn resolve(ctx: &ServiceContext, session: Option<&Session>) -> ServiceResult<Self> {
        let Some(session) = session else {
            let doctors = SearchService::new(ctx)
                .search_doctors(&DoctorQuery::default())
                .await?;
            return Ok(Self::Welcome {
                doctors: doctors.iter().map(DoctorResponse::from).collect(),
            });
        };

        let user = session.user().clone();
        let appointments = AppointmentService::new(ctx);

        match user.role {
            Role::Patient => {
                let upcoming = appointments.list_upcoming(&user.id, user.role).await?;
                let history = appointments.list_history(&user.id, user.role).await?;
                Ok(Self::Patient {
                    upcoming: appointments.detailed(&upcoming).await?,
                    history: appointments.detailed(&history).await?,
                    user,
                })
            }
            Role::Doctor => {
                let (requests, upcoming): (Vec<_>, Vec<_>) = appointments
                    .list_upcoming(&user.id, user.role)
                    .await?
                    .into_iter()
                    .partition(|a| a.status == AppointmentStatus::Pending);
                let history = appointments.list_history(&user.id, user.role).await?;
                Ok(Self::Doctor {
                    requests: appointments.detailed(&requests).await?,
                    upcoming: appointments.detailed(&upcoming).await?,
                    history: appointments.detailed(&history).await?,
                    user,
                })
            }
            Role::Admin => {
                let stats = StatsService::new(ctx).system_stats().await?;
                let pending = IdentityService::new(ctx).list_pending_doctors().await?;
                Ok(Self::Admin {
                    stats,
                    pending_doctors: pending.iter().map(DoctorResponse::from).collect(),
                    user,
                })
            }
        }
    }

    /// Short name of the view
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::Patient { .. } => "patient-dashboard",
            Self::Doctor { .. } => "doctor-dashboard",
            Self::Admin { .. } => "admin-dashboard",
        }
    }

    /// Log a one-line summary of the view
    pub fn log(&self) {
        match self {
            Self::Welcome { doctors } => {
                info!(view = self.name(), doctors = doctors.len(), "Landing view");
            }
            Self::Patient { user, upcoming, history } => {
                info!(
                    view = self.name(),
                    user = %user.name,
                    upcoming = upcoming.len(),
                    history = history.len(),
                    "Landing view"
                );
            }
            Self::Doctor { user, requests, upcoming, history } => {
                info!(
                    view = self.name(),
                    user = %user.name,
                    requests = requests.len(),
                    upcoming = upcoming.len(),
                    history = history.len(),
                    "Landing view"
                );
            }
            Self::Admin { user, pending_doctors, .. } => {
                info!(
                    view = self.name(),
                    user = %user.name,
                    pending_doctors = pending_doctors.len(),
                    "Landing view"
                );
            }
        }
    }
}
