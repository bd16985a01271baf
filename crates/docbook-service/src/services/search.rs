//! Doctor search

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use docbook_core::entities::User;

use crate::dto::DoctorQuery;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::identity::IdentityService;

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Approved doctors matching every non-empty filter, in registration order
    #[instrument(skip(self))]
    pub async fn search_doctors(&self, query: &DoctorQuery) -> ServiceResult<Vec<User>> {
        let doctors = IdentityService::new(self.ctx).list_approved_doctors().await?;
        let matches: Vec<User> = doctors.into_iter().filter(|d| query.matches(d)).collect();

        debug!(results = matches.len(), "Doctor search");

        Ok(matches)
    }

    /// Distinct specialties of approved doctors, sorted
    #[instrument(skip(self))]
    pub async fn specialties(&self) -> ServiceResult<Vec<String>> {
        let doctors = IdentityService::new(self.ctx).list_approved_doctors().await?;

        Ok(doctors
            .iter()
            .filter_map(User::doctor_profile)
            .map(|p| p.specialty.clone())
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }
}

impl DoctorQuery {
    /// Free text hits name, specialty or location; specialty is exact;
    /// location is a substring. Input is compared as given, untrimmed.
    pub fn matches(&self, doctor: &User) -> bool {
        let Some(profile) = doctor.doctor_profile() else {
            return false;
        };

        let text = self.query.to_lowercase();
        let text_ok = text.is_empty()
            || [&doctor.name, &profile.specialty, &profile.location]
                .into_iter()
                .any(|field| field.to_lowercase().contains(&text));

        let specialty_ok = self.specialty.is_empty() || profile.specialty == self.specialty;

        let location = self.location.to_lowercase();
        let location_ok =
            location.is_empty() || profile.location.to_lowercase().contains(&location);

        text_ok && specialty_ok && location_ok
    }
}
