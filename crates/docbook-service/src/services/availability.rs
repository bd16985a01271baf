//! Availability engine
//!
//! Combines a doctor's weekly template with their bookings to decide which
//! (date, time) slots can still be booked.

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use docbook_core::entities::{Appointment, Availability, DaySchedule, User, UserPatch};
use docbook_core::value_objects::{Capabilities, DayOfWeek, EntityId, SlotTime};

use super::actor::Actor;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::IdentityService;

/// Availability service
pub struct AvailabilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AvailabilityService<'a> {
    /// Create a new AvailabilityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check if a doctor can take a booking at (date, time)
    ///
    /// False for unknown users and non-doctors.
    #[instrument(skip(self))]
    pub async fn is_slot_available(
        &self,
        doctor_id: &EntityId,
        date: NaiveDate,
        time: SlotTime,
    ) -> ServiceResult<bool> {
        let Some(doctor) = self.ctx.user_repo().find_by_id(doctor_id).await? else {
            debug!("Unknown doctor");
            return Ok(false);
        };
        let bookings = self.ctx.appointment_repo().find_by_doctor(doctor_id).await?;

        Ok(slot_open(&doctor, &bookings, date, time))
    }

    /// Flip a template entry in memory; returns the new state
    pub fn toggle_slot(availability: &mut Availability, day: DayOfWeek, time: SlotTime) -> bool {
        availability.toggle(day, time)
    }

    /// Persist a doctor's weekly template
    #[instrument(skip(self, actor, availability), fields(actor_id = %actor.id, slots = availability.len()))]
    pub async fn save_availability(
        &self,
        actor: &Actor,
        doctor_id: &EntityId,
        availability: Availability,
    ) -> ServiceResult<User> {
        actor.require_self(doctor_id, Capabilities::MANAGE_AVAILABILITY)?;

        let doctor = IdentityService::new(self.ctx)
            .update(doctor_id, UserPatch::availability(availability))
            .await?;

        info!(doctor_id = %doctor_id, "Availability saved");

        Ok(doctor)
    }

    /// Bookable times of the clinic day on `date`
    #[instrument(skip(self))]
    pub async fn open_times(
        &self,
        doctor_id: &EntityId,
        date: NaiveDate,
    ) -> ServiceResult<Vec<SlotTime>> {
        let Some(doctor) = self.ctx.user_repo().find_by_id(doctor_id).await? else {
            return Ok(Vec::new());
        };
        let bookings = self.ctx.appointment_repo().find_by_doctor(doctor_id).await?;

        Ok(SlotTime::day_grid()
            .into_iter()
            .filter(|&time| slot_open(&doctor, &bookings, date, time))
            .collect())
    }

    /// The doctor's weekly template as a day × time grid
    #[instrument(skip(self))]
    pub async fn weekly_grid(&self, doctor_id: &EntityId) -> ServiceResult<Vec<DaySchedule>> {
        let doctor = IdentityService::new(self.ctx).get_user(doctor_id).await?;
        let profile = doctor
            .doctor_profile()
            .ok_or_else(|| ServiceError::not_found("Doctor", doctor_id.to_string()))?;

        Ok(profile.availability.grid())
    }
}

/// Template allows the slot and no live booking holds it
fn slot_open(doctor: &User, bookings: &[Appointment], date: NaiveDate, time: SlotTime) -> bool {
    let Some(profile) = doctor.doctor_profile() else {
        return false;
    };
    if !profile.availability.is_enabled(DayOfWeek::of(date), time) {
        return false;
    }
    !bookings
        .iter()
        .any(|apt| apt.occupies(&doctor.id, date, time))
}
