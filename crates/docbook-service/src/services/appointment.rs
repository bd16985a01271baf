//! Appointment service
//!
//! Booking, rescheduling and the lifecycle transitions, each checked against
//! the acting user's role and participation.

use tracing::{info, instrument, warn};
use validator::Validate;

use docbook_core::entities::{Appointment, AppointmentEvent, Role, User};
use docbook_core::error::DomainError;
use docbook_core::value_objects::{Capabilities, EntityId};

use crate::dto::{AppointmentDetails, BookAppointmentRequest, RescheduleRequest};

use super::actor::Actor;
use super::availability::AvailabilityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Appointment service
pub struct AppointmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppointmentService<'a> {
    /// Create a new AppointmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Booking
    // ========================================================================

    /// Patient books a pending appointment
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id, doctor_id = %request.doctor_id, date = %request.date, time = %request.time))]
    pub async fn book(
        &self,
        actor: &Actor,
        request: BookAppointmentRequest,
    ) -> ServiceResult<Appointment> {
        actor.require(Capabilities::BOOK_APPOINTMENTS)?;
        request.validate()?;

        let today = self.ctx.clock().today();
        if request.date < today {
            return Err(DomainError::DateInPast(request.date).into());
        }

        let _guard = self.ctx.lock_writes().await;

        self.ctx
            .user_repo()
            .find_by_id(&request.doctor_id)
            .await?
            .filter(|u| u.is_doctor() && u.approved)
            .ok_or_else(|| DomainError::DoctorNotFound(request.doctor_id.clone()))?;

        let available = AvailabilityService::new(self.ctx)
            .is_slot_available(&request.doctor_id, request.date, request.time)
            .await?;
        if !available {
            warn!("Booking refused: slot unavailable");
            return Err(DomainError::SlotUnavailable {
                doctor_id: request.doctor_id,
                date: request.date,
                time: request.time,
            }
            .into());
        }

        let reason = request
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| Appointment::DEFAULT_REASON.to_string());
        let appointment = Appointment::new(
            self.ctx.generate_id(),
            request.doctor_id,
            actor.id.clone(),
            request.date,
            request.time,
        )
        .with_reason(Some(reason));

        self.ctx.appointment_repo().create(&appointment).await?;

        info!(appointment_id = %appointment.id, "Appointment booked");

        Ok(appointment)
    }

    /// Patient moves their pending appointment to another slot
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id, date = %request.date, time = %request.time))]
    pub async fn reschedule(
        &self,
        actor: &Actor,
        appointment_id: &EntityId,
        request: RescheduleRequest,
    ) -> ServiceResult<Appointment> {
        actor.require(Capabilities::MANAGE_OWN_BOOKINGS)?;

        let _guard = self.ctx.lock_writes().await;

        let mut appointment = self.get(appointment_id).await?;
        if appointment.patient_id != actor.id {
            return Err(DomainError::NotParticipant.into());
        }
        if appointment.status.next(AppointmentEvent::Reschedule).is_none() {
            return Err(DomainError::InvalidTransition {
                from: appointment.status,
                event: AppointmentEvent::Reschedule,
            }
            .into());
        }
        if request.date < self.ctx.clock().today() {
            return Err(DomainError::DateInPast(request.date).into());
        }

        let available = AvailabilityService::new(self.ctx)
            .is_slot_available(&appointment.doctor_id, request.date, request.time)
            .await?;
        if !available {
            warn!(appointment_id = %appointment_id, "Reschedule refused: slot unavailable");
            return Err(DomainError::SlotUnavailable {
                doctor_id: appointment.doctor_id,
                date: request.date,
                time: request.time,
            }
            .into());
        }

        appointment.reschedule(request.date, request.time)?;
        self.ctx.appointment_repo().update(&appointment).await?;

        info!(appointment_id = %appointment_id, "Appointment rescheduled");

        Ok(appointment)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Cancel; open to the patient, the doctor and admins
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn cancel(&self, actor: &Actor, appointment_id: &EntityId) -> ServiceResult<Appointment> {
        let appointment = self.get(appointment_id).await?;

        let allowed = match actor.role {
            Role::Admin => actor.require(Capabilities::OVERRIDE_APPOINTMENTS).is_ok(),
            Role::Patient => {
                actor.require(Capabilities::MANAGE_OWN_BOOKINGS).is_ok()
                    && appointment.patient_id == actor.id
            }
            Role::Doctor => {
                actor.require(Capabilities::REVIEW_APPOINTMENTS).is_ok()
                    && appointment.doctor_id == actor.id
            }
        };
        if !allowed {
            return Err(DomainError::NotParticipant.into());
        }

        self.transition(appointment, AppointmentEvent::Cancel).await
    }

    /// Doctor accepts a pending request
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn approve(&self, actor: &Actor, appointment_id: &EntityId) -> ServiceResult<Appointment> {
        let appointment = self.get_as_doctor(actor, appointment_id).await?;
        self.transition(appointment, AppointmentEvent::Approve).await
    }

    /// Doctor declines a pending request
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn decline(&self, actor: &Actor, appointment_id: &EntityId) -> ServiceResult<Appointment> {
        let appointment = self.get_as_doctor(actor, appointment_id).await?;
        self.transition(appointment, AppointmentEvent::Decline).await
    }

    /// Doctor marks a confirmed visit as done
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn complete(&self, actor: &Actor, appointment_id: &EntityId) -> ServiceResult<Appointment> {
        let appointment = self.get_as_doctor(actor, appointment_id).await?;
        self.transition(appointment, AppointmentEvent::Complete).await
    }

    /// Admin confirms a pending request on the doctor's behalf
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn force_approve(
        &self,
        actor: &Actor,
        appointment_id: &EntityId,
    ) -> ServiceResult<Appointment> {
        actor.require(Capabilities::OVERRIDE_APPOINTMENTS)?;
        let appointment = self.get(appointment_id).await?;
        self.transition(appointment, AppointmentEvent::ForceApprove).await
    }

    /// Admin removes an appointment in any state
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, actor: &Actor, appointment_id: &EntityId) -> ServiceResult<()> {
        actor.require(Capabilities::OVERRIDE_APPOINTMENTS)?;

        let _guard = self.ctx.lock_writes().await;
        if !self.ctx.appointment_repo().delete(appointment_id).await? {
            return Err(ServiceError::not_found("Appointment", appointment_id.to_string()));
        }

        info!(appointment_id = %appointment_id, "Appointment deleted");

        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get appointment by ID
    #[instrument(skip(self))]
    pub async fn get(&self, appointment_id: &EntityId) -> ServiceResult<Appointment> {
        self.ctx
            .appointment_repo()
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Appointment", appointment_id.to_string()))
    }

    /// Today or later and not cancelled, in booking order
    #[instrument(skip(self))]
    pub async fn list_upcoming(&self, user_id: &EntityId, role: Role) -> ServiceResult<Vec<Appointment>> {
        let today = self.ctx.clock().today();
        let appointments = self.ctx.appointment_repo().list().await?;

        Ok(appointments
            .into_iter()
            .filter(|apt| apt.belongs_to(user_id, role) && apt.is_upcoming(today))
            .collect())
    }

    /// Past or finished, in booking order
    #[instrument(skip(self))]
    pub async fn list_history(&self, user_id: &EntityId, role: Role) -> ServiceResult<Vec<Appointment>> {
        let today = self.ctx.clock().today();
        let appointments = self.ctx.appointment_repo().list().await?;

        Ok(appointments
            .into_iter()
            .filter(|apt| apt.belongs_to(user_id, role) && apt.is_history(today))
            .collect())
    }

    /// Every appointment
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<Appointment>> {
        Ok(self.ctx.appointment_repo().list().await?)
    }

    /// Resolve participant names, dropping dangling appointments
    #[instrument(skip(self, appointments), fields(count = appointments.len()))]
    pub async fn detailed(&self, appointments: &[Appointment]) -> ServiceResult<Vec<AppointmentDetails>> {
        let users: Vec<User> = self.ctx.user_repo().list().await?;

        Ok(appointments
            .iter()
            .filter_map(|apt| AppointmentDetails::resolve(apt, &users))
            .collect())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn get_as_doctor(&self, actor: &Actor, appointment_id: &EntityId) -> ServiceResult<Appointment> {
        actor.require(Capabilities::REVIEW_APPOINTMENTS)?;

        let appointment = self.get(appointment_id).await?;
        if appointment.doctor_id != actor.id {
            return Err(DomainError::NotParticipant.into());
        }
        Ok(appointment)
    }

    /// Apply `event` to a fresh read of `checked` under the write guard
    async fn transition(
        &self,
        checked: Appointment,
        event: AppointmentEvent,
    ) -> ServiceResult<Appointment> {
        let _guard = self.ctx.lock_writes().await;

        let mut appointment = self.get(&checked.id).await?;
        let from = appointment.status;
        let to = appointment.apply(event)?;
        self.ctx.appointment_repo().update(&appointment).await?;

        info!(appointment_id = %appointment.id, %event, %from, %to, "Appointment status changed");

        Ok(appointment)
    }
}
