//! Appointment entity and its lifecycle
//!
//! ```text
//! book ──► pending ──approve / force_approve──► confirmed ──complete──► completed
//!            │  ▲                                   │
//!            │  └── reschedule                      │
//!            └──────decline / cancel──► cancelled ◄─┘ cancel
//! ```
//!
//! `completed` and `cancelled` are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Role;
use crate::error::DomainError;
use crate::value_objects::{EntityId, SlotTime};

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// No transition leaves a terminal status
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Status reached by applying `event`, if the transition is defined
    pub fn next(self, event: AppointmentEvent) -> Option<Self> {
        use AppointmentEvent as E;
        use AppointmentStatus as S;

        match (self, event) {
            (S::Pending, E::Approve | E::ForceApprove) => Some(S::Confirmed),
            (S::Pending, E::Decline) => Some(S::Cancelled),
            (S::Pending, E::Reschedule) => Some(S::Pending),
            (S::Pending | S::Confirmed, E::Cancel) => Some(S::Cancelled),
            (S::Confirmed, E::Complete) => Some(S::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| DomainError::ValidationError(format!("Unknown status: {s}")))
    }
}

/// Lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentEvent {
    /// Doctor accepts a pending request
    Approve,
    /// Doctor rejects a pending request
    Decline,
    /// Admin confirms on the doctor's behalf
    ForceApprove,
    /// Doctor marks a confirmed visit as done
    Complete,
    /// Any participant or an admin calls it off
    Cancel,
    /// Patient moves a pending request to another slot
    Reschedule,
}

impl AppointmentEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
            Self::ForceApprove => "force-approve",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Reschedule => "reschedule",
        }
    }
}

impl fmt::Display for AppointmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: EntityId,
    pub doctor_id: EntityId,
    pub patient_id: EntityId,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Reason recorded when the patient leaves it blank
    pub const DEFAULT_REASON: &'static str = "General consultation";

    /// Create a new pending appointment
    pub fn new(
        id: EntityId,
        doctor_id: EntityId,
        patient_id: EntityId,
        date: NaiveDate,
        time: SlotTime,
    ) -> Self {
        Self {
            id,
            doctor_id,
            patient_id,
            date,
            time,
            status: AppointmentStatus::Pending,
            reason: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason.filter(|r| !r.trim().is_empty());
        self
    }

    /// Apply a lifecycle event, rejecting undefined transitions
    pub fn apply(&mut self, event: AppointmentEvent) -> Result<AppointmentStatus, DomainError> {
        let next = self
            .status
            .next(event)
            .ok_or(DomainError::InvalidTransition {
                from: self.status,
                event,
            })?;
        self.status = next;
        Ok(next)
    }

    /// Move a pending appointment to a new slot; status stays pending
    pub fn reschedule(&mut self, date: NaiveDate, time: SlotTime) -> Result<(), DomainError> {
        self.apply(AppointmentEvent::Reschedule)?;
        self.date = date;
        self.time = time;
        Ok(())
    }

    /// Check if this appointment blocks (doctor, date, time)
    pub fn occupies(&self, doctor_id: &EntityId, date: NaiveDate, time: SlotTime) -> bool {
        self.status != AppointmentStatus::Cancelled
            && &self.doctor_id == doctor_id
            && self.date == date
            && self.time == time
    }

    /// Check if the user takes part as doctor or patient
    pub fn involves(&self, user_id: &EntityId) -> bool {
        &self.doctor_id == user_id || &self.patient_id == user_id
    }

    /// Participant match as seen from a role's dashboard
    ///
    /// Patients see appointments they booked; everyone else sees the ones
    /// where they are the doctor.
    pub fn belongs_to(&self, user_id: &EntityId, role: Role) -> bool {
        match role {
            Role::Patient => &self.patient_id == user_id,
            Role::Doctor | Role::Admin => &self.doctor_id == user_id,
        }
    }

    /// Today or later and not cancelled
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today && self.status != AppointmentStatus::Cancelled
    }

    /// In the past, or already finished either way
    pub fn is_history(&self, today: NaiveDate) -> bool {
        self.date < today || self.status.is_terminal()
    }
}
