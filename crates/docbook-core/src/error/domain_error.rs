//! Domain errors - error types for the domain layer

use chrono::NaiveDate;
use thiserror::Error;

use crate::entities::{AppointmentEvent, AppointmentStatus};
use crate::value_objects::{EntityId, SlotTime};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(EntityId),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid rating {0}: must be between 1 and 5")]
    InvalidRating(f64),

    #[error("Date {0} is in the past")]
    DateInPast(NaiveDate),

    #[error("Only doctor accounts have a doctor profile")]
    NotADoctor,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing capability: {0}")]
    MissingCapability(String),

    #[error("Not a participant of this appointment")]
    NotParticipant,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Slot {date} {time} is not available for doctor {doctor_id}")]
    SlotUnavailable {
        doctor_id: EntityId,
        date: NaiveDate,
        time: SlotTime,
    },

    #[error("Cannot {event} an appointment that is {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        event: AppointmentEvent,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Corrupt record in {collection}: {reason}")]
    CorruptRecord {
        collection: &'static str,
        reason: String,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for collaborators
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::DoctorNotFound(_) => "UNKNOWN_DOCTOR",
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::DateInPast(_) => "DATE_IN_PAST",
            Self::NotADoctor => "NOT_A_DOCTOR",

            // Authorization
            Self::MissingCapability(_) => "MISSING_CAPABILITY",
            Self::NotParticipant => "NOT_PARTICIPANT",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Business Rules
            Self::SlotUnavailable { .. } => "SLOT_UNAVAILABLE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",

            // Infrastructure
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::CorruptRecord { .. } => "CORRUPT_RECORD",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::DoctorNotFound(_) | Self::AppointmentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidRating(_)
                | Self::DateInPast(_)
                | Self::NotADoctor
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingCapability(_) | Self::NotParticipant)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::SlotUnavailable { .. } | Self::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(EntityId::new("u1"));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::MissingCapability("BOOK_APPOINTMENTS".to_string());
        assert_eq!(err.code(), "MISSING_CAPABILITY");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(EntityId::new("u1")).is_not_found());
        assert!(DomainError::AppointmentNotFound(EntityId::new("a1")).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        let err = DomainError::InvalidTransition {
            from: AppointmentStatus::Completed,
            event: AppointmentEvent::Cancel,
        };
        assert!(err.is_conflict());
        assert!(DomainError::EmailAlreadyExists.is_conflict());
        assert!(!DomainError::InvalidEmail.is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::SlotUnavailable {
            doctor_id: EntityId::new("doc1"),
            date: NaiveDate::from_ymd_opt(2030, 3, 4).unwrap(),
            time: SlotTime::new(10, 0).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Slot 2030-03-04 10:00 is not available for doctor doc1"
        );

        let err = DomainError::InvalidTransition {
            from: AppointmentStatus::Cancelled,
            event: AppointmentEvent::Approve,
        };
        assert_eq!(err.to_string(), "Cannot approve an appointment that is cancelled");
    }
}
