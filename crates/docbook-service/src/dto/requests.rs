//! Request DTOs for service operations
//!
//! Request DTOs implement `Deserialize` so collaborators can build them from
//! form data, and `Validate` for input validation.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use docbook_core::entities::UserPatch;
use docbook_core::value_objects::{EntityId, SlotTime};

// ============================================================================
// Identity Requests
// ============================================================================

/// Self-service registration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    /// `patient` or `doctor`
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,

    #[serde(default)]
    pub specialty: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,
}

/// Login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Doctor's own profile edit
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Specialty must be 1-100 characters"))]
    pub specialty: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,
}

impl From<UpdateProfileRequest> for UserPatch {
    fn from(request: UpdateProfileRequest) -> Self {
        UserPatch {
            specialty: request.specialty,
            location: request.location,
            bio: request.bio,
            ..UserPatch::default()
        }
    }
}

// ============================================================================
// Appointment Requests
// ============================================================================

/// Booking form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: EntityId,

    pub date: NaiveDate,

    pub time: SlotTime,

    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    #[serde(default)]
    pub reason: Option<String>,
}

/// New slot for a pending appointment
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
    pub time: SlotTime,
}

// ============================================================================
// Search Requests
// ============================================================================

/// Doctor search filters; empty fields do not filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorQuery {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub specialty: String,

    #[serde(default)]
    pub location: String,
}

impl DoctorQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}
