//! User entity - patients, doctors and admins

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Availability;
use crate::error::DomainError;
use crate::value_objects::{Capabilities, EntityId};

/// Account role, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }

    /// Capabilities granted to this role
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Patient => Capabilities::PATIENT,
            Self::Doctor => Capabilities::DOCTOR,
            Self::Admin => Capabilities::ADMIN,
        }
    }

    /// Doctors start unapproved until an admin approves them
    #[inline]
    pub fn approved_by_default(&self) -> bool {
        !matches!(self, Self::Doctor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "doctor" => Ok(Self::Doctor),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::ValidationError(format!("Unknown role: {other}"))),
        }
    }
}

/// Doctor-only profile fields
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorProfile {
    pub specialty: String,
    pub location: String,
    pub bio: String,
    /// Average rating in [0, 5]; 0 means unrated
    pub rating: f64,
    pub availability: Availability,
}

impl DoctorProfile {
    pub fn new(specialty: String, location: String, bio: String) -> Self {
        Self {
            specialty,
            location,
            bio,
            rating: 0.0,
            availability: Availability::weekday_default(),
        }
    }

    /// Fold a new score into the rating
    ///
    /// Keeps the two-term running average: the first score is taken as is,
    /// later scores are averaged with the current value.
    pub fn record_rating(&mut self, score: f64) -> Result<f64, DomainError> {
        if !(1.0..=5.0).contains(&score) {
            return Err(DomainError::InvalidRating(score));
        }
        self.rating = if self.rating > 0.0 {
            (self.rating + score) / 2.0
        } else {
            score
        };
        Ok(self.rating)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub approved: bool,
    pub doctor: Option<DoctorProfile>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User; approval follows the role default
    pub fn new(id: EntityId, name: String, email: String, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            role,
            approved: role.approved_by_default(),
            doctor: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a doctor profile (only meaningful for doctors)
    pub fn with_doctor_profile(mut self, profile: DoctorProfile) -> Self {
        if self.role == Role::Doctor {
            self.doctor = Some(profile);
        }
        self
    }

    #[inline]
    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }

    #[inline]
    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Doctor waiting for an admin decision
    #[inline]
    pub fn is_pending_approval(&self) -> bool {
        self.is_doctor() && !self.approved
    }

    pub fn doctor_profile(&self) -> Option<&DoctorProfile> {
        self.doctor.as_ref()
    }

    pub fn doctor_profile_mut(&mut self) -> Result<&mut DoctorProfile, DomainError> {
        self.doctor.as_mut().ok_or(DomainError::NotADoctor)
    }

    /// Merge a partial update into this user
    ///
    /// Role and id are never touched. Doctor fields on a non-doctor fail.
    pub fn apply(&mut self, patch: UserPatch) -> Result<(), DomainError> {
        if patch.touches_doctor_profile() && !self.is_doctor() {
            return Err(DomainError::NotADoctor);
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(approved) = patch.approved {
            self.approved = approved;
        }

        if self.is_doctor() {
            let profile = self.doctor.get_or_insert_with(|| {
                DoctorProfile::new(String::new(), String::new(), String::new())
            });
            if let Some(specialty) = patch.specialty {
                profile.specialty = specialty;
            }
            if let Some(location) = patch.location {
                profile.location = location;
            }
            if let Some(bio) = patch.bio {
                profile.bio = bio;
            }
            if let Some(rating) = patch.rating {
                profile.rating = rating.clamp(0.0, 5.0);
            }
            if let Some(availability) = patch.availability {
                profile.availability = availability;
            }
        }

        Ok(())
    }
}

/// Partial update of a user; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub approved: Option<bool>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub rating: Option<f64>,
    pub availability: Option<Availability>,
}

impl UserPatch {
    pub fn approved(approved: bool) -> Self {
        Self {
            approved: Some(approved),
            ..Self::default()
        }
    }

    pub fn availability(availability: Availability) -> Self {
        Self {
            availability: Some(availability),
            ..Self::default()
        }
    }

    pub fn rating(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn touches_doctor_profile(&self) -> bool {
        self.specialty.is_some()
            || self.location.is_some()
            || self.bio.is_some()
            || self.rating.is_some()
            || self.availability.is_some()
    }
}
