//! User entity <-> record mapper

use docbook_core::entities::{Availability, AvailabilitySlot, DoctorProfile, Role, User};
use docbook_core::error::DomainError;
use docbook_core::value_objects::{DayOfWeek, EntityId, SlotTime};

use crate::kv::keys;
use crate::models::{AvailabilityRecord, UserRecord};

fn corrupt(reason: impl Into<String>) -> DomainError {
    DomainError::CorruptRecord {
        collection: keys::USERS,
        reason: reason.into(),
    }
}

impl From<&AvailabilitySlot> for AvailabilityRecord {
    fn from(slot: &AvailabilitySlot) -> Self {
        Self {
            day: slot.day.as_str().to_string(),
            time: slot.time.to_string(),
            available: slot.enabled,
        }
    }
}

impl TryFrom<&AvailabilityRecord> for AvailabilitySlot {
    type Error = DomainError;

    fn try_from(record: &AvailabilityRecord) -> Result<Self, Self::Error> {
        let day = record.day.parse::<DayOfWeek>().map_err(|e| corrupt(e.to_string()))?;
        let time = SlotTime::parse(&record.time).map_err(|e| corrupt(e.to_string()))?;
        Ok(AvailabilitySlot::new(day, time, record.available))
    }
}

/// Map an availability template to its persisted form
pub fn availability_records(availability: &Availability) -> Vec<AvailabilityRecord> {
    availability.slots().iter().map(AvailabilityRecord::from).collect()
}

/// Parse persisted template entries, keeping the first of any duplicates
pub fn availability_from_records(records: &[AvailabilityRecord]) -> Result<Availability, DomainError> {
    let slots = records
        .iter()
        .map(AvailabilitySlot::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Availability::from_slots(slots))
}

impl UserRecord {
    /// Build a record from an entity; `password_hash` is `None` for snapshots
    pub fn new(user: &User, password_hash: Option<&str>) -> Self {
        let profile = user.doctor_profile();
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: password_hash.map(str::to_string),
            role: user.role.as_str().to_string(),
            approved: user.approved,
            specialty: profile.map(|p| p.specialty.clone()),
            location: profile.map(|p| p.location.clone()),
            bio: profile.map(|p| p.bio.clone()),
            rating: profile.map(|p| p.rating),
            availability: profile.map(|p| availability_records(&p.availability)),
            created_at: user.created_at,
        }
    }
}

impl TryFrom<&UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: &UserRecord) -> Result<Self, Self::Error> {
        let role: Role = record
            .role
            .parse()
            .map_err(|_| corrupt(format!("unknown role {:?} for user {}", record.role, record.id)))?;

        let doctor = if role == Role::Doctor {
            let availability = match &record.availability {
                Some(records) => availability_from_records(records)?,
                None => Availability::new(),
            };
            Some(DoctorProfile {
                specialty: record.specialty.clone().unwrap_or_default(),
                location: record.location.clone().unwrap_or_default(),
                bio: record.bio.clone().unwrap_or_default(),
                rating: record.rating.unwrap_or(0.0).clamp(0.0, 5.0),
                availability,
            })
        } else {
            None
        };

        Ok(User {
            id: EntityId::new(record.id.clone()),
            name: record.name.clone(),
            email: record.email.clone(),
            role,
            approved: record.approved,
            doctor,
            created_at: record.created_at,
        })
    }
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::try_from(&record)
    }
}
