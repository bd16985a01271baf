//! Entity to DTO mappers

use docbook_core::entities::{Appointment, User};

use super::responses::{AppointmentDetails, DoctorResponse};

impl AppointmentDetails {
    /// Join an appointment with its participants
    ///
    /// Returns `None` when either participant is missing.
    pub fn resolve(appointment: &Appointment, users: &[User]) -> Option<Self> {
        let doctor = users.iter().find(|u| u.id == appointment.doctor_id)?;
        let patient = users.iter().find(|u| u.id == appointment.patient_id)?;

        Some(Self {
            id: appointment.id.clone(),
            date: appointment.date,
            time: appointment.time,
            status: appointment.status,
            reason: appointment
                .reason
                .clone()
                .unwrap_or_else(|| Appointment::DEFAULT_REASON.to_string()),
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.name.clone(),
            doctor_specialty: doctor
                .doctor_profile()
                .map(|p| p.specialty.clone())
                .unwrap_or_default(),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
        })
    }
}

impl From<&User> for DoctorResponse {
    fn from(user: &User) -> Self {
        let profile = user.doctor_profile();
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            specialty: profile.map(|p| p.specialty.clone()).unwrap_or_default(),
            location: profile.map(|p| p.location.clone()).unwrap_or_default(),
            bio: profile.map(|p| p.bio.clone()).unwrap_or_default(),
            rating: profile.map_or(0.0, |p| p.rating),
        }
    }
}

impl From<User> for DoctorResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docbook_core::entities::{DoctorProfile, Role};
    use docbook_core::value_objects::{EntityId, SlotTime};

    fn users() -> Vec<User> {
        vec![
            User::new(EntityId::new("d1"), "Dr. Emily Rodriguez".into(), "d@x.com".into(), Role::Doctor)
                .with_doctor_profile(DoctorProfile::new("Pediatrics".into(), "Chicago, IL".into(), String::new())),
            User::new(EntityId::new("p1"), "John Patient".into(), "p@x.com".into(), Role::Patient),
        ]
    }

    fn appointment(doctor: &str, patient: &str) -> Appointment {
        Appointment::new(
            EntityId::new("a1"),
            EntityId::new(doctor),
            EntityId::new(patient),
            NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
            SlotTime::parse("11:00").unwrap(),
        )
    }

    #[test]
    fn test_resolve_names() {
        let details = AppointmentDetails::resolve(&appointment("d1", "p1"), &users()).unwrap();
        assert_eq!(details.doctor_name, "Dr. Emily Rodriguez");
        assert_eq!(details.doctor_specialty, "Pediatrics");
        assert_eq!(details.patient_name, "John Patient");
        assert_eq!(details.reason, "General consultation");
    }

    #[test]
    fn test_dangling_reference_is_dropped() {
        assert!(AppointmentDetails::resolve(&appointment("gone", "p1"), &users()).is_none());
        assert!(AppointmentDetails::resolve(&appointment("d1", "gone"), &users()).is_none());
    }

    #[test]
    fn test_doctor_response() {
        let response = DoctorResponse::from(&users()[0]);
        assert_eq!(response.location, "Chicago, IL");
        assert_eq!(response.rating, 0.0);
    }
}
