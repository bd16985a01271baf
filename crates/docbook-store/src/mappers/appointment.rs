//! Appointment entity <-> record mapper

use chrono::NaiveDate;

use docbook_core::entities::{Appointment, AppointmentStatus};
use docbook_core::error::DomainError;
use docbook_core::value_objects::{EntityId, SlotTime};

use crate::kv::keys;
use crate::models::AppointmentRecord;

/// Date format used in records and backups
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn corrupt(id: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::CorruptRecord {
        collection: keys::APPOINTMENTS,
        reason: format!("appointment {id}: {reason}"),
    }
}

impl From<&Appointment> for AppointmentRecord {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.to_string(),
            doctor_id: appointment.doctor_id.to_string(),
            patient_id: appointment.patient_id.to_string(),
            date: appointment.date.format(DATE_FORMAT).to_string(),
            time: appointment.time.to_string(),
            status: appointment.status.as_str().to_string(),
            reason: appointment.reason.clone(),
            created_at: appointment.created_at,
        }
    }
}

impl TryFrom<&AppointmentRecord> for Appointment {
    type Error = DomainError;

    fn try_from(record: &AppointmentRecord) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
            .map_err(|e| corrupt(&record.id, e))?;
        let time = SlotTime::parse(&record.time).map_err(|e| corrupt(&record.id, e))?;
        let status = record
            .status
            .parse::<AppointmentStatus>()
            .map_err(|e| corrupt(&record.id, e))?;

        Ok(Appointment {
            id: EntityId::new(record.id.clone()),
            doctor_id: EntityId::new(record.doctor_id.clone()),
            patient_id: EntityId::new(record.patient_id.clone()),
            date,
            time,
            status,
            reason: record.reason.clone(),
            created_at: record.created_at,
        })
    }
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = DomainError;

    fn try_from(record: AppointmentRecord) -> Result<Self, Self::Error> {
        Appointment::try_from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment() -> Appointment {
        Appointment::new(
            EntityId::new("a1"),
            EntityId::new("d1"),
            EntityId::new("p1"),
            NaiveDate::from_ymd_opt(2030, 5, 6).unwrap(),
            SlotTime::parse("14:30").unwrap(),
        )
        .with_reason(Some("Skin consultation".to_string()))
    }

    #[test]
    fn test_record_layout() {
        let json = serde_json::to_value(AppointmentRecord::from(&appointment())).unwrap();
        assert_eq!(json["doctorId"], "d1");
        assert_eq!(json["patientId"], "p1");
        assert_eq!(json["date"], "2030-05-06");
        assert_eq!(json["time"], "14:30");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["reason"], "Skin consultation");
    }

    #[test]
    fn test_roundtrip() {
        let apt = appointment();
        let back = Appointment::try_from(AppointmentRecord::from(&apt)).unwrap();
        assert_eq!(back, apt);
    }

    #[test]
    fn test_bad_fields_are_corrupt() {
        let mut record = AppointmentRecord::from(&appointment());
        record.status = "archived".to_string();
        assert!(matches!(
            Appointment::try_from(&record),
            Err(DomainError::CorruptRecord { collection: "docbook_appointments", .. })
        ));

        let mut record = AppointmentRecord::from(&appointment());
        record.date = "06/05/2030".to_string();
        assert!(Appointment::try_from(&record).is_err());
    }
}
