//! Response DTOs handed to presentation collaborators
//!
//! All response DTOs implement `Serialize` with camelCase field names.

use chrono::NaiveDate;
use serde::Serialize;

use docbook_core::entities::AppointmentStatus;
use docbook_core::value_objects::{EntityId, SlotTime};

/// Appointment with participant names resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub id: EntityId,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub status: AppointmentStatus,
    pub reason: String,
    pub doctor_id: EntityId,
    pub doctor_name: String,
    pub doctor_specialty: String,
    pub patient_id: EntityId,
    pub patient_name: String,
}

/// Public view of an approved doctor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub id: EntityId,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub bio: String,
    pub rating: f64,
}

/// Counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_users: usize,
    pub total_patients: usize,
    pub total_doctors: usize,
    pub approved_doctors: usize,
    pub pending_doctors: usize,
    pub total_appointments: usize,
    pub pending_appointments: usize,
    pub confirmed_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
}
