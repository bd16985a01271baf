//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use docbook_core::value_objects::{EntityId, SlotTime};
use docbook_service::dto::{BookAppointmentRequest, LoginRequest, RegisterRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Seeded demo accounts
pub const PATIENT_EMAIL: &str = "patient@example.com";
pub const DOCTOR_EMAIL: &str = "doctor@example.com";
pub const DOCTOR2_EMAIL: &str = "doctor2@example.com";
pub const ADMIN_EMAIL: &str = "admin@docbook.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const ADMIN_PASSWORD: &str = "Admin123";

/// Password used by generated accounts
pub const TEST_PASSWORD: &str = "TestPass123";

/// 2030-01-07, a Monday
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 7).unwrap_or_default()
}

/// Parse "HH:MM" for fixtures
pub fn slot(time: &str) -> SlotTime {
    SlotTime::parse(time).unwrap_or(SlotTime::DAY_START)
}

pub fn patient_registration() -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        name: format!("Patient {suffix}"),
        email: format!("patient{suffix}@example.com"),
        password: TEST_PASSWORD.to_string(),
        role: "patient".to_string(),
        specialty: None,
        location: None,
        bio: None,
    }
}

pub fn doctor_registration(specialty: &str, location: &str) -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        name: format!("Dr. Test {suffix}"),
        email: format!("doctor{suffix}@example.com"),
        password: TEST_PASSWORD.to_string(),
        role: "doctor".to_string(),
        specialty: Some(specialty.to_string()),
        location: Some(location.to_string()),
        bio: Some(String::new()),
    }
}

pub fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn booking(doctor_id: &EntityId, date: NaiveDate, time: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        doctor_id: doctor_id.clone(),
        date,
        time: slot(time),
        reason: None,
    }
}
