//! Data transfer objects for service inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation for form inputs
//! - Response DTOs for presentation collaborators
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BookAppointmentRequest, DoctorQuery, LoginRequest, RegisterRequest, RescheduleRequest,
    UpdateProfileRequest,
};
pub use responses::{AppointmentDetails, DoctorResponse, SystemStats};
