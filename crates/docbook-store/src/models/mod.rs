//! Storage records - serde structs matching the persisted JSON layout

mod appointment;
mod user;

pub use appointment::AppointmentRecord;
pub use user::{AvailabilityRecord, UserRecord};
