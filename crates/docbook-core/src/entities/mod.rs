//! Domain entities - core business objects

mod appointment;
mod availability;
mod user;

pub use appointment::{Appointment, AppointmentEvent, AppointmentStatus};
pub use availability::{Availability, AvailabilitySlot, DaySchedule};
pub use user::{DoctorProfile, Role, User, UserPatch};
