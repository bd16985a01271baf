//! # docbook-core
//!
//! Domain layer containing entities, value objects, the appointment
//! lifecycle and repository traits.
//! This crate has zero dependencies on infrastructure (storage, runtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Appointment, AppointmentEvent, AppointmentStatus, Availability, AvailabilitySlot,
    DaySchedule, DoctorProfile, Role, User, UserPatch,
};
pub use error::DomainError;
pub use traits::{
    AppointmentRepository, Clock, FixedClock, KeyValueStore, RepoResult, SessionRepository,
    SystemClock, UserRepository,
};
pub use value_objects::{
    Capabilities, DayOfWeek, EntityId, EntityIdParseError, IdGenerator, ScheduleParseError,
    SlotTime,
};
