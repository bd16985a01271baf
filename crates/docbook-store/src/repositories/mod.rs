//! Repository implementations
//!
//! Key-value implementations of the repository traits defined in docbook-core.
//! Each repository reads its whole collection, changes it in memory and
//! writes it back.

mod appointment;
mod error;
mod session;
mod user;

pub use appointment::KvAppointmentRepository;
pub use error::{
    appointment_not_found, map_corrupt, map_io_error, map_serialize_error, user_not_found,
};
pub use session::KvSessionRepository;
pub use user::KvUserRepository;
