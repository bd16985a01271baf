//! Ports implemented by the infrastructure layer

mod clock;
mod repositories;
mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repositories::{AppointmentRepository, RepoResult, SessionRepository, UserRepository};
pub use storage::KeyValueStore;
