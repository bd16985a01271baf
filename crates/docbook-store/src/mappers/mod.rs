//! Entity to record mappers
//!
//! - `TryFrom<&Record> for Entity`: parse persisted JSON into domain objects,
//!   failing with `DomainError::CorruptRecord`
//! - `Record::new` / `From<&Entity>`: prepare entity data for persistence

mod appointment;
mod user;

pub use appointment::DATE_FORMAT;
pub use user::{availability_from_records, availability_records};
