//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod entity_id;
mod schedule;

pub use capabilities::Capabilities;
pub use entity_id::{EntityId, EntityIdParseError, IdGenerator};
pub use schedule::{DayOfWeek, ScheduleParseError, SlotTime};
