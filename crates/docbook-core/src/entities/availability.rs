//! Weekly availability template of a doctor
//!
//! A sparse set of (day, time) entries. Entries absent from the set are
//! implicitly disabled. At most one entry exists per (day, time).

use crate::value_objects::{DayOfWeek, SlotTime};

/// One entry of the weekly template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub day: DayOfWeek,
    pub time: SlotTime,
    pub enabled: bool,
}

impl AvailabilitySlot {
    pub fn new(day: DayOfWeek, time: SlotTime, enabled: bool) -> Self {
        Self { day, time, enabled }
    }

    #[inline]
    fn matches(&self, day: DayOfWeek, time: SlotTime) -> bool {
        self.day == day && self.time == time
    }
}

/// One column of the weekly grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: DayOfWeek,
    pub slots: Vec<(SlotTime, bool)>,
}

/// Weekly recurring availability, independent of calendar dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    slots: Vec<AvailabilitySlot>,
}

impl Availability {
    /// Times enabled on every weekday for new doctors
    const DEFAULT_TIMES: [(u8, u8); 6] = [(9, 0), (10, 0), (11, 0), (14, 0), (15, 0), (16, 0)];

    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw entries, keeping the first entry for each (day, time)
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = AvailabilitySlot>,
    {
        let mut availability = Self::new();
        for slot in slots {
            if availability.find(slot.day, slot.time).is_none() {
                availability.slots.push(slot);
            }
        }
        availability
    }

    /// Monday to Friday at 09:00, 10:00, 11:00, 14:00, 15:00 and 16:00
    pub fn weekday_default() -> Self {
        let slots = DayOfWeek::WEEKDAYS.into_iter().flat_map(|day| {
            Self::DEFAULT_TIMES.into_iter().filter_map(move |(hour, minute)| {
                SlotTime::new(hour, minute)
                    .ok()
                    .map(|time| AvailabilitySlot::new(day, time, true))
            })
        });
        Self::from_slots(slots)
    }

    fn find(&self, day: DayOfWeek, time: SlotTime) -> Option<usize> {
        self.slots.iter().position(|s| s.matches(day, time))
    }

    /// Check if the template has an enabled entry for (day, time)
    pub fn is_enabled(&self, day: DayOfWeek, time: SlotTime) -> bool {
        self.slots
            .iter()
            .any(|s| s.matches(day, time) && s.enabled)
    }

    /// Flip an existing entry, or insert it enabled. Returns the new state.
    pub fn toggle(&mut self, day: DayOfWeek, time: SlotTime) -> bool {
        match self.find(day, time) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.enabled = !slot.enabled;
                slot.enabled
            }
            None => {
                self.slots.push(AvailabilitySlot::new(day, time, true));
                true
            }
        }
    }

    /// Set an entry to an explicit state
    pub fn set(&mut self, day: DayOfWeek, time: SlotTime, enabled: bool) {
        match self.find(day, time) {
            Some(index) => self.slots[index].enabled = enabled,
            None => self.slots.push(AvailabilitySlot::new(day, time, enabled)),
        }
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    pub fn enabled_slots(&self) -> impl Iterator<Item = &AvailabilitySlot> {
        self.slots.iter().filter(|s| s.enabled)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Full week × clinic-day grid with enabled flags
    pub fn grid(&self) -> Vec<DaySchedule> {
        let times = SlotTime::day_grid();
        DayOfWeek::ALL
            .into_iter()
            .map(|day| DaySchedule {
                day,
                slots: times
                    .iter()
                    .map(|&time| (time, self.is_enabled(day, time)))
                    .collect(),
            })
            .collect()
    }
}
