//! Scheduling value objects: weekdays and half-hour slot times

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Day of the week, serialized as its lowercase English name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    /// Weekday a calendar date falls on
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScheduleParseError::InvalidDay(s.to_string()))
    }
}

/// A half-hour aligned time of day ("HH:MM", minutes 00 or 30)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    minutes: u16,
}

impl SlotTime {
    pub const STEP_MINUTES: u16 = 30;

    /// First bookable slot of the clinic day
    pub const DAY_START: SlotTime = SlotTime { minutes: 9 * 60 };
    /// Last bookable slot of the clinic day
    pub const DAY_END: SlotTime = SlotTime {
        minutes: 17 * 60 + 30,
    };

    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleParseError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleParseError::InvalidTime(format!("{hour}:{minute}")));
        }
        let minutes = u16::from(hour) * 60 + u16::from(minute);
        if minutes % Self::STEP_MINUTES != 0 {
            return Err(ScheduleParseError::OffGrid(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { minutes })
    }

    pub fn parse(s: &str) -> Result<Self, ScheduleParseError> {
        let invalid = || ScheduleParseError::InvalidTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }

    #[inline]
    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    #[inline]
    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Every slot of the clinic day, 09:00 through 17:30
    pub fn day_grid() -> Vec<SlotTime> {
        (Self::DAY_START.minutes..=Self::DAY_END.minutes)
            .step_by(usize::from(Self::STEP_MINUTES))
            .map(|minutes| SlotTime { minutes })
            .collect()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotTime::parse(s)
    }
}

impl Serialize for SlotTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SlotTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Errors when parsing schedule values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleParseError {
    #[error("invalid day of week: {0}")]
    InvalidDay(String),

    #[error("invalid time: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("time {0} is not on a half-hour boundary")]
    OffGrid(String),
}
