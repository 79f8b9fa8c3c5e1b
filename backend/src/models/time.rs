//! Wall-clock primitives for recurring weekly rules.
//!
//! Every time value in this module is venue-local wall-clock time. Instants are
//! represented as [`chrono::NaiveDateTime`]; converting from a zoned instant is
//! the caller's concern.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors raised while parsing days and times of day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("unknown day of week '{0}'")]
    InvalidDay(String),
}

/// Day of the week, serialized in lowercase (`"monday"`).
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

    /// Day of the week an instant falls on.
    pub fn of(instant: &NaiveDateTime) -> Self {
        instant.weekday().into()
    }

    /// The day before this one (Monday wraps to Sunday).
    pub fn previous(self) -> Self {
        Weekday::from(self).pred().into()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = TimeParseError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(DayOfWeek::from)
            .map_err(|_| TimeParseError::InvalidDay(s.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wall-clock time of day with minute resolution.
///
/// Serialized as `"HH:MM"`. Parsing also accepts a trailing `:SS` (ignored)
/// and `24:00`, which is read as midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Time of day of an instant, truncated to the minute.
    pub fn of(instant: &NaiveDateTime) -> Self {
        Self {
            hour: instant.hour() as u8,
            minute: instant.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// 12-hour clock rendering, e.g. `5:00 PM`, `12:30 AM`.
    pub fn to_12h_string(&self) -> String {
        let period = if self.hour >= 12 { "PM" } else { "AM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute, period)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeParseError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');
        let hour: u8 = parts
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(invalid)?;
        let minute: u8 = parts
            .next()
            .filter(|m| m.len() == 2)
            .and_then(|m| m.parse().ok())
            .ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            seconds.parse::<u8>().ok().filter(|s| *s < 60).ok_or_else(invalid)?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        if hour == 24 && minute == 0 {
            return Ok(Self::MIDNIGHT);
        }
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An open/close pair applied to a single day.
///
/// `close < open` means the interval runs past midnight into the next day.
/// `close == open` means the interval covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

impl DailyHours {
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Self {
        Self { open, close }
    }

    pub fn is_all_day(&self) -> bool {
        self.open == self.close
    }

    pub fn crosses_midnight(&self) -> bool {
        self.close < self.open
    }

    /// Whether the interval contains `minute`, counted from midnight of the
    /// day the interval starts on.
    ///
    /// Values in `[0, 1440)` address the starting day; values in
    /// `[1440, 2880)` address the early hours of the following day, which
    /// only an overnight interval can reach.
    pub fn contains(&self, minute: u32) -> bool {
        if self.is_all_day() {
            return minute < MINUTES_PER_DAY;
        }
        let open = self.open.minutes_since_midnight();
        let mut close = self.close.minutes_since_midnight();
        if close < open {
            close += MINUTES_PER_DAY;
        }
        open <= minute && minute < close
    }
}

/// Recurring operating hours keyed by day of week.
///
/// A day that is missing, or mapped to `null`, is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<DayOfWeek, Option<DailyHours>>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: DayOfWeek, hours: DailyHours) -> Self {
        self.days.insert(day, Some(hours));
        self
    }

    pub fn set_day(&mut self, day: DayOfWeek, hours: Option<DailyHours>) {
        self.days.insert(day, hours);
    }

    pub fn hours_on(&self, day: DayOfWeek) -> Option<&DailyHours> {
        self.days.get(&day).and_then(Option::as_ref)
    }

    /// True when no day of the week has hours.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Option::is_none)
    }
}

/// A recurring time window applied on a fixed set of days (e.g. happy hour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionalWindow {
    pub days: BTreeSet<DayOfWeek>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl PromotionalWindow {
    pub fn new(
        days: impl IntoIterator<Item = DayOfWeek>,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Self {
        Self {
            days: days.into_iter().collect(),
            start_time,
            end_time,
        }
    }

    pub fn hours(&self) -> DailyHours {
        DailyHours::new(self.start_time, self.end_time)
    }

    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        self.days.contains(&day)
    }
}
