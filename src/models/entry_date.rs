//! Logical transaction date for entries
//!
//! Entries are grouped and filtered by calendar day. Older data may carry a
//! full timestamp in the date field, so three written forms are accepted and
//! each is written back the way it was read: the same number of fraction
//! digits (up to nanoseconds) and the same spelling of a UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DAY_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Most fraction digits a timestamp keeps; chrono stores nanoseconds
const MAX_FRACTION_DIGITS: usize = 9;

/// The date an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryDate {
    /// `2025-01-15`
    Day(NaiveDate),
    /// `2025-01-15T10:30:00.000Z` or with an explicit offset
    Instant(DateTime<FixedOffset>, TimeForm),
    /// `2025-01-15T10:30:00`
    Local(NaiveDateTime, TimeForm),
}

/// How the time part of a timestamp was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeForm {
    /// Digits after the seconds' decimal point; zero means no fraction
    fraction_digits: u8,
    /// UTC written as `Z` rather than `+00:00`
    zulu: bool,
}

impl TimeForm {
    /// Read the form off a timestamp already known to parse
    fn of(raw: &str) -> Self {
        let time = raw.get(10..).unwrap_or("");
        let fraction_digits = time
            .split_once('.')
            .map(|(_, rest)| rest.chars().take_while(|c| c.is_ascii_digit()).count())
            .unwrap_or(0)
            .min(MAX_FRACTION_DIGITS);

        Self {
            // Bounded by MAX_FRACTION_DIGITS
            fraction_digits: fraction_digits as u8,
            zulu: time.ends_with(['Z', 'z']),
        }
    }

    /// Write the date and `HH:MM:SS`, plus the fraction digits this form carries
    fn write_time(&self, f: &mut fmt::Formatter<'_>, at: &NaiveDateTime) -> fmt::Result {
        write!(f, "{}", at.format(SECONDS_FORMAT))?;
        if self.fraction_digits > 0 {
            // Leap seconds report 1_000_000_000 or more
            let nanos = format!("{:09}", at.nanosecond() % 1_000_000_000);
            write!(f, ".{}", &nanos[..usize::from(self.fraction_digits)])?;
        }
        Ok(())
    }
}

impl EntryDate {
    /// Calendar day as written, ignoring time-of-day
    pub fn day(&self) -> NaiveDate {
        match self {
            Self::Day(day) => *day,
            Self::Instant(instant, _) => instant.date_naive(),
            Self::Local(local, _) => local.date(),
        }
    }

    /// Check whether this date falls on the given calendar day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.day() == day
    }

    /// Sort key used when listing entries newest first
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            Self::Day(day) => day.and_time(NaiveTime::MIN),
            Self::Instant(instant, _) => instant.naive_local(),
            Self::Local(local, _) => *local,
        }
    }
}

impl From<NaiveDate> for EntryDate {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl FromStr for EntryDate {
    type Err = EntryDateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(day) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
            return Ok(Self::Day(day));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Instant(instant, TimeForm::of(s)));
        }
        if let Ok(local) = NaiveDateTime::parse_from_str(s, NAIVE_DATETIME_FORMAT) {
            return Ok(Self::Local(local, TimeForm::of(s)));
        }
        Err(EntryDateParseError(s.to_string()))
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{}", day.format(DAY_FORMAT)),
            Self::Instant(instant, form) => {
                form.write_time(f, &instant.naive_local())?;
                if form.zulu && instant.offset().local_minus_utc() == 0 {
                    f.write_str("Z")
                } else {
                    write!(f, "{}", instant.format("%:z"))
                }
            }
            Self::Local(local, form) => form.write_time(f, local),
        }
    }
}

impl Serialize for EntryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Error for unrecognised date strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDateParseError(String);

impl fmt::Display for EntryDateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid date '{}': expected YYYY-MM-DD or an ISO-8601 timestamp",
            self.0
        )
    }
}

impl std::error::Error for EntryDateParseError {}
