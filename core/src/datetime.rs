// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::de;

use crate::{Error, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision, where `24:00` is a valid
/// value marking the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        let minutes = hour.checked_mul(60)?.checked_add(minute)?;
        (minute < 60 && minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// The time of day of `dt`, truncated to the minute.
    pub fn of(dt: NaiveDateTime) -> Self {
        Self((dt.hour() * 60 + dt.minute()) as u16)
    }

    /// Combines the time of day with a date. `24:00` yields midnight of the next day.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + Duration::minutes(self.0 as i64)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Parses `HH:MM` or `HH:MM:SS`, seconds must be zero.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_owned());
        let mut parts = s.trim().split(':');
        let hour: u16 = parts.next().and_then(|a| a.parse().ok()).ok_or_else(invalid)?;
        let minute: u16 = parts.next().and_then(|a| a.parse().ok()).ok_or_else(invalid)?;
        match parts.next().map(str::parse::<u16>) {
            None | Some(Ok(0)) => {}
            Some(_) => return Err(invalid()),
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A half-open range of whole days, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        (0..self.num_days()).map(move |i| start + Duration::days(i))
    }

    /// The last day inside the range.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end).max(self.start)
    }

    /// The range expressed as date times, `[start 00:00, end 00:00)`.
    pub fn datetimes(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.start.and_time(NaiveTime::MIN),
            self.end.and_time(NaiveTime::MIN),
        )
    }
}

/// Parse a duration string in the format "HH:MM" / "HH:MM:SS" / "1d" / "24h" / "60m" / "1800s".
/// Zero and negative durations are rejected.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let invalid = || Error::InvalidDuration(s.to_owned());
    let num = |a: &str| a.trim().parse::<i64>().map_err(|_| invalid());

    let duration = if s.contains(':') {
        let parts = s.split(':').map(num).collect::<Result<Vec<_>>>()?;
        match parts.as_slice() {
            [h, m] => h
                .checked_mul(60)
                .and_then(|a| a.checked_add(*m))
                .and_then(Duration::try_minutes),
            [h, m, sec] => h
                .checked_mul(3600)
                .zip(m.checked_mul(60))
                .and_then(|(a, b)| a.checked_add(b))
                .and_then(|a| a.checked_add(*sec))
                .and_then(Duration::try_seconds),
            _ => None,
        }
    } else if let Some(rest) = s.strip_suffix('d') {
        Duration::try_days(num(rest)?)
    } else if let Some(rest) = s.strip_suffix('h') {
        Duration::try_hours(num(rest)?)
    } else if let Some(rest) = s.strip_suffix('m') {
        Duration::try_minutes(num(rest)?)
    } else if let Some(rest) = s.strip_suffix('s') {
        Duration::try_seconds(num(rest)?)
    } else {
        None
    };
    let duration = duration.ok_or_else(invalid)?;

    match duration > Duration::zero() {
        true => Ok(duration),
        false => Err(invalid()),
    }
}

/// Floors `dt` onto a grid of `step` anchored at midnight of the same day.
pub fn floor_to_step(dt: NaiveDateTime, step: Duration) -> NaiveDateTime {
    let step = step.num_seconds();
    if step <= 0 {
        return dt;
    }

    let midnight = dt.date().and_time(NaiveTime::MIN);
    let elapsed = (dt - midnight).num_seconds();
    midnight + Duration::seconds(elapsed - elapsed % step)
}
