// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::datetime::{DateRange, TimeOfDay};
use crate::{Error, Result};

/// Number of weeks shown by the month grid.
pub const MONTH_GRID_WEEKS: i64 = 6;

/// The calendar view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub enum ViewMode {
    /// Whole-day cells laid out as a month grid.
    #[serde(rename = "dayGridMonth")]
    DayGridMonth,

    /// One column per day, split into timed slots.
    #[default]
    #[serde(rename = "timeGridWeek")]
    TimeGridWeek,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::DayGridMonth, ViewMode::TimeGridWeek];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::DayGridMonth => "dayGridMonth",
            ViewMode::TimeGridWeek => "timeGridWeek",
        }
    }

    /// The range that the view is about, which also drives the toolbar title.
    pub fn current_range(self, anchor: NaiveDate, first_day: Weekday) -> DateRange {
        match self {
            ViewMode::TimeGridWeek => {
                let start = week_start(anchor, first_day);
                DateRange::new(start, start + Duration::days(7))
            }
            ViewMode::DayGridMonth => {
                let start = first_of_month(anchor);
                let end = start.checked_add_months(Months::new(1)).unwrap_or(start);
                DateRange::new(start, end)
            }
        }
    }

    /// The range of days actually drawn. The month grid is padded to whole weeks.
    pub fn visible_range(self, anchor: NaiveDate, first_day: Weekday) -> DateRange {
        match self {
            ViewMode::TimeGridWeek => self.current_range(anchor, first_day),
            ViewMode::DayGridMonth => {
                let start = week_start(first_of_month(anchor), first_day);
                DateRange::new(start, start + Duration::weeks(MONTH_GRID_WEEKS))
            }
        }
    }

    /// Moves the anchor by one view unit, a week or a month.
    pub fn step(self, anchor: NaiveDate, forward: bool) -> NaiveDate {
        match (self, forward) {
            (ViewMode::TimeGridWeek, true) => anchor + Duration::weeks(1),
            (ViewMode::TimeGridWeek, false) => anchor - Duration::weeks(1),
            (ViewMode::DayGridMonth, true) => first_of_month(anchor)
                .checked_add_months(Months::new(1))
                .unwrap_or(anchor),
            (ViewMode::DayGridMonth, false) => first_of_month(anchor)
                .checked_sub_months(Months::new(1))
                .unwrap_or(anchor),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ViewMode::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidConfig(format!("unknown view: {s}")))
    }
}

/// A selectable span of time on the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The slot covering a whole day, as selected from the month grid.
    pub fn whole_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self::new(start, start + Duration::days(1))
    }

    /// Whether `[start, end)` intersects the slot.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && self.start < end
    }
}

/// Splits a day into consecutive slots of `duration`. The last slot is clipped at midnight.
pub fn day_slots(date: NaiveDate, duration: Duration) -> Vec<Slot> {
    let day = Slot::whole_day(date);
    if duration <= Duration::zero() {
        return vec![day];
    }

    let mut slots = Vec::new();
    let mut start = day.start;
    while start < day.end {
        let end = (start + duration).min(day.end);
        slots.push(Slot::new(start, end));
        start = end;
    }
    slots
}

/// The weekly window highlighted as working time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct BusinessHours {
    /// Days of the week, 0 = Sunday through 6 = Saturday.
    pub days_of_week: Vec<u8>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            days_of_week: vec![1, 2, 3, 4, 5],
            start_time: TimeOfDay::MIDNIGHT,
            end_time: TimeOfDay::END_OF_DAY,
        }
    }
}

impl BusinessHours {
    pub fn includes_day(&self, date: NaiveDate) -> bool {
        let day = date.weekday().num_days_from_sunday() as u8;
        self.days_of_week.contains(&day)
    }

    /// Whether the slot starts within business hours.
    pub fn includes(&self, slot: &Slot) -> bool {
        let time = TimeOfDay::of(slot.start);
        self.includes_day(slot.start.date()) && self.start_time <= time && time < self.end_time
    }
}

/// The first day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday() - first_day.num_days_from_sunday()) % 7;
    date - Duration::days(offset as i64)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_configured_day() {
        // 2025-10-18 is a Saturday
        let sat = date(2025, 10, 18);
        assert_eq!(week_start(sat, Weekday::Sun), date(2025, 10, 12));
        assert_eq!(week_start(sat, Weekday::Mon), date(2025, 10, 13));
        assert_eq!(week_start(date(2025, 10, 12), Weekday::Sun), date(2025, 10, 12));
    }

    #[test]
    fn month_grid_covers_six_whole_weeks() {
        let anchor = date(2025, 2, 14);
        let current = ViewMode::DayGridMonth.current_range(anchor, Weekday::Sun);
        assert_eq!(current, DateRange::new(date(2025, 2, 1), date(2025, 3, 1)));

        let visible = ViewMode::DayGridMonth.visible_range(anchor, Weekday::Sun);
        assert_eq!(visible.start, date(2025, 1, 26));
        assert_eq!(visible.num_days(), 42);
        assert_eq!(visible.start.weekday(), Weekday::Sun);
    }

    #[test]
    fn steps_by_view_unit() {
        let anchor = date(2025, 1, 31);
        assert_eq!(ViewMode::TimeGridWeek.step(anchor, true), date(2025, 2, 7));
        assert_eq!(ViewMode::TimeGridWeek.step(anchor, false), date(2025, 1, 24));
        assert_eq!(ViewMode::DayGridMonth.step(anchor, true), date(2025, 2, 1));
        assert_eq!(ViewMode::DayGridMonth.step(anchor, false), date(2024, 12, 1));
    }

    #[test]
    fn splits_day_into_slots() {
        let slots = day_slots(date(2025, 10, 18), Duration::minutes(30));
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[1].start.time(), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
        assert_eq!(slots[47].end, date(2025, 10, 19).and_time(NaiveTime::MIN));

        let slots = day_slots(date(2025, 10, 18), Duration::minutes(25 * 60 / 2));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].end, date(2025, 10, 19).and_time(NaiveTime::MIN));
    }

    #[test]
    fn business_hours_cover_weekdays_only() {
        let hours = BusinessHours::default();
        let monday = Slot::whole_day(date(2025, 10, 13));
        let sunday = Slot::whole_day(date(2025, 10, 12));
        assert!(hours.includes(&monday));
        assert!(!hours.includes(&sunday));
        assert!(hours.includes_day(date(2025, 10, 17)));
        assert!(!hours.includes_day(date(2025, 10, 18)));
    }

    #[test]
    fn business_hours_respect_time_window() {
        let hours = BusinessHours {
            days_of_week: vec![1],
            start_time: TimeOfDay::from_hm(9, 0).unwrap(),
            end_time: TimeOfDay::from_hm(17, 0).unwrap(),
        };
        let slots = day_slots(date(2025, 10, 13), Duration::hours(1));
        let open: Vec<_> = slots.iter().filter(|s| hours.includes(s)).collect();
        assert_eq!(open.len(), 8);
        assert_eq!(open[0].start.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn parses_view_names() {
        assert_eq!("timeGridWeek".parse::<ViewMode>().unwrap(), ViewMode::TimeGridWeek);
        assert_eq!("daygridmonth".parse::<ViewMode>().unwrap(), ViewMode::DayGridMonth);
        assert!("listWeek".parse::<ViewMode>().is_err());
    }
}
