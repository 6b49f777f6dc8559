// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::DateRange;
use crate::datetime::TimeOfDay;

/// Locale used for labels and date formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Static UI labels of a locale.
#[derive(Debug)]
pub struct Labels {
    pub form_heading: &'static str,
    pub title: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub cancel: &'static str,
    pub save: &'static str,
    pub delete: &'static str,
    pub today: &'static str,
    pub picker_today: &'static str,
    pub month: &'static str,
    pub week: &'static str,
    pub new_event: &'static str,
    pub invalid_range: &'static str,
}

const LABELS_JA: Labels = Labels {
    form_heading: "予定を入力",
    title: "タイトル",
    start: "開始",
    end: "終了",
    cancel: "キャンセル",
    save: "保存",
    delete: "削除",
    today: "今日",
    picker_today: "today",
    month: "月",
    week: "週",
    new_event: "新しい予定",
    invalid_range: "終了は開始より後にしてください",
};

const LABELS_EN: Labels = Labels {
    form_heading: "Enter an event",
    title: "Title",
    start: "Start",
    end: "End",
    cancel: "Cancel",
    save: "Save",
    delete: "Delete",
    today: "today",
    picker_today: "today",
    month: "month",
    week: "week",
    new_event: "New event",
    invalid_range: "End must be after start",
};

const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];
const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Ja => &LABELS_JA,
            Locale::En => &LABELS_EN,
        }
    }

    /// The first day of the week when none is configured.
    pub fn first_day(self) -> Weekday {
        Weekday::Sun
    }

    pub fn weekday_short(self, weekday: Weekday) -> &'static str {
        let i = weekday.num_days_from_sunday() as usize;
        match self {
            Locale::Ja => WEEKDAYS_JA[i],
            Locale::En => WEEKDAYS_EN[i],
        }
    }

    /// Formats the toolbar title of a range with a numeric year and a short month,
    /// e.g. `2025年10月` or `Oct 2025`. A range spanning two months names both.
    pub fn format_title(self, range: DateRange) -> String {
        let (first, last) = (range.start, range.last_day());
        let same_month = first.year() == last.year() && first.month() == last.month();
        match self {
            Locale::Ja if same_month => format!("{}年{}月", first.year(), first.month()),
            Locale::Ja if first.year() == last.year() => {
                format!("{}年{}月～{}月", first.year(), first.month(), last.month())
            }
            Locale::Ja => format!(
                "{}年{}月～{}年{}月",
                first.year(),
                first.month(),
                last.year(),
                last.month()
            ),
            Locale::En if same_month => format!("{} {}", month_en(first), first.year()),
            Locale::En if first.year() == last.year() => {
                format!("{} – {} {}", month_en(first), month_en(last), first.year())
            }
            Locale::En => format!(
                "{} {} – {} {}",
                month_en(first),
                first.year(),
                month_en(last),
                last.year()
            ),
        }
    }

    /// Column header of a day in the week view, e.g. `10/18(土)` or `Sat 10/18`.
    pub fn format_day_header(self, date: NaiveDate) -> String {
        let weekday = self.weekday_short(date.weekday());
        match self {
            Locale::Ja => format!("{}/{}({})", date.month(), date.day(), weekday),
            Locale::En => format!("{} {}/{}", weekday, date.month(), date.day()),
        }
    }

    /// Row label of a time slot, only on full hours, e.g. `9時` or `9am`.
    pub fn format_slot_label(self, time: TimeOfDay) -> Option<String> {
        let minutes = time.minutes();
        if minutes % 60 != 0 {
            return None;
        }

        let hour = minutes / 60;
        Some(match self {
            Locale::Ja => format!("{hour}時"),
            Locale::En => match hour {
                0 | 24 => "12am".to_owned(),
                12 => "12pm".to_owned(),
                h if h < 12 => format!("{h}am"),
                h => format!("{}pm", h - 12),
            },
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ja => write!(f, "ja"),
            Locale::En => write!(f, "en"),
        }
    }
}

fn month_en(date: NaiveDate) -> &'static str {
    MONTHS_EN[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_single_month_title() {
        let range = DateRange::new(date(2025, 10, 12), date(2025, 10, 19));
        assert_eq!(Locale::Ja.format_title(range), "2025年10月");
        assert_eq!(Locale::En.format_title(range), "Oct 2025");
    }

    #[test]
    fn formats_title_spanning_months() {
        let range = DateRange::new(date(2025, 9, 28), date(2025, 10, 5));
        assert_eq!(Locale::Ja.format_title(range), "2025年9月～10月");
        assert_eq!(Locale::En.format_title(range), "Sep – Oct 2025");

        let range = DateRange::new(date(2025, 12, 28), date(2026, 1, 4));
        assert_eq!(Locale::Ja.format_title(range), "2025年12月～2026年1月");
        assert_eq!(Locale::En.format_title(range), "Dec 2025 – Jan 2026");
    }

    #[test]
    fn formats_day_header() {
        let d = date(2025, 10, 18);
        assert_eq!(Locale::Ja.format_day_header(d), "10/18(土)");
        assert_eq!(Locale::En.format_day_header(d), "Sat 10/18");
    }

    #[test]
    fn labels_only_full_hours() {
        let nine = TimeOfDay::from_hm(9, 0).unwrap();
        let half = TimeOfDay::from_hm(9, 30).unwrap();
        let one_pm = TimeOfDay::from_hm(13, 0).unwrap();
        assert_eq!(Locale::Ja.format_slot_label(nine).as_deref(), Some("9時"));
        assert_eq!(Locale::En.format_slot_label(one_pm).as_deref(), Some("1pm"));
        assert_eq!(Locale::En.format_slot_label(TimeOfDay::MIDNIGHT).as_deref(), Some("12am"));
        assert_eq!(Locale::Ja.format_slot_label(half), None);
    }
}
