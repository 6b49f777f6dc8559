// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{Duration, Weekday};
use serde::de;

use crate::datetime::parse_duration;
use crate::locale::Locale;
use crate::view::{BusinessHours, ViewMode};
use crate::{Error, Result};

/// The name of the application.
pub const APP_NAME: &str = "yotei";

/// Configuration of the calendar.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub picker: PickerConfig,
    pub form: FormConfig,
}

impl Config {
    /// Checks values that the type system cannot.
    pub fn validate(&self) -> Result<()> {
        let slot = self.calendar.slot_duration.0;
        if slot > Duration::days(1) {
            return Err(Error::InvalidConfig(format!(
                "slot_duration must not exceed one day, got {} minutes",
                slot.num_minutes()
            )));
        }

        let step = self.picker.time_step;
        if step == 0 || 24 * 60 % step != 0 {
            return Err(Error::InvalidConfig(format!(
                "time_step must divide a day evenly, got {step} minutes"
            )));
        }

        if let Some(day) = self.calendar.business_hours.days_of_week.iter().find(|d| **d > 6) {
            return Err(Error::InvalidConfig(format!(
                "days_of_week must be within 0..=6, got {day}"
            )));
        }

        let hours = &self.calendar.business_hours;
        if hours.start_time > hours.end_time {
            return Err(Error::InvalidConfig(format!(
                "business hours start {} after end {}",
                hours.start_time, hours.end_time
            )));
        }

        Ok(())
    }
}

/// Options of the calendar grid.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub locale: Locale,

    /// The view shown when the calendar opens.
    pub initial_view: ViewMode,

    /// Length of a row in the week view.
    pub slot_duration: ConfigDuration,

    /// Whether slots and days can be selected to open the form.
    pub selectable: bool,

    pub business_hours: BusinessHours,

    /// Whether Saturday and Sunday are drawn.
    pub weekends: bool,

    /// First day of the week, 0 = Sunday. Defaults to the locale.
    pub first_day: Option<u8>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            initial_view: ViewMode::TimeGridWeek,
            slot_duration: ConfigDuration(Duration::minutes(30)),
            selectable: true,
            business_hours: BusinessHours::default(),
            weekends: true,
            first_day: None,
        }
    }
}

impl CalendarConfig {
    pub fn first_day(&self) -> Weekday {
        match self.first_day {
            Some(day) => (0..day % 7).fold(Weekday::Sun, |w, _| w.succ()),
            None => self.locale.first_day(),
        }
    }

    pub fn slot_duration(&self) -> Duration {
        self.slot_duration.0
    }
}

/// Options of the date and time pickers.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Granularity of the time selection, in minutes.
    pub time_step: u32,

    /// Display format, in `chrono` strftime syntax.
    pub date_format: String,

    pub today_button: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            time_step: 10,
            date_format: "%Y/%m/%-d %H:%M".to_owned(),
            today_button: true,
        }
    }
}

/// Options of the event form.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Fill the form from the clicked slot or the selected event when it opens.
    pub prefill: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { prefill: true }
    }
}

/// A positive duration accepting "HH:MM[:SS]", "1d", "1h", "30m" or "1800s".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(pub Duration);

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl de::Visitor<'_> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    r#"a duration string like "00:30:00", "00:30", "1h", "30m", or "1800s""#,
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}
