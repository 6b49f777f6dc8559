// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::PickerConfig;
use crate::datetime::floor_to_step;
use crate::{Error, Result};

/// The date and time picker model: formatting, parsing and stepping on a fixed time grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimePicker {
    step: Duration,
    format: String,
    today_button: bool,
}

impl DateTimePicker {
    pub fn new(step: Duration, format: impl Into<String>) -> Self {
        Self {
            step,
            format: format.into(),
            today_button: true,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn format_str(&self) -> &str {
        &self.format
    }

    /// Whether the "jump to today" affordance is offered.
    pub fn has_today_button(&self) -> bool {
        self.today_button
    }

    pub fn format(&self, dt: NaiveDateTime) -> String {
        dt.format(&self.format).to_string()
    }

    /// Parses text in the display format and snaps it onto the time grid.
    pub fn parse(&self, s: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s.trim(), &self.format)
            .map(|dt| self.snap(dt))
            .map_err(|_| Error::InvalidDateTime {
                value: s.to_owned(),
                format: self.format.clone(),
            })
    }

    pub fn snap(&self, dt: NaiveDateTime) -> NaiveDateTime {
        floor_to_step(dt, self.step)
    }

    /// The next grid time after `dt`.
    pub fn forward(&self, dt: NaiveDateTime) -> NaiveDateTime {
        self.snap(dt) + self.step
    }

    /// The previous grid time before `dt`; an off-grid value snaps down first.
    pub fn backward(&self, dt: NaiveDateTime) -> NaiveDateTime {
        let snapped = self.snap(dt);
        match snapped == dt {
            true => snapped - self.step,
            false => snapped,
        }
    }

    pub fn shift_days(&self, dt: NaiveDateTime, days: i64) -> NaiveDateTime {
        self.snap(dt + Duration::days(days))
    }

    /// Moves `dt` to `today`, keeping the time of day.
    pub fn jump_to_today(&self, dt: NaiveDateTime, today: NaiveDate) -> NaiveDateTime {
        self.snap(today.and_time(dt.time()))
    }
}

impl From<&PickerConfig> for DateTimePicker {
    fn from(config: &PickerConfig) -> Self {
        Self {
            step: Duration::minutes(config.time_step as i64),
            format: config.date_format.clone(),
            today_button: config.today_button,
        }
    }
}
