// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use chrono::{Duration, NaiveDateTime};

use yotei_core::{CalendarWidget, EventCollection, Slot, WidgetOptions};

/// The "now" every fixture widget is created at, a Wednesday.
pub const T0: &str = "2025-10-15 10:23";

#[must_use]
pub fn t0() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(T0, "%Y-%m-%d %H:%M").unwrap()
}

/// A time on the day of [`T0`], `hour` hours after midnight.
#[must_use]
pub fn at(hour: i64) -> NaiveDateTime {
    t0().date().and_hms_opt(0, 0, 0).unwrap() + Duration::hours(hour)
}

/// A 30 minutes slot starting `hour` hours after midnight of [`T0`].
#[must_use]
pub fn test_slot(hour: i64) -> Slot {
    Slot::new(at(hour), at(hour) + Duration::minutes(30))
}

/// Creates an empty widget created at [`T0`].
///
/// # Example
///
/// ```ignore
/// let widget = test_widget(false); // bare visibility toggling, no pre-fill
/// ```
#[must_use]
pub fn test_widget(prefill: bool) -> CalendarWidget {
    let options = WidgetOptions {
        prefill,
        ..WidgetOptions::default()
    };
    CalendarWidget::new(EventCollection::new(), options, t0())
}
