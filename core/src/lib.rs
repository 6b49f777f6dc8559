// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the yotei calendar: the event draft, the form state machine, the
//! event collection and the view arithmetic. No terminal I/O happens here.

mod collection;
mod config;
mod datetime;
mod error;
mod event;
mod locale;
mod picker;
mod view;
mod widget;

pub use crate::collection::{CalendarHandle, EventCollection};
pub use crate::config::{APP_NAME, CalendarConfig, Config, ConfigDuration, FormConfig, PickerConfig};
pub use crate::datetime::{DateRange, TimeOfDay, parse_duration};
pub use crate::error::{Error, Result};
pub use crate::event::{CalendarEvent, EditTarget, EventDraft, EventId};
pub use crate::locale::{Labels, Locale};
pub use crate::picker::DateTimePicker;
pub use crate::view::{BusinessHours, MONTH_GRID_WEEKS, Slot, ViewMode, day_slots, week_start};
pub use crate::widget::{CalendarWidget, FormState, WidgetOptions};
