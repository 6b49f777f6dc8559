// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;

use crate::EventId;

/// Errors raised by the calendar core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An event must end strictly after it starts.
    #[error("event must end after it starts: {start} >= {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// No event with the given identifier exists in the collection.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// A date time could not be parsed with the configured display format.
    #[error("invalid date time `{value}`, expected format `{format}`")]
    InvalidDateTime { value: String, format: String },

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type of the calendar core.
pub type Result<T, E = Error> = std::result::Result<T, E>;
