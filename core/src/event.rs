// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::view::Slot;
use crate::{Error, Result};

/// Identifier of an event stored in a calendar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event committed to the calendar. It always ends after it starts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEvent {
    pub(crate) fn from_draft(id: EventId, draft: EventDraft) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title,
            start: draft.start,
            end: draft.end,
        })
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.start, self.end)
    }

    /// Whether the event intersects `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.slot().overlaps(start, end)
    }
}

/// The event being edited in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventDraft {
    /// An untitled draft starting and ending at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            start: now,
            end: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.start < self.end {
            true => Ok(()),
            false => Err(Error::InvalidRange {
                start: self.start,
                end: self.end,
            }),
        }
    }
}

impl From<&CalendarEvent> for EventDraft {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            start: event.start,
            end: event.end,
        }
    }
}

/// What saving the draft will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    /// Insert a new event.
    #[default]
    New,

    /// Update the event with the given identifier.
    Existing(EventId),
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-10-18 09:00", "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn new_draft_is_empty_and_zero_length() {
        let draft = EventDraft::new(now());
        assert!(draft.title.is_empty());
        assert_eq!(draft.start, draft.end);
        assert!(matches!(
            draft.validate(),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn event_requires_positive_length() {
        let mut draft = EventDraft::new(now());
        draft.end = now() + Duration::minutes(30);
        let event = CalendarEvent::from_draft(EventId::new(), draft.clone()).unwrap();
        assert_eq!(EventDraft::from(&event), draft);

        draft.end = now() - Duration::minutes(30);
        assert!(CalendarEvent::from_draft(EventId::new(), draft).is_err());
    }

    #[test]
    fn overlap_is_half_open() {
        let mut draft = EventDraft::new(now());
        draft.end = now() + Duration::hours(1);
        let event = CalendarEvent::from_draft(EventId::new(), draft).unwrap();

        assert!(event.overlaps(now() + Duration::minutes(30), now() + Duration::hours(2)));
        assert!(!event.overlaps(now() + Duration::hours(1), now() + Duration::hours(2)));
        assert!(!event.overlaps(now() - Duration::hours(1), now()));
    }
}
