// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;

use crate::event::{CalendarEvent, EventDraft, EventId};
use crate::{Error, Result};

/// The operations the calendar widget needs from its event storage.
pub trait CalendarHandle {
    /// Inserts a new event and returns its identifier.
    fn insert_event(&mut self, draft: EventDraft) -> Result<EventId>;

    /// Replaces the title and times of an existing event.
    fn update_event(&mut self, id: EventId, draft: EventDraft) -> Result<()>;

    /// Removes an event and returns it.
    fn remove_event(&mut self, id: EventId) -> Result<CalendarEvent>;

    fn event(&self, id: EventId) -> Option<&CalendarEvent>;

    /// Events intersecting `[start, end)`, ordered by start time.
    fn events_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&CalendarEvent>;
}

/// In-memory event storage kept ordered by start time.
#[derive(Debug, Default, Clone)]
pub struct EventCollection {
    events: Vec<CalendarEvent>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn into_events(self) -> Vec<CalendarEvent> {
        self.events
    }

    fn position(&self, id: EventId) -> Result<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::EventNotFound(id))
    }

    fn sort(&mut self) {
        self.events
            .sort_by(|a, b| (a.start, a.end, a.id).cmp(&(b.start, b.end, b.id)));
    }
}

impl CalendarHandle for EventCollection {
    fn insert_event(&mut self, draft: EventDraft) -> Result<EventId> {
        let event = CalendarEvent::from_draft(EventId::new(), draft)?;
        let id = event.id;
        tracing::debug!(%id, title = %event.title, "inserting event");
        self.events.push(event);
        self.sort();
        Ok(id)
    }

    fn update_event(&mut self, id: EventId, draft: EventDraft) -> Result<()> {
        let index = self.position(id)?;
        let event = CalendarEvent::from_draft(id, draft)?;
        tracing::debug!(%id, title = %event.title, "updating event");
        self.events[index] = event;
        self.sort();
        Ok(())
    }

    fn remove_event(&mut self, id: EventId) -> Result<CalendarEvent> {
        let index = self.position(id)?;
        tracing::debug!(%id, "removing event");
        Ok(self.events.remove(index))
    }

    fn event(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    fn events_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|e| e.overlaps(start, end))
            .collect()
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a CalendarEvent;
    type IntoIter = std::slice::Iter<'a, CalendarEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
