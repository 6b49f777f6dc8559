// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::collection::{CalendarHandle, EventCollection};
use crate::config::Config;
use crate::datetime::DateRange;
use crate::event::{CalendarEvent, EditTarget, EventDraft, EventId};
use crate::view::{Slot, ViewMode};
use crate::{Error, Result};

/// Whether the event form and its backdrop are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Hidden,
    Visible,
}

/// Behaviour switches of [`CalendarWidget`].
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub initial_view: ViewMode,
    pub first_day: Weekday,
    pub weekends: bool,
    pub selectable: bool,

    /// Fill the draft from the clicked slot or selected event when the form opens.
    pub prefill: bool,

    /// Title stored when the draft title is left empty.
    pub default_title: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        WidgetOptions::from(&Config::default())
    }
}

impl From<&Config> for WidgetOptions {
    fn from(config: &Config) -> Self {
        Self {
            initial_view: config.calendar.initial_view,
            first_day: config.calendar.first_day(),
            weekends: config.calendar.weekends,
            selectable: config.calendar.selectable,
            prefill: config.form.prefill,
            default_title: config.calendar.locale.labels().new_event.to_owned(),
        }
    }
}

/// The calendar widget state: the draft being edited, the form visibility,
/// the current view, and the handle of the committed events.
#[derive(Debug)]
pub struct CalendarWidget<H: CalendarHandle = EventCollection> {
    handle: H,
    options: WidgetOptions,
    draft: EventDraft,
    target: EditTarget,
    form: FormState,
    error: Option<Error>,
    view: ViewMode,
    anchor: NaiveDate,
}

impl<H: CalendarHandle> CalendarWidget<H> {
    pub fn new(handle: H, options: WidgetOptions, now: NaiveDateTime) -> Self {
        Self {
            handle,
            view: options.initial_view,
            options,
            draft: EventDraft::new(now),
            target: EditTarget::New,
            form: FormState::Hidden,
            error: None,
            anchor: now.date(),
        }
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn form_state(&self) -> FormState {
        self.form
    }

    pub fn is_visible(&self) -> bool {
        self.form == FormState::Visible
    }

    /// The error of the last rejected save, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }

    /// A time slot on the grid was clicked. The next save always inserts.
    pub fn on_slot_click(&mut self, slot: Slot) {
        if !self.options.selectable {
            tracing::debug!(?slot, "calendar is not selectable, ignoring slot click");
            return;
        }

        if self.options.prefill {
            self.draft = EventDraft {
                title: String::new(),
                start: slot.start,
                end: slot.end,
            };
        }
        self.target = EditTarget::New;
        self.open();
    }

    /// An existing event on the grid was selected.
    pub fn on_event_select(&mut self, id: EventId) {
        if self.options.prefill {
            match self.handle.event(id) {
                Some(event) => {
                    self.draft = EventDraft::from(event);
                    self.target = EditTarget::Existing(id);
                }
                None => tracing::warn!(%id, "selected event not found, keeping current draft"),
            }
        }
        self.open();
    }

    pub fn on_title_change(&mut self, text: impl Into<String>) {
        self.draft.title = text.into();
    }

    pub fn on_start_change(&mut self, time: NaiveDateTime) {
        self.draft.start = time;
    }

    pub fn on_end_change(&mut self, time: NaiveDateTime) {
        self.draft.end = time;
    }

    /// Hides the form. The draft is kept as is.
    pub fn on_cancel(&mut self) {
        self.close();
    }

    /// The dimmed area around the form was clicked, same as cancel.
    pub fn on_backdrop_click(&mut self) {
        self.close();
    }

    /// Commits the draft and hides the form.
    ///
    /// Returns `Ok(None)` when the form is hidden. When the draft is rejected
    /// the form stays open and the error is kept for display.
    pub fn on_save(&mut self) -> Result<Option<EventId>> {
        if !self.is_visible() {
            return Ok(None);
        }

        let mut draft = self.draft.clone();
        if draft.title.trim().is_empty() {
            draft.title = self.options.default_title.clone();
        }

        let result = match self.target {
            EditTarget::New => self.handle.insert_event(draft),
            EditTarget::Existing(id) => self.handle.update_event(id, draft).map(|_| id),
        };

        match result {
            Ok(id) => {
                tracing::debug!(%id, "draft saved");
                self.target = EditTarget::Existing(id);
                self.close();
                Ok(Some(id))
            }
            Err(e) => {
                tracing::debug!(error = %e, "draft rejected");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Removes the event being edited and hides the form.
    ///
    /// Returns `Ok(None)` when the form is hidden or edits a new event.
    pub fn on_delete(&mut self) -> Result<Option<CalendarEvent>> {
        let EditTarget::Existing(id) = self.target else {
            return Ok(None);
        };
        if !self.is_visible() {
            return Ok(None);
        }

        let event = self.handle.remove_event(id)?;
        self.target = EditTarget::New;
        self.close();
        Ok(Some(event))
    }

    pub fn prev(&mut self) {
        self.anchor = self.view.step(self.anchor, false);
    }

    pub fn next(&mut self) {
        self.anchor = self.view.step(self.anchor, true);
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    pub fn change_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// The range named by the toolbar title.
    pub fn current_range(&self) -> DateRange {
        self.view.current_range(self.anchor, self.options.first_day)
    }

    /// The range of days covered by the grid.
    pub fn visible_range(&self) -> DateRange {
        self.view.visible_range(self.anchor, self.options.first_day)
    }

    /// Days drawn as columns or cells, skipping weekends when they are hidden.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.visible_range()
            .days()
            .filter(|d| self.options.weekends || !is_weekend(*d))
            .collect()
    }

    /// Committed events intersecting `[start, end)`.
    pub fn events_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&CalendarEvent> {
        self.handle.events_between(start, end)
    }

    fn open(&mut self) {
        self.error = None;
        self.form = FormState::Visible;
    }

    fn close(&mut self) {
        self.error = None;
        self.form = FormState::Hidden;
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
