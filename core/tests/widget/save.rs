// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Committing drafts to the event collection.

use yotei_core::{CalendarHandle, EditTarget, Error};

use crate::common::{assert_draft, assert_hidden, assert_visible, at, t0, test_slot, test_widget};

#[test]
fn save_on_hidden_form_changes_nothing() {
    let mut widget = test_widget(true);
    widget.on_title_change("Meeting");
    let before = widget.draft().clone();

    assert_eq!(widget.on_save(), Ok(None));
    assert_hidden(&widget);
    assert_eq!(widget.draft(), &before);
    assert!(widget.handle().is_empty());
}

#[test]
fn save_rejects_non_positive_range_and_keeps_form_open() {
    let mut widget = test_widget(false);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("Zero length");

    let err = widget.on_save().unwrap_err();
    assert_eq!(err, Error::InvalidRange { start: t0(), end: t0() });
    assert_visible(&widget);
    assert_eq!(widget.error(), Some(&err));
    assert_draft(&widget, "Zero length", t0(), t0());
    assert!(widget.handle().is_empty());

    widget.on_cancel();
    assert!(widget.error().is_none());
}

#[test]
fn save_new_draft_adds_one_event_and_hides_form() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("Meeting");
    widget.on_end_change(at(11));

    let id = widget.on_save().unwrap().unwrap();
    assert_hidden(&widget);
    assert_eq!(widget.handle().len(), 1);

    let event = widget.handle().event(id).unwrap();
    assert_eq!(event.title, "Meeting");
    assert_eq!(event.start, at(9));
    assert_eq!(event.end, at(11));
}

#[test]
fn save_existing_draft_updates_in_place() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("Meeting");
    let id = widget.on_save().unwrap().unwrap();

    widget.on_event_select(id);
    assert_eq!(widget.target(), EditTarget::Existing(id));
    widget.on_title_change("Planning");
    widget.on_start_change(at(13));
    widget.on_end_change(at(14));
    assert_eq!(widget.on_save(), Ok(Some(id)));

    assert_eq!(widget.handle().len(), 1);
    let event = widget.handle().event(id).unwrap();
    assert_eq!(event.title, "Planning");
    assert_eq!(event.start, at(13));
}

#[test]
fn saved_events_are_visible_in_the_week() {
    let mut widget = test_widget(true);
    for hour in [9, 11, 15] {
        widget.on_slot_click(test_slot(hour));
        widget.on_save().unwrap();
    }

    let (start, end) = widget.visible_range().datetimes();
    assert_eq!(widget.events_between(start, end).len(), 3);
    assert_eq!(widget.events_between(at(10), at(12)).len(), 1);
}

#[test]
fn slot_click_after_save_inserts_another_event_without_prefill() {
    let mut widget = test_widget(false);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("A");
    widget.on_start_change(at(9));
    widget.on_end_change(at(10));
    let first = widget.on_save().unwrap().unwrap();

    widget.on_slot_click(test_slot(15));
    assert_eq!(widget.target(), EditTarget::New);
    widget.on_title_change("B");
    let second = widget.on_save().unwrap().unwrap();

    assert_ne!(first, second);
    assert_eq!(widget.handle().len(), 2);
    assert_eq!(widget.handle().event(first).unwrap().title, "A");
    assert_eq!(widget.handle().event(second).unwrap().title, "B");
}
