// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Form visibility transitions.

use yotei_core::{CalendarHandle, EditTarget, EventDraft};

use crate::common::{assert_draft, assert_hidden, assert_visible, at, t0, test_slot, test_widget};

#[test]
fn starts_hidden_with_empty_draft() {
    let widget = test_widget(true);
    assert_hidden(&widget);
    assert_draft(&widget, "", t0(), t0());
    assert!(widget.error().is_none());
}

#[test]
fn slot_click_without_prefill_only_shows_form() {
    let mut widget = test_widget(false);
    widget.on_slot_click(test_slot(9));
    assert_visible(&widget);
    assert_draft(&widget, "", t0(), t0());
}

#[test]
fn event_select_without_prefill_only_shows_form() {
    let mut widget = test_widget(false);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("Lunch");
    widget.on_start_change(at(12));
    widget.on_end_change(at(13));
    let id = widget.on_save().unwrap().unwrap();

    widget.on_title_change("draft");
    widget.on_event_select(id);
    assert_visible(&widget);
    assert_draft(&widget, "draft", at(12), at(13));
}

#[test]
fn open_actions_keep_form_visible_until_closed() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    widget.on_slot_click(test_slot(10));
    widget.on_event_select(yotei_core::EventId::new());
    assert_visible(&widget);

    widget.on_title_change("x");
    widget.on_start_change(at(1));
    widget.on_end_change(at(2));
    assert_visible(&widget);

    widget.on_cancel();
    assert_hidden(&widget);
}

#[test]
fn cancel_keeps_draft() {
    let mut widget = test_widget(false);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("Meeting");
    widget.on_cancel();

    assert_hidden(&widget);
    assert_draft(&widget, "Meeting", t0(), t0());

    widget.on_slot_click(test_slot(9));
    assert_draft(&widget, "Meeting", t0(), t0());
}

#[test]
fn backdrop_click_is_equivalent_to_cancel() {
    let mut by_cancel = test_widget(true);
    let mut by_backdrop = test_widget(true);
    for widget in [&mut by_cancel, &mut by_backdrop] {
        widget.on_slot_click(test_slot(14));
        widget.on_title_change("Review");
        widget.on_end_change(at(16));
    }

    by_cancel.on_cancel();
    by_backdrop.on_backdrop_click();

    assert_hidden(&by_cancel);
    assert_hidden(&by_backdrop);
    assert_eq!(by_cancel.draft(), by_backdrop.draft());
    assert_draft(&by_backdrop, "Review", at(14), at(16));
}

#[test]
fn close_actions_on_hidden_form_are_harmless() {
    let mut widget = test_widget(true);
    widget.on_cancel();
    widget.on_backdrop_click();
    assert_hidden(&widget);
    assert_eq!(widget.draft(), &EventDraft::new(t0()));
}

#[test]
fn event_select_prefills_selected_event() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    widget.on_title_change("Standup");
    let id = widget.on_save().unwrap().unwrap();

    widget.on_slot_click(test_slot(15));
    widget.on_cancel();
    widget.on_event_select(id);

    assert_visible(&widget);
    assert_eq!(widget.target(), EditTarget::Existing(id));
    let event = widget.handle().event(id).unwrap();
    assert_draft(&widget, "Standup", event.start, event.end);
}

#[test]
fn unknown_event_select_keeps_draft() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    widget.on_cancel();

    widget.on_event_select(yotei_core::EventId::new());
    assert_visible(&widget);
    assert_eq!(widget.target(), EditTarget::New);
    assert_draft(&widget, "", test_slot(9).start, test_slot(9).end);
}
