// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Field edits on the draft.

use crate::common::{assert_draft, at, t0, test_slot, test_widget};

#[test]
fn title_change_is_idempotent() {
    let mut once = test_widget(true);
    let mut twice = test_widget(true);
    once.on_title_change("Meeting");
    twice.on_title_change("Meeting");
    twice.on_title_change("Meeting");
    assert_eq!(once.draft(), twice.draft());
    assert_eq!(once.form_state(), twice.form_state());
}

#[test]
fn empty_title_is_accepted() {
    let mut widget = test_widget(true);
    widget.on_title_change("Meeting");
    widget.on_title_change("");
    assert_draft(&widget, "", t0(), t0());
}

#[test]
fn start_change_never_touches_end() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    let end = widget.draft().end;
    for hour in [0, 8, 12, 23, 48] {
        widget.on_start_change(at(hour));
        assert_eq!(widget.draft().start, at(hour));
        assert_eq!(widget.draft().end, end);
    }
}

#[test]
fn end_change_never_touches_start() {
    let mut widget = test_widget(true);
    widget.on_slot_click(test_slot(9));
    let start = widget.draft().start;
    for hour in [-5, 0, 10, 30] {
        widget.on_end_change(at(hour));
        assert_eq!(widget.draft().end, at(hour));
        assert_eq!(widget.draft().start, start);
    }
}

#[test]
fn edits_do_not_validate_order() {
    let mut widget = test_widget(true);
    widget.on_start_change(at(18));
    widget.on_end_change(at(9));
    assert_draft(&widget, "", at(18), at(9));
    assert!(widget.error().is_none());
}
